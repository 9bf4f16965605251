// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Argument parsing shared by the commands.

use std::path::Path;

use anyhow::{anyhow, Context};
use photo_ledger_kernel::config::PHOTO_EXTENSIONS;
use photo_ledger_kernel::types::{Hash32, Pubkey};

pub fn parse_hash(hex_str: &str) -> anyhow::Result<Hash32> {
    Hash32::from_hex(hex_str.trim()).map_err(|e| anyhow!("bad content hash {:?}: {}", hex_str, e))
}

pub fn parse_pubkey(s: &str) -> anyhow::Result<Pubkey> {
    s.trim().parse().map_err(|e| anyhow!("bad address {:?}: {}", s, e))
}

/// Instruction data as hex (optionally `0x`-prefixed) or base58.
/// Input that is valid hex is read as hex.
pub fn parse_instruction_data(s: &str) -> anyhow::Result<Vec<u8>> {
    let s = s.trim();
    let hex_part = s.strip_prefix("0x").unwrap_or(s);
    if !hex_part.is_empty() && hex_part.len() % 2 == 0 && hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return hex::decode(hex_part).context("decoding hex instruction data");
    }
    bs58::decode(s)
        .into_vec()
        .map_err(|e| anyhow!("instruction data is neither hex nor base58: {}", e))
}

/// Lowercased photo extension of `path`, if it is one we store.
pub fn photo_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    PHOTO_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

pub fn content_type_for(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
