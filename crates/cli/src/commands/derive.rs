// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use photo_ledger_kernel::address::derive_photo_address;
use photo_ledger_kernel::types::Pubkey;

use crate::input::{parse_hash, parse_pubkey};

pub fn derive(program_id: &str, payer: &str, hash_hex: &str, timestamp: &str) -> anyhow::Result<(Pubkey, u8)> {
    let program_id = parse_pubkey(program_id)?;
    let payer = parse_pubkey(payer)?;
    let hash = parse_hash(hash_hex)?;
    Ok(derive_photo_address(&program_id, &payer, &hash, timestamp.as_bytes())?)
}

pub fn run(program_id: &str, payer: &str, hash_hex: &str, timestamp: &str) -> anyhow::Result<()> {
    let (address, bump) = derive(program_id, payer, hash_hex, timestamp)?;
    println!("Record address: {}", address);
    println!("Bump:           {}", bump);
    Ok(())
}
