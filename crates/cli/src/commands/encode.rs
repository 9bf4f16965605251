// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use photo_ledger_kernel::codec::encode_create_photo;

use crate::input::parse_hash;

pub fn encode(hash_hex: &str, storage_uri: &str, location: &str, timestamp: Option<&str>) -> anyhow::Result<Vec<u8>> {
    let hash = parse_hash(hash_hex)?;
    Ok(encode_create_photo(&hash, storage_uri, location, timestamp)?)
}

pub fn run(
    hash_hex: &str,
    storage_uri: &str,
    location: &str,
    timestamp: Option<&str>,
    base58: bool,
) -> anyhow::Result<()> {
    let data = encode(hash_hex, storage_uri, location, timestamp)?;
    if base58 {
        println!("{}", bs58::encode(&data).into_string());
    } else {
        println!("{}", hex::encode(&data));
    }
    Ok(())
}
