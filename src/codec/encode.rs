// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Instruction encoding.

use alloc::vec::Vec;

use super::discriminator::CREATE_PHOTO_DISCRIMINATOR;
use crate::config::{DISCRIMINATOR_LEN, HASH_LEN, MAX_STRING_FIELD_LEN};
use crate::error::CodecError;
use crate::types::Hash32;

fn write_u32(buf: &mut Vec<u8>, val: u32) {
    buf.extend_from_slice(&val.to_le_bytes());
}

fn write_str(buf: &mut Vec<u8>, val: &str) {
    write_u32(buf, val.len() as u32);
    buf.extend_from_slice(val.as_bytes());
}

fn check_len(field: &'static str, val: &str, max: usize) -> Result<(), CodecError> {
    if val.len() > max {
        return Err(CodecError::FieldTooLong { field, len: val.len(), max });
    }
    Ok(())
}

/// Encodes the instruction payload. Oversized fields are rejected, never truncated.
pub fn encode_create_photo(
    hash: &Hash32,
    storage_uri: &str,
    location: &str,
    timestamp: Option<&str>,
) -> Result<Vec<u8>, CodecError> {
    check_len("storage_uri", storage_uri, MAX_STRING_FIELD_LEN)?;
    check_len("location", location, MAX_STRING_FIELD_LEN)?;
    if let Some(ts) = timestamp {
        check_len("timestamp", ts, u32::MAX as usize)?;
    }

    let ts_len = timestamp.map(|t| 4 + t.len()).unwrap_or(0);
    let total = DISCRIMINATOR_LEN + HASH_LEN + 4 + storage_uri.len() + 4 + location.len() + ts_len;
    let mut buf = Vec::with_capacity(total);

    buf.extend_from_slice(&CREATE_PHOTO_DISCRIMINATOR);
    buf.extend_from_slice(hash.as_bytes());
    write_str(&mut buf, storage_uri);
    write_str(&mut buf, location);
    if let Some(ts) = timestamp {
        write_str(&mut buf, ts);
    }

    debug_assert_eq!(buf.len(), total);
    Ok(buf)
}
