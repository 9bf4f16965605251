// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Planning a new photo record before anything leaves the device.
//!
//! The plan fixes every derived value (hash, key, URI, instruction bytes,
//! record address) so that validation failures surface before any upload.
//! Signing and submission belong to the wallet.

use alloc::string::String;
use alloc::vec::Vec;

use crate::address::derive_photo_address;
use crate::catalog::{build_photo_key, build_storage_uri};
use crate::codec::encode_create_photo;
use crate::content::hash_bytes;
use crate::error::PlanError;
use crate::types::{Hash32, Pubkey};

#[derive(Debug, Clone)]
pub struct SubmissionRequest<'a> {
    pub program_id: &'a Pubkey,
    pub payer: &'a Pubkey,
    pub bucket: &'a str,
    pub base_prefix: Option<&'a str>,
    pub device_group_id: &'a str,
    pub extension: Option<&'a str>,
    pub location: &'a str,
    pub timestamp: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPlan {
    pub hash: Hash32,
    pub key: String,
    pub storage_uri: String,
    pub instruction_data: Vec<u8>,
    pub record_address: Pubkey,
    pub bump: u8,
}

pub fn plan_submission(req: &SubmissionRequest<'_>, photo_bytes: &[u8]) -> Result<SubmissionPlan, PlanError> {
    let hash = hash_bytes(photo_bytes);
    let hash_hex = hash.to_hex();
    let key = build_photo_key(req.device_group_id, &hash_hex, req.extension, req.base_prefix);
    let storage_uri = build_storage_uri(req.bucket, &key);

    let instruction_data = encode_create_photo(&hash, &storage_uri, req.location, Some(req.timestamp))?;
    let (record_address, bump) =
        derive_photo_address(req.program_id, req.payer, &hash, req.timestamp.as_bytes())?;

    Ok(SubmissionPlan {
        hash,
        key,
        storage_uri,
        instruction_data,
        record_address,
        bump,
    })
}
