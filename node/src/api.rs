// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use photo_ledger_kernel::types::{DeviceGroup, LedgerEntry, PhotoRecord};
use serde::{Deserialize, Serialize};

use crate::verify::VerificationResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<PhotoRecord>,
    pub bucket: String,
    pub prefix: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupedListResponse {
    pub groups: Vec<DeviceGroup>,
    pub bucket: String,
    pub prefix: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TxIndexResponse {
    pub entries: Vec<LedgerEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub results: Vec<VerificationResult>,
}
