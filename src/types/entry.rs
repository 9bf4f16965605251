// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use alloc::string::String;
use serde::{Deserialize, Serialize};

use super::hash::Hash32;

/// Arguments carried by one "create photo record" instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoArgs {
    pub hash: Hash32,
    pub storage_uri: String,
    pub location: String,
    /// Absent on records written before the timestamp field existed.
    pub timestamp: Option<String>,
}

/// A decoded instruction together with the transaction it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    #[serde(rename = "hashHex")]
    pub hash: Hash32,
    pub storage_uri: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub payer: String,
    pub signature: String,
    /// Explorer link for the transaction.
    #[serde(rename = "url")]
    pub source_url: String,
}

impl LedgerEntry {
    pub fn from_args(args: PhotoArgs, payer: String, signature: String, source_url: String) -> Self {
        Self {
            hash: args.hash,
            storage_uri: args.storage_uri,
            location: args.location,
            timestamp: args.timestamp,
            payer,
            signature,
            source_url,
        }
    }

    pub fn hash_hex(&self) -> String {
        self.hash.to_hex()
    }
}
