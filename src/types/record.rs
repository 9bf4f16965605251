// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A storage object, described purely by its key.
/// Keys follow `<prefix>/<deviceGroupId>/<hashHex>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    pub key: String,
    pub device_group_id: String,
    pub hash_hex: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SidecarPayload {
    pub timestamp: Option<String>,
    pub location: Option<String>,
    pub owner: Option<String>,
}

/// Optional metadata stored next to a photo as `<key-without-ext>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SidecarDocument {
    pub payload: SidecarPayload,
    pub signature: Option<String>,
}

/// The ledger fields that backed a record, echoed for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedSummary {
    pub storage_uri: String,
    pub location_string: String,
    pub payer: String,
    pub signature: String,
    pub timestamp: Option<String>,
}

/// One reconciled photo as served by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub key: String,
    pub url: String,
    pub device_group_id: String,
    pub hash_hex: String,
    pub timestamp: Option<String>,
    pub location: Option<String>,
    pub owner: Option<String>,
    pub signature: Option<String>,
    pub sidecar_url: Option<String>,
    /// Transaction reference, present only when a ledger entry matched.
    pub tx: Option<String>,
    pub decoded: Option<DecodedSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroup {
    pub device_group_id: String,
    pub items: Vec<PhotoRecord>,
}
