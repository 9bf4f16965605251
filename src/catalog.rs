// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Storage key conventions and the reconciliation merge policy.
//!
//! Photos live at `<prefix>/<deviceGroupId>/<hashHex>.<ext>`, with an optional
//! sidecar at the same path ending in `.json`. Everything here is pure; the
//! node crate does the listing and fetching.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::config::{DEFAULT_BASE_PREFIX, DEFAULT_PHOTO_EXTENSION, PHOTO_EXTENSIONS, SIDECAR_EXTENSION};
use crate::types::{DecodedSummary, DeviceGroup, LedgerEntry, PhotoRecord, SidecarDocument, StorageObject};

const UNKNOWN: &str = "unknown";

/// Strips surrounding slashes and leaves exactly one trailing slash (none when empty).
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// Position of the extension dot, if the final path segment has one.
fn extension_dot(key: &str) -> Option<usize> {
    let dot = key.rfind('.')?;
    match key.rfind('/') {
        Some(slash) if slash > dot => None,
        _ => Some(dot),
    }
}

pub fn extension(key: &str) -> Option<&str> {
    extension_dot(key).map(|dot| &key[dot + 1..])
}

/// Recognised image extension (case-insensitive) and not a directory placeholder.
pub fn is_photo_key(key: &str) -> bool {
    if key.ends_with('/') {
        return false;
    }
    match extension(key) {
        Some(ext) => PHOTO_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Splits a key into its device group and hash. Missing parts read as `"unknown"`.
pub fn parse_object_key(key: &str, prefix: &str) -> StorageObject {
    let rest = key.strip_prefix(prefix).unwrap_or(key);
    let (device, file) = rest.split_once('/').unwrap_or((rest, ""));
    let hash = file.split('.').next().unwrap_or("");

    StorageObject {
        key: key.to_string(),
        device_group_id: non_empty_or_unknown(device),
        hash_hex: non_empty_or_unknown(hash),
    }
}

fn non_empty_or_unknown(s: &str) -> String {
    if s.is_empty() {
        UNKNOWN.to_string()
    } else {
        s.to_string()
    }
}

/// `photos/dev/abc.jpg` -> `photos/dev/abc.json`
pub fn sidecar_key(key: &str) -> String {
    match extension_dot(key) {
        Some(dot) => format!("{}.{}", &key[..dot], SIDECAR_EXTENSION),
        None => format!("{}.{}", key, SIDECAR_EXTENSION),
    }
}

/// First ledger entry committing to `hash_hex`. Linear; catalogs are small.
pub fn find_ledger_match<'a>(entries: &'a [LedgerEntry], hash_hex: &str) -> Option<&'a LedgerEntry> {
    entries.iter().find(|e| e.hash_hex().eq_ignore_ascii_case(hash_hex))
}

/// Builds the served record for one object.
///
/// A ledger match owns timestamp, location, owner and signature outright.
/// Sidecar values are used only when no ledger entry matched. The sidecar URL
/// is kept whenever a sidecar was fetched.
pub fn reconcile_record(
    object: StorageObject,
    url: String,
    ledger: Option<&LedgerEntry>,
    sidecar: Option<(SidecarDocument, String)>,
) -> PhotoRecord {
    let (sidecar_doc, sidecar_url) = match sidecar {
        Some((doc, url)) => (Some(doc), Some(url)),
        None => (None, None),
    };

    let (timestamp, location, owner, signature) = match (ledger, sidecar_doc) {
        (Some(entry), _) => (
            entry.timestamp.clone(),
            Some(entry.location.clone()),
            Some(entry.payer.clone()),
            Some(entry.signature.clone()),
        ),
        (None, Some(doc)) => (
            doc.payload.timestamp,
            doc.payload.location,
            doc.payload.owner,
            doc.signature,
        ),
        (None, None) => (None, None, None, None),
    };

    PhotoRecord {
        key: object.key,
        url,
        device_group_id: object.device_group_id,
        hash_hex: object.hash_hex,
        timestamp,
        location,
        owner,
        signature,
        sidecar_url,
        tx: ledger.map(|e| e.source_url.clone()),
        decoded: ledger.map(|e| DecodedSummary {
            storage_uri: e.storage_uri.clone(),
            location_string: e.location.clone(),
            payer: e.payer.clone(),
            signature: e.signature.clone(),
            timestamp: e.timestamp.clone(),
        }),
    }
}

/// Groups records by device, groups in first-seen order, records in input order.
pub fn group_by_device(records: &[PhotoRecord]) -> Vec<DeviceGroup> {
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut groups: Vec<DeviceGroup> = Vec::new();

    for record in records {
        let slot = *index.entry(record.device_group_id.as_str()).or_insert_with(|| {
            groups.push(DeviceGroup {
                device_group_id: record.device_group_id.clone(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(record.clone());
    }
    groups
}

/// Key a new photo is uploaded under.
pub fn build_photo_key(
    device_group_id: &str,
    hash_hex: &str,
    extension: Option<&str>,
    base_prefix: Option<&str>,
) -> String {
    let ext = extension.unwrap_or(DEFAULT_PHOTO_EXTENSION);
    let base = base_prefix
        .unwrap_or(DEFAULT_BASE_PREFIX)
        .trim()
        .trim_matches('/');
    if base.is_empty() {
        format!("{}/{}.{}", device_group_id, hash_hex, ext)
    } else {
        format!("{}/{}/{}.{}", base, device_group_id, hash_hex, ext)
    }
}

pub fn build_storage_uri(bucket: &str, key: &str) -> String {
    format!("s3://{}/{}", bucket, key.trim_start_matches('/'))
}
