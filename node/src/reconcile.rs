// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Joins the storage listing with ledger entries and sidecars.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use photo_ledger_kernel::catalog::{find_ledger_match, group_by_device, reconcile_record};
use photo_ledger_kernel::types::{
    DeviceGroup, LedgerEntry, PhotoRecord, SidecarDocument, SidecarPayload, StorageObject,
};
use reqwest::Client;
use serde_json::Value;

use crate::errors::NodeError;
use crate::ledger::ScanCache;
use crate::storage::PhotoStorage;

pub struct Reconciler {
    storage: PhotoStorage,
    cache: Arc<ScanCache>,
    http: Client,
    concurrency: usize,
}

impl Reconciler {
    pub fn new(storage: PhotoStorage, cache: Arc<ScanCache>, http: Client, concurrency: usize) -> Self {
        Self {
            storage,
            cache,
            http,
            concurrency: concurrency.max(1),
        }
    }

    pub fn storage(&self) -> &PhotoStorage {
        &self.storage
    }

    /// One record per listed photo, in listing order.
    ///
    /// Only a listing failure is returned as an error. Sidecar and URL
    /// failures degrade the affected record; ledger outages degrade every
    /// record to storage-only data.
    pub async fn reconcile(&self) -> Result<Vec<PhotoRecord>, NodeError> {
        let (objects, entries) = tokio::join!(self.storage.list_photo_objects(), self.cache.get());
        let objects = objects?;

        let records: Vec<PhotoRecord> = stream::iter(objects)
            .map(|object| self.reconcile_object(object, &entries))
            .buffered(self.concurrency)
            .collect()
            .await;

        tracing::info!(
            "Reconciled {} objects against {} ledger entries",
            records.len(),
            entries.len()
        );
        Ok(records)
    }

    pub async fn reconcile_grouped(&self) -> Result<Vec<DeviceGroup>, NodeError> {
        let records = self.reconcile().await?;
        Ok(group_by_device(&records))
    }

    async fn reconcile_object(&self, object: StorageObject, entries: &[LedgerEntry]) -> PhotoRecord {
        let (url, sidecar) = tokio::join!(self.storage.access_url(&object.key), self.fetch_sidecar(&object.key));
        let url = url.unwrap_or_else(|e| {
            tracing::warn!("No access URL for {}: {}", object.key, e);
            String::new()
        });
        let ledger = find_ledger_match(entries, &object.hash_hex);
        reconcile_record(object, url, ledger, sidecar)
    }

    /// Any failure along the way means "no sidecar".
    async fn fetch_sidecar(&self, key: &str) -> Option<(SidecarDocument, String)> {
        let url = match self.storage.sidecar_url(key).await {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Could not presign sidecar for {}: {}", key, e);
                return None;
            }
        };

        let resp = match self.http.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                tracing::debug!("No sidecar for {} ({})", key, resp.status());
                return None;
            }
            Err(e) => {
                tracing::debug!("Sidecar fetch for {} failed: {}", key, e);
                return None;
            }
        };

        let body: Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("Sidecar for {} is not JSON: {}", key, e);
                return None;
            }
        };

        let doc = parse_sidecar(&body)?;
        metrics::counter!("photo_ledger_sidecars_found_total", 1);
        Some((doc, url))
    }
}

/// Reads `{ payload: { timestamp, location, owner }, signature }`.
/// Unknown fields are ignored; scalar values are stringified; anything that
/// is not an object is rejected.
pub fn parse_sidecar(value: &Value) -> Option<SidecarDocument> {
    let obj = value.as_object()?;
    let payload = match obj.get("payload") {
        Some(Value::Object(p)) => SidecarPayload {
            timestamp: p.get("timestamp").and_then(scalar_string),
            location: p.get("location").and_then(scalar_string),
            owner: p.get("owner").and_then(scalar_string),
        },
        Some(Value::Null) | None => SidecarPayload::default(),
        Some(_) => return None,
    };

    Some(SidecarDocument {
        payload,
        signature: obj.get("signature").and_then(scalar_string),
    })
}

fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
