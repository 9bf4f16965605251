// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Integrity verification.
//!
//! Recomputes the content hash of served bytes and compares it against the
//! hash claimed by the object key. Keys are content-addressed, so a
//! definitive outcome never goes stale and is kept for the process lifetime.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use photo_ledger_kernel::content::ContentHasher;
use photo_ledger_kernel::types::{Hash32, PhotoRecord};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::errors::NodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStatus {
    Verified,
    Mismatch,
    /// The bytes could not be fetched. Says nothing about integrity.
    FetchFailed,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Mismatch => "mismatch",
            VerificationStatus::FetchFailed => "fetch-failed",
        }
    }

    pub fn is_definitive(&self) -> bool {
        !matches!(self, VerificationStatus::FetchFailed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub key: String,
    pub status: VerificationStatus,
}

pub struct IntegrityVerifier {
    http: Client,
    concurrency: usize,
    outcomes: RwLock<HashMap<String, VerificationStatus>>,
}

impl IntegrityVerifier {
    pub fn new(http: Client, concurrency: usize) -> Self {
        Self {
            http,
            concurrency: concurrency.max(1),
            outcomes: RwLock::new(HashMap::new()),
        }
    }

    pub async fn cached(&self, key: &str) -> Option<VerificationStatus> {
        self.outcomes.read().await.get(key).copied()
    }

    pub async fn verify(&self, key: &str, url: &str, claimed_hex: &str) -> VerificationResult {
        if let Some(status) = self.cached(key).await {
            return VerificationResult { key: key.to_string(), status };
        }

        let status = match self.fetch_and_hash(url).await {
            Ok(actual) if actual.to_hex() == claimed_hex.to_ascii_lowercase() => VerificationStatus::Verified,
            Ok(actual) => {
                tracing::warn!("Hash mismatch for {}: claimed {}, got {}", key, claimed_hex, actual);
                VerificationStatus::Mismatch
            }
            Err(e) => {
                tracing::warn!("Could not fetch {} for verification: {}", key, e);
                VerificationStatus::FetchFailed
            }
        };

        metrics::counter!("photo_ledger_verifications_total", 1, "status" => status.as_str());
        if status.is_definitive() {
            self.outcomes.write().await.insert(key.to_string(), status);
        }
        VerificationResult { key: key.to_string(), status }
    }

    /// Checks every record, at most `concurrency` at a time. Results follow input order.
    pub async fn verify_records(&self, records: &[PhotoRecord]) -> Vec<VerificationResult> {
        let work: Vec<(String, String, String)> = records
            .iter()
            .map(|r| (r.key.clone(), r.url.clone(), r.hash_hex.clone()))
            .collect();
        stream::iter(work)
            .map(|(key, url, claimed)| async move { self.verify(&key, &url, &claimed).await })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn fetch_and_hash(&self, url: &str) -> Result<Hash32, NodeError> {
        if url.is_empty() {
            return Err(NodeError::InvalidInput("no access URL".to_string()));
        }
        let mut resp = self.http.get(url).send().await?.error_for_status()?;
        let mut hasher = ContentHasher::new();
        while let Some(chunk) = resp.chunk().await? {
            hasher.update(&chunk);
        }
        Ok(hasher.finalize())
    }
}
