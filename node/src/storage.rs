// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Object storage access.
//!
//! The node never reads photo bytes itself; it lists keys and hands out
//! short-lived URLs that clients (and the verifier) fetch directly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use opendal::services::S3;
use opendal::Operator;
use photo_ledger_kernel::catalog::{is_photo_key, parse_object_key, sidecar_key};
use photo_ledger_kernel::types::StorageObject;

use crate::config::StorageConfig;
use crate::errors::NodeError;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Every object key under `prefix`, recursively. Order is backend-defined.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, NodeError>;

    /// A URL granting read access to `key` for `ttl`.
    async fn presign_read(&self, key: &str, ttl: Duration) -> Result<String, NodeError>;
}

/// S3 (or S3-compatible) bucket behind an opendal operator.
pub struct S3ObjectStore {
    op: Operator,
}

impl S3ObjectStore {
    pub fn new(cfg: &StorageConfig) -> Result<Self, NodeError> {
        let mut builder = S3::default()
            .bucket(&cfg.bucket)
            .region(&cfg.region)
            .root("/");
        if let Some(endpoint) = &cfg.endpoint {
            builder = builder.endpoint(endpoint);
        }
        let op = Operator::new(builder)?.finish();
        Ok(Self { op })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>, NodeError> {
        let path = if prefix.is_empty() { "/" } else { prefix };
        let entries = self.op.list_with(path).recursive(true).await?;
        Ok(entries
            .into_iter()
            .filter(|e| !e.metadata().is_dir())
            .map(|e| e.path().trim_start_matches('/').to_string())
            .collect())
    }

    async fn presign_read(&self, key: &str, ttl: Duration) -> Result<String, NodeError> {
        let req = self.op.presign_read(key, ttl).await?;
        Ok(req.uri().to_string())
    }
}

/// The photo catalog view of a bucket: key filtering and access URLs.
#[derive(Clone)]
pub struct PhotoStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    prefix: String,
    cdn_domain: Option<String>,
    presign_ttl: Duration,
}

impl PhotoStorage {
    pub fn new(store: Arc<dyn ObjectStore>, cfg: &StorageConfig) -> Self {
        Self {
            store,
            bucket: cfg.bucket.clone(),
            prefix: cfg.prefix.clone(),
            cdn_domain: cfg.cdn_domain.clone().filter(|d| !d.trim().is_empty()),
            presign_ttl: Duration::from_secs(cfg.presign_ttl_secs),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Photo objects under the prefix, sorted by key. Placeholders and non-image keys are dropped.
    pub async fn list_photo_objects(&self) -> Result<Vec<StorageObject>, NodeError> {
        let mut keys: Vec<String> = self
            .store
            .list(&self.prefix)
            .await?
            .into_iter()
            .filter(|k| is_photo_key(k))
            .collect();
        keys.sort();
        tracing::debug!("Listed {} photo objects under {:?}", keys.len(), self.prefix);
        Ok(keys.iter().map(|k| parse_object_key(k, &self.prefix)).collect())
    }

    pub async fn access_url(&self, key: &str) -> Result<String, NodeError> {
        match &self.cdn_domain {
            Some(domain) => Ok(cdn_url(domain, key)),
            None => self.store.presign_read(key, self.presign_ttl).await,
        }
    }

    /// Sidecars are always presigned, even behind a CDN.
    pub async fn sidecar_url(&self, key: &str) -> Result<String, NodeError> {
        self.store.presign_read(&sidecar_key(key), self.presign_ttl).await
    }
}

pub fn cdn_url(domain: &str, key: &str) -> String {
    format!(
        "https://{}/{}",
        domain.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}
