// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::NodeError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresignRequest<'a> {
    key: &'a str,
    content_type: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignResponse {
    #[serde(rename = "uploadURL")]
    pub upload_url: String,
    pub key: String,
}

/// Client for an external presign endpoint plus the follow-up PUT.
#[derive(Debug, Clone)]
pub struct PresignUploader {
    endpoint: String,
    http: Client,
}

impl PresignUploader {
    pub fn new(endpoint: impl Into<String>, http: Client) -> Self {
        Self { endpoint: endpoint.into(), http }
    }

    pub async fn presign(&self, key: &str, content_type: &str) -> Result<PresignResponse, NodeError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&PresignRequest { key, content_type })
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn put_bytes(&self, upload_url: &str, content_type: &str, bytes: Vec<u8>) -> Result<(), NodeError> {
        let resp = self
            .http
            .put(upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    /// Presigns `key` and PUTs the bytes to the returned URL.
    pub async fn upload(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> Result<PresignResponse, NodeError> {
        let presigned = self.presign(key, content_type).await?;
        self.put_bytes(&presigned.upload_url, content_type, bytes).await?;
        tracing::info!("Uploaded {}", presigned.key);
        Ok(presigned)
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, NodeError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(NodeError::Upload { status: status.as_u16(), body })
}
