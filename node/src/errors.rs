// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use photo_ledger_kernel::error::{CodecError, PlanError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Ledger scan unavailable: {0}")]
    ScanUnavailable(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Upload failed ({status}): {body}")]
    Upload { status: u16, body: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        let status = match &self {
            NodeError::Validation(_) | NodeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            NodeError::Rpc(_) | NodeError::ScanUnavailable(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<opendal::Error> for NodeError {
    fn from(e: opendal::Error) -> Self {
        NodeError::Storage(e.to_string())
    }
}

impl From<reqwest::Error> for NodeError {
    fn from(e: reqwest::Error) -> Self {
        NodeError::Network(e.to_string())
    }
}

impl From<CodecError> for NodeError {
    fn from(e: CodecError) -> Self {
        NodeError::Validation(e.to_string())
    }
}

impl From<PlanError> for NodeError {
    fn from(e: PlanError) -> Self {
        NodeError::Validation(e.to_string())
    }
}
