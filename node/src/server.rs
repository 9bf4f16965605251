// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, routing::get, Json, Router};
use photo_ledger_kernel::catalog::group_by_device;
use reqwest::Client;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::*;
use crate::clock::Clock;
use crate::config::NodeConfig;
use crate::errors::NodeError;
use crate::ledger::{LedgerRpc, LedgerScanner, ScanCache, ScanSettings};
use crate::reconcile::Reconciler;
use crate::storage::{ObjectStore, PhotoStorage};
use crate::verify::IntegrityVerifier;

#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<Reconciler>,
    pub cache: Arc<ScanCache>,
    pub verifier: Arc<IntegrityVerifier>,
}

/// Wires scanner, cache, reconciler and verifier over the given backends.
pub fn build_state(
    cfg: &NodeConfig,
    store: Arc<dyn ObjectStore>,
    rpc: Arc<dyn LedgerRpc>,
    clock: Arc<dyn Clock>,
) -> Result<AppState, NodeError> {
    let http = Client::builder()
        .timeout(Duration::from_secs(cfg.http_timeout_secs))
        .build()?;

    let scanner = Arc::new(LedgerScanner::new(rpc, ScanSettings::from(&cfg.ledger)));
    let cache = Arc::new(ScanCache::new(scanner, clock, cfg.ledger.cache_ttl_ms));
    let storage = PhotoStorage::new(store, &cfg.storage);

    Ok(AppState {
        reconciler: Arc::new(Reconciler::new(storage, cache.clone(), http.clone(), cfg.fetch_concurrency)),
        cache,
        verifier: Arc::new(IntegrityVerifier::new(http, cfg.fetch_concurrency)),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/list", get(list))
        .route("/list/grouped", get(list_grouped))
        .route("/tx-index", get(tx_index))
        .route("/verify", get(verify))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn list(State(state): State<AppState>) -> Result<Json<ListResponse>, NodeError> {
    let items = state.reconciler.reconcile().await?;
    let storage = state.reconciler.storage();
    Ok(Json(ListResponse {
        items,
        bucket: storage.bucket().to_string(),
        prefix: storage.prefix().to_string(),
    }))
}

async fn list_grouped(State(state): State<AppState>) -> Result<Json<GroupedListResponse>, NodeError> {
    let items = state.reconciler.reconcile().await?;
    let storage = state.reconciler.storage();
    Ok(Json(GroupedListResponse {
        groups: group_by_device(&items),
        bucket: storage.bucket().to_string(),
        prefix: storage.prefix().to_string(),
    }))
}

async fn tx_index(State(state): State<AppState>) -> Json<TxIndexResponse> {
    let entries = state.cache.get().await;
    Json(TxIndexResponse {
        entries: entries.as_ref().clone(),
    })
}

async fn verify(State(state): State<AppState>) -> Result<Json<VerifyResponse>, NodeError> {
    let records = state.reconciler.reconcile().await?;
    let results = state.verifier.verify_records(&records).await;
    Ok(Json(VerifyResponse { results }))
}

async fn metrics_handler() -> String {
    crate::telemetry::render_metrics()
}
