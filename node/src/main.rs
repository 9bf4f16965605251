// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;
use std::time::Duration;

use photo_ledger_node::clock::SystemClock;
use photo_ledger_node::config::NodeConfig;
use photo_ledger_node::errors::NodeError;
use photo_ledger_node::ledger::RpcClient;
use photo_ledger_node::server::{build_router, build_state};
use photo_ledger_node::storage::S3ObjectStore;
use photo_ledger_node::telemetry::init_telemetry;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), NodeError> {
    init_telemetry();

    let cfg = NodeConfig::from_env()?;
    tracing::info!("Initializing photo ledger node with config: {:?}", cfg);

    let store = Arc::new(S3ObjectStore::new(&cfg.storage)?);
    let rpc = Arc::new(RpcClient::new(
        cfg.ledger.rpc_url.clone(),
        cfg.ledger.commitment.clone(),
        Duration::from_secs(cfg.http_timeout_secs),
    )?);

    let state = build_state(&cfg, store, rpc, Arc::new(SystemClock))?;
    let app = build_router(state);

    let addr = cfg.bind_addr;
    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
