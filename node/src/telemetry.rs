// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Process-wide logging and Prometheus metrics.

use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "photo_ledger_node=debug,tower_http=debug";

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Logs, then the metrics recorder. Call once from `main`.
pub fn init_telemetry() {
    init_tracing();
    install_recorder();
    describe_metrics();
    metrics::gauge!("photo_ledger_node_up", 1.0);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn install_recorder() {
    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("Failed to install Prometheus recorder: {}", e);
            return;
        }
    };
    if PROM_HANDLE.set(handle).is_err() {
        tracing::warn!("Prometheus recorder installed twice; keeping the first handle");
    }
}

fn describe_metrics() {
    // scanner
    metrics::describe_counter!("photo_ledger_scans_total", "Ledger scans that reached the RPC");
    metrics::describe_histogram!("photo_ledger_scan_duration_seconds", "Wall time of one ledger scan");
    metrics::describe_counter!("photo_ledger_entries_decoded_total", "Photo instructions decoded from the ledger");
    metrics::describe_counter!("photo_ledger_decode_skips_total", "Program instructions that did not decode");

    // scan cache
    metrics::describe_counter!("photo_ledger_cache_hits_total", "Entry reads answered from a fresh cached scan");
    metrics::describe_counter!("photo_ledger_cache_refreshes_total", "Entry reads that triggered a rescan");
    metrics::describe_counter!("photo_ledger_cache_refresh_failures_total", "Rescans that failed and were served empty");

    metrics::describe_counter!("photo_ledger_sidecars_found_total", "Sidecar documents fetched during reconciliation");
    metrics::describe_counter!("photo_ledger_verifications_total", "Integrity checks by outcome");
}

/// Prometheus text exposition, or a placeholder comment when no recorder is installed.
pub fn render_metrics() -> String {
    PROM_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_else(|| "# metrics not initialized".to_string())
}
