// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;
use std::str::FromStr;

use photo_ledger_kernel::catalog::normalize_prefix;
use photo_ledger_kernel::config::DEFAULT_PROGRAM_ID;
use photo_ledger_kernel::types::Pubkey;

use crate::errors::NodeError;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Custom S3-compatible endpoint. `None` uses AWS.
    pub endpoint: Option<String>,
    /// Normalised: no leading slash, one trailing slash, or empty.
    pub prefix: String,
    /// When set, objects are served from `https://<cdn_domain>/<key>` instead of presigned URLs.
    pub cdn_domain: Option<String>,
    pub presign_ttl_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub rpc_url: String,
    pub program_id: Pubkey,
    pub commitment: String,
    /// Upper bound on signatures examined per scan.
    pub max_entries: usize,
    pub page_size: usize,
    /// Transactions fetched per round trip.
    pub batch_size: usize,
    pub cache_ttl_ms: u64,
    pub explorer_url: String,
    pub cluster: String,
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageConfig,
    pub ledger: LedgerConfig,
    /// Per-request fan-out for sidecar fetches and integrity checks.
    pub fetch_concurrency: usize,
    pub http_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: "photoverifier".to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            prefix: normalize_prefix("photos/"),
            cdn_domain: None,
            presign_ttl_secs: 60,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            program_id: Pubkey::from_str(DEFAULT_PROGRAM_ID).unwrap_or_default(),
            commitment: "confirmed".to_string(),
            max_entries: 300,
            page_size: 100,
            batch_size: 10,
            cache_ttl_ms: 5000,
            explorer_url: "https://solscan.io".to_string(),
            cluster: "devnet".to_string(),
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            storage: StorageConfig::default(),
            ledger: LedgerConfig::default(),
            fetch_concurrency: 16,
            http_timeout_secs: 15,
        }
    }
}

fn env_string(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|n| std::env::var(n).ok())
        .filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(names: &[&str], default: T) -> Result<T, NodeError> {
    match env_string(names) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| NodeError::InvalidInput(format!("{} has an unparseable value {:?}", names[0], raw))),
        None => Ok(default),
    }
}

impl NodeConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, NodeError> {
        let mut cfg = NodeConfig::default();

        cfg.bind_addr = env_parse(&["BIND_ADDR"], cfg.bind_addr)?;
        cfg.fetch_concurrency = env_parse(&["FETCH_CONCURRENCY"], cfg.fetch_concurrency)?.max(1);
        cfg.http_timeout_secs = env_parse(&["HTTP_TIMEOUT_SECS"], cfg.http_timeout_secs)?;

        let s = &mut cfg.storage;
        if let Some(bucket) = env_string(&["S3_BUCKET"]) {
            s.bucket = bucket;
        }
        if let Some(region) = env_string(&["S3_REGION"]) {
            s.region = region;
        }
        s.endpoint = env_string(&["S3_ENDPOINT"]);
        if let Some(prefix) = env_string(&["S3_PREFIX"]) {
            s.prefix = normalize_prefix(&prefix);
        }
        s.cdn_domain = env_string(&["S3_CDN_DOMAIN"]);

        let l = &mut cfg.ledger;
        if let Some(url) = env_string(&["RPC_URL"]) {
            l.rpc_url = url;
        }
        if let Some(id) = env_string(&["PROGRAM_ID"]) {
            l.program_id = Pubkey::from_str(id.trim())
                .map_err(|e| NodeError::InvalidInput(format!("PROGRAM_ID: {}", e)))?;
        }
        l.max_entries = env_parse(&["SIG_LIMIT", "LIMIT"], l.max_entries)?;
        l.cache_ttl_ms = env_parse(&["TX_CACHE_TTL_MS"], l.cache_ttl_ms)?;
        if let Some(url) = env_string(&["EXPLORER_URL"]) {
            l.explorer_url = url.trim_end_matches('/').to_string();
        }
        if let Some(cluster) = env_string(&["CLUSTER"]) {
            l.cluster = cluster;
        }

        Ok(cfg)
    }
}
