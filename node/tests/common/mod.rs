#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use photo_ledger_kernel::codec::encode_create_photo;
use photo_ledger_kernel::config::DEFAULT_PROGRAM_ID;
use photo_ledger_kernel::types::{Hash32, LedgerEntry, Pubkey};
use photo_ledger_node::errors::NodeError;
use photo_ledger_node::ledger::{CompiledInstruction, EntrySource, LedgerRpc, SignatureInfo, TransactionView};
use photo_ledger_node::storage::ObjectStore;
use tokio::net::TcpListener;

pub const PAYER: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
pub const OTHER_PROGRAM: &str = "11111111111111111111111111111111";

pub fn program_id() -> Pubkey {
    Pubkey::from_str(DEFAULT_PROGRAM_ID).unwrap()
}

/// `aa11` + 58 zeros + `bb`
pub fn seek_hash_hex() -> String {
    format!("aa11{}bb", "0".repeat(58))
}

pub fn hash_from_byte(b: u8) -> Hash32 {
    Hash32::new([b; 32])
}

pub fn photo_instruction_data(hash: &Hash32, location: &str) -> Vec<u8> {
    encode_create_photo(
        hash,
        &format!("s3://photoverifier/photos/Seek1/{}.jpg", hash),
        location,
        Some("2025-03-01T10:00:00Z"),
    )
    .unwrap()
}

/// A transaction whose single instruction targets the photo program.
pub fn photo_tx(hash: &Hash32, location: &str) -> TransactionView {
    TransactionView {
        account_keys: vec![PAYER.to_string(), "Rec111".to_string(), program_id().to_base58()],
        instructions: vec![CompiledInstruction {
            program_id_index: 2,
            accounts: vec![0, 1],
            data: photo_instruction_data(hash, location),
        }],
    }
}

pub fn ledger_entry(hash: &Hash32, location: &str, signature: &str) -> LedgerEntry {
    LedgerEntry {
        hash: *hash,
        storage_uri: format!("s3://photoverifier/photos/Seek1/{}.jpg", hash),
        location: location.to_string(),
        timestamp: Some("2025-03-01T10:00:00Z".to_string()),
        payer: PAYER.to_string(),
        signature: signature.to_string(),
        source_url: format!("https://solscan.io/tx/{}?cluster=devnet", signature),
    }
}

/// How the fake answers a `before` cursor.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Page starts right after the cursor.
    #[default]
    Exclusive,
    /// Page repeats the cursor signature, then continues.
    Inclusive,
    /// Cursor is ignored; every call returns the newest page.
    Ignored,
}

/// In-memory ledger. History is stored newest first.
#[derive(Default)]
pub struct FakeLedger {
    history: Vec<(String, Option<TransactionView>)>,
    failing_txs: HashSet<String>,
    /// Zero-based page index whose listing call errors.
    failing_page: Option<usize>,
    cursor_mode: CursorMode,
    pub page_calls: AtomicUsize,
    pub tx_calls: AtomicUsize,
    pub requested_limits: Mutex<Vec<usize>>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, signature: &str, tx: Option<TransactionView>) -> Self {
        self.history.push((signature.to_string(), tx));
        self
    }

    pub fn fail_tx(mut self, signature: &str) -> Self {
        self.failing_txs.insert(signature.to_string());
        self
    }

    pub fn fail_page(mut self, page: usize) -> Self {
        self.failing_page = Some(page);
        self
    }

    pub fn cursor_mode(mut self, mode: CursorMode) -> Self {
        self.cursor_mode = mode;
        self
    }
}

#[async_trait]
impl LedgerRpc for FakeLedger {
    async fn signatures_for_address(
        &self,
        _address: &Pubkey,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureInfo>, NodeError> {
        let call = self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_limits.lock().unwrap().push(limit);
        if self.failing_page == Some(call) {
            return Err(NodeError::Rpc("listing unavailable".to_string()));
        }

        let start = match (before, self.cursor_mode) {
            (None, _) | (Some(_), CursorMode::Ignored) => 0,
            (Some(b), mode) => match self.history.iter().position(|(s, _)| s == b) {
                Some(i) if mode == CursorMode::Inclusive => i,
                Some(i) => i + 1,
                None => return Ok(Vec::new()),
            },
        };

        Ok(self
            .history
            .iter()
            .skip(start)
            .take(limit)
            .map(|(s, _)| SignatureInfo {
                signature: s.clone(),
                slot: 0,
                block_time: None,
            })
            .collect())
    }

    async fn transaction(&self, signature: &str) -> Result<Option<TransactionView>, NodeError> {
        self.tx_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_txs.contains(signature) {
            return Err(NodeError::Rpc(format!("timeout fetching {}", signature)));
        }
        Ok(self
            .history
            .iter()
            .find(|(s, _)| s == signature)
            .and_then(|(_, tx)| tx.clone()))
    }
}

/// Entry source that counts loads and can be told to fail or stall.
pub struct CountingSource {
    entries: Vec<LedgerEntry>,
    pub loads: AtomicUsize,
    failing: std::sync::atomic::AtomicBool,
    delay: Duration,
}

impl CountingSource {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self {
            entries,
            loads: AtomicUsize::new(0),
            failing: std::sync::atomic::AtomicBool::new(false),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntrySource for CountingSource {
    async fn load(&self) -> Result<Vec<LedgerEntry>, NodeError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(NodeError::ScanUnavailable("rpc down".to_string()));
        }
        Ok(self.entries.clone())
    }
}

pub type Objects = Arc<Mutex<HashMap<String, Vec<u8>>>>;

async fn serve_object(State(objects): State<Objects>, Path(key): Path<String>) -> Result<Vec<u8>, StatusCode> {
    objects.lock().unwrap().get(&key).cloned().ok_or(StatusCode::NOT_FOUND)
}

/// Serves `objects` at `http://<addr>/<key>`, standing in for presigned bucket reads.
pub async fn spawn_object_server(objects: Objects) -> SocketAddr {
    let app = Router::new()
        .route("/*key", get(serve_object))
        .with_state(objects);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Object store whose presigned URLs point at a local object server.
pub struct FakeObjectStore {
    objects: Objects,
    base_url: String,
    pub fail_listing: bool,
    pub presigns: AtomicUsize,
}

impl FakeObjectStore {
    pub fn new(objects: Objects, addr: SocketAddr) -> Self {
        Self {
            objects,
            base_url: format!("http://{}", addr),
            fail_listing: false,
            presigns: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>, NodeError> {
        if self.fail_listing {
            return Err(NodeError::Storage("AccessDenied".to_string()));
        }
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn presign_read(&self, key: &str, _ttl: Duration) -> Result<String, NodeError> {
        self.presigns.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}/{}", self.base_url, key))
    }
}

pub fn new_objects() -> Objects {
    Arc::new(Mutex::new(HashMap::new()))
}
