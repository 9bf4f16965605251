// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use photo_ledger_kernel::types::LedgerEntry;
use tokio::sync::{Mutex, RwLock};

use crate::clock::Clock;
use crate::ledger::scanner::EntrySource;

#[derive(Debug, Clone)]
pub struct ScanCacheEntry {
    pub captured_at_millis: u64,
    pub entries: Arc<Vec<LedgerEntry>>,
}

/// Running counts of how `get` was answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub refreshes: u64,
    pub refresh_failures: u64,
}

/// Time-bounded memo of the last successful scan.
///
/// Concurrent callers that find the slot stale queue on `refresh`; the first
/// one rescans and the rest pick up its result on the re-check. Failed scans
/// are served as an empty set and leave the slot untouched.
pub struct ScanCache {
    source: Arc<dyn EntrySource>,
    clock: Arc<dyn Clock>,
    ttl_millis: u64,
    slot: RwLock<Option<ScanCacheEntry>>,
    refresh: Mutex<()>,
    hits: AtomicU64,
    refreshes: AtomicU64,
    refresh_failures: AtomicU64,
}

impl ScanCache {
    pub fn new(source: Arc<dyn EntrySource>, clock: Arc<dyn Clock>, ttl_millis: u64) -> Self {
        Self {
            source,
            clock,
            ttl_millis,
            slot: RwLock::new(None),
            refresh: Mutex::new(()),
            hits: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
            refresh_failures: AtomicU64::new(0),
        }
    }

    pub fn ttl_millis(&self) -> u64 {
        self.ttl_millis
    }

    async fn fresh(&self) -> Option<Arc<Vec<LedgerEntry>>> {
        let now = self.clock.now_millis();
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|e| now.saturating_sub(e.captured_at_millis) < self.ttl_millis)
            .map(|e| e.entries.clone())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
            refresh_failures: self.refresh_failures.load(Ordering::Relaxed),
        }
    }

    fn record_hit(&self, entries: Arc<Vec<LedgerEntry>>) -> Arc<Vec<LedgerEntry>> {
        self.hits.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("photo_ledger_cache_hits_total", 1);
        entries
    }

    pub async fn snapshot(&self) -> Option<ScanCacheEntry> {
        self.slot.read().await.clone()
    }

    pub async fn get(&self) -> Arc<Vec<LedgerEntry>> {
        if let Some(entries) = self.fresh().await {
            return self.record_hit(entries);
        }

        let _guard = self.refresh.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(entries) = self.fresh().await {
            return self.record_hit(entries);
        }

        self.refreshes.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("photo_ledger_cache_refreshes_total", 1);
        match self.source.load().await {
            Ok(entries) => {
                let entries = Arc::new(entries);
                *self.slot.write().await = Some(ScanCacheEntry {
                    captured_at_millis: self.clock.now_millis(),
                    entries: entries.clone(),
                });
                tracing::debug!("Ledger cache refreshed with {} entries", entries.len());
                entries
            }
            Err(e) => {
                self.refresh_failures.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("photo_ledger_cache_refresh_failures_total", 1);
                tracing::warn!("Ledger scan failed, serving empty entry set: {}", e);
                Arc::new(Vec::new())
            }
        }
    }

    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}
