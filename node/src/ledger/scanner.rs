// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger scanner.
//!
//! Walks the program's signature history newest-first, fetches transactions
//! in fixed-size batches and decodes the first photo instruction of each.
//! Per-signature failures are logged and skipped; only a failure to list
//! any signatures at all makes the scan unavailable.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::future::join_all;
use photo_ledger_kernel::codec::DecoderChain;
use photo_ledger_kernel::types::{LedgerEntry, Pubkey};

use crate::config::LedgerConfig;
use crate::errors::NodeError;
use crate::ledger::rpc::{LedgerRpc, TransactionView};

/// Anything that can produce the current ledger entry set.
#[async_trait]
pub trait EntrySource: Send + Sync {
    async fn load(&self) -> Result<Vec<LedgerEntry>, NodeError>;
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub program_id: Pubkey,
    pub max_entries: usize,
    pub page_size: usize,
    pub batch_size: usize,
    pub explorer_url: String,
    pub cluster: String,
}

impl From<&LedgerConfig> for ScanSettings {
    fn from(cfg: &LedgerConfig) -> Self {
        Self {
            program_id: cfg.program_id,
            max_entries: cfg.max_entries,
            page_size: cfg.page_size.max(1),
            batch_size: cfg.batch_size.max(1),
            explorer_url: cfg.explorer_url.clone(),
            cluster: cfg.cluster.clone(),
        }
    }
}

pub struct LedgerScanner {
    rpc: Arc<dyn LedgerRpc>,
    settings: ScanSettings,
    program: String,
    decoders: DecoderChain,
}

impl LedgerScanner {
    pub fn new(rpc: Arc<dyn LedgerRpc>, settings: ScanSettings) -> Self {
        Self::with_decoders(rpc, settings, DecoderChain::default())
    }

    pub fn with_decoders(rpc: Arc<dyn LedgerRpc>, settings: ScanSettings, decoders: DecoderChain) -> Self {
        let program = settings.program_id.to_base58();
        Self { rpc, settings, program, decoders }
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    pub fn tx_url(&self, signature: &str) -> String {
        format!(
            "{}/tx/{}?cluster={}",
            self.settings.explorer_url.trim_end_matches('/'),
            signature,
            self.settings.cluster
        )
    }

    /// Pages newest-first until `max_entries` signatures are gathered or history runs out.
    /// Each page's cursor is the last signature of the previous page. A page
    /// that neither moves the cursor nor adds a new signature ends paging.
    pub async fn collect_signatures(&self) -> Result<Vec<String>, NodeError> {
        let mut seen = HashSet::new();
        let mut out: Vec<String> = Vec::new();
        let mut before: Option<String> = None;

        while out.len() < self.settings.max_entries {
            let need = self.settings.page_size.min(self.settings.max_entries - out.len());
            let page = match self
                .rpc
                .signatures_for_address(&self.settings.program_id, need, before.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) if before.is_none() => return Err(NodeError::ScanUnavailable(e.to_string())),
                Err(e) => {
                    tracing::warn!("Signature paging stopped after {} signatures: {}", out.len(), e);
                    break;
                }
            };

            let Some(last) = page.last().map(|info| info.signature.clone()) else { break };
            if before.as_deref() == Some(last.as_str()) {
                tracing::warn!("Signature cursor did not advance past {}, stopping", last);
                break;
            }
            before = Some(last);

            let gathered = out.len();
            for info in page {
                if out.len() >= self.settings.max_entries {
                    break;
                }
                if seen.insert(info.signature.clone()) {
                    out.push(info.signature);
                }
            }
            if out.len() == gathered {
                tracing::warn!("Signature page added nothing new after {} signatures, stopping", gathered);
                break;
            }
        }

        tracing::debug!("Collected {} signatures for {}", out.len(), self.program);
        Ok(out)
    }

    /// Decodes the first instruction addressed to the program. Later matches in
    /// the same transaction are not indexed.
    pub fn extract_entry(&self, signature: &str, tx: &TransactionView) -> Option<LedgerEntry> {
        let ix = tx
            .instructions
            .iter()
            .find(|ix| tx.account(ix.program_id_index) == Some(self.program.as_str()))?;

        let Some(args) = self.decoders.decode(&ix.data).into_option() else {
            tracing::debug!("Skipping undecodable program instruction in {}", signature);
            metrics::counter!("photo_ledger_decode_skips_total", 1);
            return None;
        };

        let payer_index = ix.accounts.first().copied().unwrap_or(0);
        let payer = tx.account(payer_index).unwrap_or_default().to_string();

        Some(LedgerEntry::from_args(
            args,
            payer,
            signature.to_string(),
            self.tx_url(signature),
        ))
    }

    /// Full scan. Output is in discovery order, newest signature first.
    pub async fn scan(&self) -> Result<Vec<LedgerEntry>, NodeError> {
        let started = Instant::now();
        metrics::counter!("photo_ledger_scans_total", 1);

        let signatures = self.collect_signatures().await?;
        let mut entries = Vec::new();
        let mut indexed = HashSet::new();

        for batch in signatures.chunks(self.settings.batch_size) {
            let fetched = join_all(batch.iter().map(|sig| self.rpc.transaction(sig))).await;

            for (sig, result) in batch.iter().zip(fetched) {
                let tx = match result {
                    Ok(Some(tx)) => tx,
                    Ok(None) => {
                        tracing::debug!("Transaction {} not found, skipping", sig);
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!("getTransaction failed for {}: {}", sig, e);
                        continue;
                    }
                };

                if let Some(entry) = self.extract_entry(sig, &tx) {
                    if indexed.insert(entry.signature.clone()) {
                        entries.push(entry);
                    }
                }
            }
        }

        metrics::counter!("photo_ledger_entries_decoded_total", entries.len() as u64);
        metrics::histogram!("photo_ledger_scan_duration_seconds", started.elapsed().as_secs_f64());
        tracing::info!(
            "Scanned {} signatures, decoded {} entries in {:?}",
            signatures.len(),
            entries.len(),
            started.elapsed()
        );
        Ok(entries)
    }
}

#[async_trait]
impl EntrySource for LedgerScanner {
    async fn load(&self) -> Result<Vec<LedgerEntry>, NodeError> {
        self.scan().await
    }
}
