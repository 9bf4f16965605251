// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! JSON-RPC access to the ledger.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use photo_ledger_kernel::types::Pubkey;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::NodeError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    pub signature: String,
    #[serde(default)]
    pub slot: u64,
    #[serde(default)]
    pub block_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: usize,
    pub accounts: Vec<usize>,
    pub data: Vec<u8>,
}

/// The parts of a fetched transaction the scanner needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionView {
    /// Static keys followed by lookup-table writable then readonly keys.
    pub account_keys: Vec<String>,
    /// In message order.
    pub instructions: Vec<CompiledInstruction>,
}

impl TransactionView {
    pub fn account(&self, index: usize) -> Option<&str> {
        self.account_keys.get(index).map(String::as_str)
    }
}

#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Newest first. `before` excludes that signature and everything newer.
    async fn signatures_for_address(
        &self,
        address: &Pubkey,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureInfo>, NodeError>;

    /// `Ok(None)` when the ledger does not know the transaction.
    async fn transaction(&self, signature: &str) -> Result<Option<TransactionView>, NodeError>;
}

#[derive(Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct RawConfirmedTransaction {
    #[serde(default)]
    transaction: Option<RawTransaction>,
    #[serde(default)]
    meta: Option<RawMeta>,
}

#[derive(Deserialize)]
struct RawTransaction {
    message: RawMessage,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    #[serde(default)]
    account_keys: Vec<String>,
    #[serde(default)]
    instructions: Vec<RawInstruction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInstruction {
    program_id_index: usize,
    #[serde(default)]
    accounts: Vec<usize>,
    #[serde(default)]
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    #[serde(default)]
    loaded_addresses: Option<RawLoadedAddresses>,
}

#[derive(Deserialize, Default)]
struct RawLoadedAddresses {
    #[serde(default)]
    writable: Vec<String>,
    #[serde(default)]
    readonly: Vec<String>,
}

impl RawConfirmedTransaction {
    fn into_view(self, signature: &str) -> Option<TransactionView> {
        let message = self.transaction?.message;
        let mut account_keys = message.account_keys;
        if let Some(loaded) = self.meta.and_then(|m| m.loaded_addresses) {
            account_keys.extend(loaded.writable);
            account_keys.extend(loaded.readonly);
        }

        let instructions = message
            .instructions
            .into_iter()
            .map(|ix| {
                let data = bs58::decode(&ix.data).into_vec().unwrap_or_else(|e| {
                    tracing::warn!("Undecodable instruction data in {}: {}", signature, e);
                    Vec::new()
                });
                CompiledInstruction {
                    program_id_index: ix.program_id_index,
                    accounts: ix.accounts,
                    data,
                }
            })
            .collect();

        Some(TransactionView { account_keys, instructions })
    }
}

/// JSON-RPC 2.0 client over HTTP.
#[derive(Debug)]
pub struct RpcClient {
    url: String,
    commitment: String,
    client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: String, commitment: String, timeout: Duration) -> Result<Self, NodeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url,
            commitment,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<Option<T>, NodeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NodeError::Rpc(format!("{}: {}", method, e)))?;

        if !resp.status().is_success() {
            return Err(NodeError::Rpc(format!("{} returned {}", method, resp.status())));
        }

        let envelope: RpcEnvelope<T> = resp
            .json()
            .await
            .map_err(|e| NodeError::Rpc(format!("{}: malformed response: {}", method, e)))?;

        if let Some(err) = envelope.error {
            return Err(NodeError::Rpc(format!("{} failed ({}): {}", method, err.code, err.message)));
        }
        Ok(envelope.result)
    }
}

#[async_trait]
impl LedgerRpc for RpcClient {
    async fn signatures_for_address(
        &self,
        address: &Pubkey,
        limit: usize,
        before: Option<&str>,
    ) -> Result<Vec<SignatureInfo>, NodeError> {
        let mut opts = json!({ "limit": limit, "commitment": self.commitment });
        if let Some(before) = before {
            opts["before"] = json!(before);
        }
        let page: Option<Vec<SignatureInfo>> = self
            .call("getSignaturesForAddress", json!([address.to_base58(), opts]))
            .await?;
        Ok(page.unwrap_or_default())
    }

    async fn transaction(&self, signature: &str) -> Result<Option<TransactionView>, NodeError> {
        let opts = json!({
            "encoding": "json",
            "commitment": self.commitment,
            "maxSupportedTransactionVersion": 0,
        });
        let raw: Option<RawConfirmedTransaction> =
            self.call("getTransaction", json!([signature, opts])).await?;
        Ok(raw.and_then(|r| r.into_view(signature)))
    }
}
