// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod rpc;
pub mod scanner;
pub mod cache;

pub use rpc::{CompiledInstruction, LedgerRpc, RpcClient, SignatureInfo, TransactionView};
pub use scanner::{EntrySource, LedgerScanner, ScanSettings};
pub use cache::{CacheStats, ScanCache, ScanCacheEntry};
