// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Content hashing.
//!
//! BLAKE3 names every stored photo: the object key embeds the hash of its
//! bytes, and the same hash is committed on the ledger. Verification is a
//! recomputation over the full byte sequence.

use crate::types::Hash32;

pub fn hash_bytes(bytes: &[u8]) -> Hash32 {
    Hash32::new(*blake3::hash(bytes).as_bytes())
}

/// Compares the hash of `bytes` with a claimed hex digest, ignoring the claim's case.
pub fn matches_claimed(bytes: &[u8], claimed_hex: &str) -> bool {
    hash_bytes(bytes).to_hex().eq_ignore_ascii_case(claimed_hex)
}

/// Incremental hasher for content that arrives in chunks.
#[derive(Default)]
pub struct ContentHasher {
    inner: blake3::Hasher,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self { inner: blake3::Hasher::new() }
    }

    pub fn update(&mut self, chunk: &[u8]) -> &mut Self {
        self.inner.update(chunk);
        self
    }

    pub fn finalize(&self) -> Hash32 {
        Hash32::new(*self.inner.finalize().as_bytes())
    }
}
