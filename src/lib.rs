// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![no_std]

//! photo-ledger-kernel: pure building blocks for reconciling stored photos
//! with their provenance records on the ledger.
//!
//! Wire codec, record address derivation, content hashing and the catalog
//! merge policy. No I/O and no clocks; the node crate supplies those.

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod config;
pub mod error;
pub mod types;
pub mod codec;
pub mod address;
pub mod content;
pub mod catalog;
pub mod submission;

#[cfg(test)]
pub mod tests;
