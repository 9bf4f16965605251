// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod hash;
pub mod pubkey;
pub mod entry;
pub mod record;

pub use hash::Hash32;
pub use pubkey::Pubkey;
pub use entry::{LedgerEntry, PhotoArgs};
pub use record::{DecodedSummary, DeviceGroup, PhotoRecord, SidecarDocument, SidecarPayload, StorageObject};
