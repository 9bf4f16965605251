// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Length of a content hash and of a ledger address.
pub const HASH_LEN: usize = 32;

/// Length of the instruction discriminator prefix.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Preimage of the "create photo record" discriminator.
pub const CREATE_PHOTO_PREIMAGE: &[u8] = b"global:create_photo_data";

/// Maximum encoded size of the storage URI and location fields.
pub const MAX_STRING_FIELD_LEN: usize = 256;

/// Domain tag, first seed of every record address.
pub const PHOTO_SEED: &[u8] = b"photo";

/// Suffix mixed into every derived address hash.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Ledger limits on derived-address seeds.
pub const MAX_SEED_LEN: usize = 32;
pub const MAX_SEEDS: usize = 16;

/// Default deployment of the photo record program.
pub const DEFAULT_PROGRAM_ID: &str = "J8U2PEf8ZaXcG5Q7xPCob92qFA8H8LWj1j3xiuKA6QEt";

/// Extensions accepted as photos when listing storage.
pub const PHOTO_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

pub const SIDECAR_EXTENSION: &str = "json";
pub const DEFAULT_PHOTO_EXTENSION: &str = "jpg";
pub const DEFAULT_BASE_PREFIX: &str = "photos";
