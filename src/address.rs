// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Deterministic record addresses.
//!
//! A record address is derived from the program id and a fixed seed list,
//! with no private key behind it. Candidate for bump `b`:
//!
//! ```text
//! sha256(seed_0 | seed_1 | ... | [b] | program_id | "ProgramDerivedAddress")
//! ```
//!
//! Bumps are tried from 255 down to 0; the first candidate that is not a
//! valid ed25519 point wins. No randomness, no I/O.

use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha256};

use crate::config::{MAX_SEEDS, MAX_SEED_LEN, PDA_MARKER, PHOTO_SEED};
use crate::error::DeriveError;
use crate::types::{Hash32, Pubkey};

/// True when the bytes decompress to a point on the ed25519 curve.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    VerifyingKey::from_bytes(bytes).is_ok()
}

fn check_seeds(seeds: &[&[u8]], reserved: usize) -> Result<(), DeriveError> {
    if seeds.len() + reserved > MAX_SEEDS {
        return Err(DeriveError::TooManySeeds(seeds.len() + reserved));
    }
    for (index, seed) in seeds.iter().enumerate() {
        if seed.len() > MAX_SEED_LEN {
            return Err(DeriveError::SeedTooLong { index, len: seed.len() });
        }
    }
    Ok(())
}

/// Hashes one candidate. Returns `None` when it lands on the curve.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<Option<Pubkey>, DeriveError> {
    check_seeds(seeds, 0)?;
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);

    let mut candidate = [0u8; 32];
    candidate.copy_from_slice(&hasher.finalize());
    if is_on_curve(&candidate) {
        return Ok(None);
    }
    Ok(Some(Pubkey::new(candidate)))
}

/// Finds the canonical (highest-bump) off-curve address for `seeds`.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), DeriveError> {
    check_seeds(seeds, 1)?;

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: [&[u8]; MAX_SEEDS] = [&[]; MAX_SEEDS];
        with_bump[..seeds.len()].copy_from_slice(seeds);
        with_bump[seeds.len()] = &bump_seed;
        if let Some(address) = create_program_address(&with_bump[..=seeds.len()], program_id)? {
            return Ok((address, bump));
        }
    }
    Err(DeriveError::NoViableBump)
}

/// Address of the photo record for `(payer, hash, timestamp)`.
/// Seeds, in order: `"photo"`, payer, hash, timestamp bytes.
pub fn derive_photo_address(
    program_id: &Pubkey,
    payer: &Pubkey,
    hash: &Hash32,
    timestamp: &[u8],
) -> Result<(Pubkey, u8), DeriveError> {
    find_program_address(
        &[PHOTO_SEED, payer.as_bytes(), hash.as_bytes(), timestamp],
        program_id,
    )
}
