// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use sha2::{Digest, Sha256};

use crate::config::DISCRIMINATOR_LEN;

/// `sha256("global:create_photo_data")[..8]`, fixed at compile time.
/// Both the encoder and every decoder strategy compare against this one value.
pub const CREATE_PHOTO_DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] =
    [0x94, 0x1f, 0x49, 0xff, 0x1e, 0x0c, 0x2b, 0x20];

/// First eight bytes of SHA-256 over an operation identifier.
pub fn compute_discriminator(preimage: &[u8]) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(preimage);
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

pub(crate) fn has_discriminator(data: &[u8]) -> bool {
    data.len() >= DISCRIMINATOR_LEN && data[..DISCRIMINATOR_LEN] == CREATE_PHOTO_DISCRIMINATOR
}
