// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger addresses.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::config::HASH_LEN;
use crate::error::ParseError;

/// A 32-byte ledger address, written in base58.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey(pub [u8; HASH_LEN]);

impl Pubkey {
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl FromStr for Pubkey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s).into_vec().map_err(|_| ParseError::InvalidBase58)?;
        let arr: [u8; HASH_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseError::WrongLength { expected: HASH_LEN, found: bytes.len() })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}
