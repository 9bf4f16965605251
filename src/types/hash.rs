// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-width content hash.

use alloc::string::String;
use core::fmt;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::config::HASH_LEN;
use crate::error::ParseError;

/// A 32-byte content hash. Renders as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash32(pub [u8; HASH_LEN]);

impl Hash32 {
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Accepts upper or lower case. Anything other than 64 hex characters is rejected.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        if s.len() != HASH_LEN * 2 {
            return Err(ParseError::WrongHexLength { expected: HASH_LEN * 2, found: s.len() });
        }
        let mut out = [0u8; HASH_LEN];
        hex::decode_to_slice(s, &mut out).map_err(|_| ParseError::InvalidHex)?;
        Ok(Self(out))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let arr: [u8; HASH_LEN] = bytes
            .try_into()
            .map_err(|_| ParseError::WrongLength { expected: HASH_LEN, found: bytes.len() })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash32({})", self)
    }
}

impl Serialize for Hash32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash32::from_hex(&s).map_err(de::Error::custom)
    }
}
