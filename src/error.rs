// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use core::fmt;

/// Raised by the write side of the codec. The read side never fails, it skips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A length-prefixed field exceeds its maximum size.
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::FieldTooLong { field, len, max } => {
                write!(f, "{} is {} bytes, maximum is {}", field, len, max)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// A single seed is longer than the ledger allows.
    SeedTooLong { index: usize, len: usize },
    /// More seeds than the ledger allows (bump included).
    TooManySeeds(usize),
    /// Every bump from 255 down to 0 landed on the curve.
    NoViableBump,
}

impl fmt::Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeriveError::SeedTooLong { index, len } => {
                write!(f, "seed {} is {} bytes, maximum is 32", index, len)
            }
            DeriveError::TooManySeeds(n) => write!(f, "{} seeds supplied, maximum is 16", n),
            DeriveError::NoViableBump => write!(f, "no off-curve address for any bump"),
        }
    }
}

/// Parsing failures for the fixed-width value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    InvalidHex,
    InvalidBase58,
    WrongLength { expected: usize, found: usize },
    /// Hex text of the wrong size, counted in characters.
    WrongHexLength { expected: usize, found: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidHex => f.write_str("invalid hex string"),
            ParseError::InvalidBase58 => f.write_str("invalid base58 string"),
            ParseError::WrongLength { expected, found } => {
                write!(f, "expected {} bytes, found {}", expected, found)
            }
            ParseError::WrongHexLength { expected, found } => {
                write!(f, "expected {} hex characters, found {}", expected, found)
            }
        }
    }
}

/// Failures while planning a new record submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    Codec(CodecError),
    Derive(DeriveError),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Codec(e) => write!(f, "validation failed: {}", e),
            PlanError::Derive(e) => write!(f, "address derivation failed: {}", e),
        }
    }
}

impl From<CodecError> for PlanError {
    fn from(e: CodecError) -> Self {
        PlanError::Codec(e)
    }
}

impl From<DeriveError> for PlanError {
    fn from(e: DeriveError) -> Self {
        PlanError::Derive(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}
#[cfg(feature = "std")]
impl std::error::Error for DeriveError {}
#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
#[cfg(feature = "std")]
impl std::error::Error for PlanError {}
