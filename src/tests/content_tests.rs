// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::content::{hash_bytes, matches_claimed, ContentHasher};
use crate::error::ParseError;
use crate::types::Hash32;

#[test]
fn test_empty_input_hash() {
    assert_eq!(
        hash_bytes(b"").to_hex(),
        "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
    );
}

#[test]
fn test_claim_comparison_ignores_case() {
    let bytes = b"jpeg bytes";
    let hex = hash_bytes(bytes).to_hex();
    assert!(matches_claimed(bytes, &hex));
    assert!(matches_claimed(bytes, &hex.to_uppercase()));
    assert!(!matches_claimed(b"other bytes", &hex));
    assert!(!matches_claimed(bytes, "deadbeef"));
}

#[test]
fn test_incremental_hash_matches_one_shot() {
    let data = vec![42u8; 10_000];
    let mut hasher = ContentHasher::new();
    for chunk in data.chunks(333) {
        hasher.update(chunk);
    }
    assert_eq!(hasher.finalize(), hash_bytes(&data));
}

#[test]
fn test_hex_roundtrip_and_rejects() {
    let h = hash_bytes(b"abc");
    assert_eq!(Hash32::from_hex(&h.to_hex()).unwrap(), h);
    assert_eq!(Hash32::from_hex(&h.to_hex().to_uppercase()).unwrap(), h);
    assert!(Hash32::from_hex("abc").is_err());
    assert!(Hash32::from_hex(&"zz".repeat(32)).is_err());
    assert_eq!(format!("{}", h), h.to_hex());
}

#[test]
fn test_hex_length_error_counts_characters() {
    assert_eq!(
        Hash32::from_hex("abc"),
        Err(ParseError::WrongHexLength { expected: 64, found: 3 })
    );
    assert_eq!(
        Hash32::from_hex(&"a".repeat(65)),
        Err(ParseError::WrongHexLength { expected: 64, found: 65 })
    );
    assert_eq!(
        Hash32::from_slice(&[0u8; 31]),
        Err(ParseError::WrongLength { expected: 32, found: 31 })
    );
    assert_eq!(
        format!("{}", ParseError::WrongHexLength { expected: 64, found: 3 }),
        "expected 64 hex characters, found 3"
    );
}
