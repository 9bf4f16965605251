// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::address::derive_photo_address;
use crate::codec::{decode_create_photo, DecodeOutcome};
use crate::config::DEFAULT_PROGRAM_ID;
use crate::content::hash_bytes;
use crate::error::{CodecError, PlanError};
use crate::submission::{plan_submission, SubmissionRequest};
use crate::types::Pubkey;
use std::string::String;

#[test]
fn test_plan_is_consistent() {
    let program: Pubkey = DEFAULT_PROGRAM_ID.parse().unwrap();
    let payer = Pubkey::new([5u8; 32]);
    let photo = b"\xff\xd8\xff fake jpeg";
    let req = SubmissionRequest {
        program_id: &program,
        payer: &payer,
        bucket: "photoverifier",
        base_prefix: None,
        device_group_id: "Seek1",
        extension: None,
        location: "1,2",
        timestamp: "2025-05-05T05:05:05Z",
    };

    let plan = plan_submission(&req, photo).unwrap();
    let hash = hash_bytes(photo);

    assert_eq!(plan.hash, hash);
    assert_eq!(plan.key, format!("photos/Seek1/{}.jpg", hash.to_hex()));
    assert_eq!(plan.storage_uri, format!("s3://photoverifier/{}", plan.key));

    match decode_create_photo(&plan.instruction_data) {
        DecodeOutcome::Decoded(args) => {
            assert_eq!(args.hash, hash);
            assert_eq!(args.storage_uri, plan.storage_uri);
            assert_eq!(args.location, "1,2");
            assert_eq!(args.timestamp.as_deref(), Some("2025-05-05T05:05:05Z"));
        }
        DecodeOutcome::Skip => panic!("plan produced undecodable instruction"),
    }

    let expected = derive_photo_address(&program, &payer, &hash, req.timestamp.as_bytes()).unwrap();
    assert_eq!((plan.record_address, plan.bump), expected);
}

#[test]
fn test_plan_rejects_oversized_location() {
    let program: Pubkey = DEFAULT_PROGRAM_ID.parse().unwrap();
    let payer = Pubkey::new([5u8; 32]);
    let location: String = "x".repeat(300);
    let req = SubmissionRequest {
        program_id: &program,
        payer: &payer,
        bucket: "b",
        base_prefix: None,
        device_group_id: "d",
        extension: None,
        location: &location,
        timestamp: "t",
    };

    assert_eq!(
        plan_submission(&req, b"img"),
        Err(PlanError::Codec(CodecError::FieldTooLong { field: "location", len: 300, max: 256 }))
    );
}
