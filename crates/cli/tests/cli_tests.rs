use std::fs;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{post, put};
use axum::{Json, Router};
use photo_ledger_cli::commands::prepare::{plan_file, PlanSummary, PrepareArgs};
use photo_ledger_cli::commands::{decode, derive, encode, hash, prepare, upload};
use photo_ledger_cli::input::{content_type_for, parse_instruction_data, photo_extension};
use photo_ledger_kernel::config::DEFAULT_PROGRAM_ID;
use photo_ledger_kernel::content::hash_bytes;
use serde_json::{json, Value};
use tempfile::tempdir;

const PAYER: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

fn hash_hex() -> String {
    format!("aa11{}bb", "0".repeat(58))
}

fn args() -> PrepareArgs {
    PrepareArgs {
        program_id: DEFAULT_PROGRAM_ID.to_string(),
        payer: PAYER.to_string(),
        bucket: "photoverifier".to_string(),
        base_prefix: None,
        device_group_id: "Seek1".to_string(),
        extension: None,
        location: "48.85,2.35".to_string(),
        timestamp: Some("2025-03-01T10:00:00Z".to_string()),
    }
}

#[test]
fn test_encode_then_decode_from_hex_and_base58() {
    let data = encode::encode(&hash_hex(), "s3://b/k.jpg", "1,2", Some("2025")).unwrap();

    let from_hex = parse_instruction_data(&hex::encode(&data)).unwrap();
    let from_b58 = parse_instruction_data(&bs58::encode(&data).into_string()).unwrap();
    assert_eq!(from_hex, data);
    assert_eq!(from_b58, data);

    let (decoder, args) = decode::decode(&data).unwrap();
    assert_eq!(decoder, "schema");
    assert_eq!(args.hash.to_hex(), hash_hex());
    assert_eq!(args.storage_uri, "s3://b/k.jpg");
    assert_eq!(args.timestamp.as_deref(), Some("2025"));

    assert!(encode::run(&hash_hex(), "s3://b/k.jpg", "1,2", None, true).is_ok());
    assert!(decode::run(&hex::encode(&data)).is_ok());
}

#[test]
fn test_encode_rejects_long_location() {
    let long = "x".repeat(257);
    assert!(encode::encode(&hash_hex(), "s3://b/k.jpg", &long, None).is_err());
    assert!(encode::encode("not-hex", "s3://b/k.jpg", "1,2", None).is_err());
}

#[test]
fn test_decode_skip_is_not_an_error() {
    assert!(decode::decode(&[0u8; 12]).is_none());
    assert!(decode::run("000000000000000000000000").is_ok());
}

#[test]
fn test_derive_is_deterministic() {
    let a = derive::derive(DEFAULT_PROGRAM_ID, PAYER, &hash_hex(), "2025-03-01T10:00:00Z").unwrap();
    let b = derive::derive(DEFAULT_PROGRAM_ID, PAYER, &hash_hex(), "2025-03-01T10:00:00Z").unwrap();
    assert_eq!(a, b);
    assert!(derive::derive(DEFAULT_PROGRAM_ID, "0OIl", &hash_hex(), "t").is_err());
}

#[test]
fn test_hash_file_and_claim() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.jpg");
    fs::write(&path, b"photo bytes").unwrap();

    let h = hash::hash_file(&path).unwrap();
    assert_eq!(h, hash_bytes(b"photo bytes"));

    assert!(hash::run(&path, Some(&h.to_hex().to_uppercase())).is_ok());
    assert!(hash::run(&path, Some(&hash_hex())).is_err());
    assert!(hash::run(&dir.path().join("missing.jpg"), None).is_err());
}

#[test]
fn test_prepare_plan_uses_file_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.PNG");
    fs::write(&path, b"png bytes").unwrap();

    let summary = plan_file(&path, &args()).unwrap();
    let h = hash_bytes(b"png bytes").to_hex();
    assert_eq!(summary.hash_hex, h);
    assert_eq!(summary.key, format!("photos/Seek1/{}.png", h));
    assert_eq!(summary.storage_uri, format!("s3://photoverifier/photos/Seek1/{}.png", h));
    assert_eq!(summary.timestamp, "2025-03-01T10:00:00Z");

    let data = bs58::decode(&summary.instruction_data_base58).into_vec().unwrap();
    let (_, decoded) = decode::decode(&data).unwrap();
    assert_eq!(decoded.storage_uri, summary.storage_uri);

    let (address, bump) = derive::derive(DEFAULT_PROGRAM_ID, PAYER, &h, "2025-03-01T10:00:00Z").unwrap();
    assert_eq!(summary.record_address, address.to_base58());
    assert_eq!(summary.bump, bump);
}

#[test]
fn test_prepare_writes_plan_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.jpg");
    let out = dir.path().join("plan.json");
    fs::write(&path, b"jpeg bytes").unwrap();

    prepare::run(&path, &args(), Some(out.clone())).unwrap();
    let written: PlanSummary = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(written, plan_file(&path, &args()).unwrap());
}

#[test]
fn test_prepare_rejects_oversized_location() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.jpg");
    fs::write(&path, b"jpeg bytes").unwrap();

    let mut a = args();
    a.location = "y".repeat(300);
    assert!(plan_file(&path, &a).is_err());
}

#[test]
fn test_extension_helpers() {
    assert_eq!(photo_extension(std::path::Path::new("a/b.JPG")).as_deref(), Some("jpg"));
    assert_eq!(photo_extension(std::path::Path::new("a/b.txt")), None);
    assert_eq!(content_type_for("jpeg"), "image/jpeg");
    assert_eq!(content_type_for("webp"), "image/webp");
    assert_eq!(content_type_for("bin"), "application/octet-stream");
}

#[derive(Default)]
struct Stored {
    key: Option<String>,
    body: Vec<u8>,
}

type Shared = (std::net::SocketAddr, Arc<Mutex<Stored>>);

async fn presign(State((addr, stored)): State<Shared>, Json(req): Json<Value>) -> Json<Value> {
    let key = req["key"].as_str().unwrap_or_default().to_string();
    stored.lock().unwrap().key = Some(key.clone());
    Json(json!({ "uploadURL": format!("http://{}/put/{}", addr, key), "key": key }))
}

async fn accept(State((_, stored)): State<Shared>, body: Bytes) -> &'static str {
    stored.lock().unwrap().body = body.to_vec();
    ""
}

#[tokio::test]
async fn test_upload_stores_bytes_under_planned_key() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let stored = Arc::new(Mutex::new(Stored::default()));
    let app = Router::new()
        .route("/presign", post(presign))
        .route("/put/*key", put(accept))
        .with_state((addr, stored.clone()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.jpg");
    fs::write(&path, b"jpeg bytes").unwrap();

    let (summary, resp) = upload::upload(&path, &args(), &format!("http://{}/presign", addr))
        .await
        .unwrap();
    assert_eq!(resp.key, summary.key);

    let s = stored.lock().unwrap();
    assert_eq!(s.key.as_deref(), Some(summary.key.as_str()));
    assert_eq!(s.body, b"jpeg bytes");
}
