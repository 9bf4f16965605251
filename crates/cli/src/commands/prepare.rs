// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use photo_ledger_kernel::submission::{plan_submission, SubmissionRequest};
use serde::{Deserialize, Serialize};

use crate::input::{parse_pubkey, photo_extension};

/// Inputs of a new photo record, minus the bytes.
#[derive(Debug, Clone)]
pub struct PrepareArgs {
    pub program_id: String,
    pub payer: String,
    pub bucket: String,
    pub base_prefix: Option<String>,
    pub device_group_id: String,
    pub extension: Option<String>,
    pub location: String,
    /// Defaults to the current UTC time.
    pub timestamp: Option<String>,
}

/// What the wallet needs to sign and the uploader needs to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub hash_hex: String,
    pub key: String,
    pub storage_uri: String,
    pub location: String,
    pub timestamp: String,
    pub instruction_data_base58: String,
    pub record_address: String,
    pub bump: u8,
}

pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

pub fn plan(args: &PrepareArgs, photo_bytes: &[u8], extension: Option<&str>) -> anyhow::Result<PlanSummary> {
    let program_id = parse_pubkey(&args.program_id)?;
    let payer = parse_pubkey(&args.payer)?;
    let timestamp = args.timestamp.clone().unwrap_or_else(now_timestamp);

    let req = SubmissionRequest {
        program_id: &program_id,
        payer: &payer,
        bucket: &args.bucket,
        base_prefix: args.base_prefix.as_deref(),
        device_group_id: &args.device_group_id,
        extension: args.extension.as_deref().or(extension),
        location: &args.location,
        timestamp: &timestamp,
    };
    let plan = plan_submission(&req, photo_bytes)?;

    Ok(PlanSummary {
        hash_hex: plan.hash.to_hex(),
        key: plan.key,
        storage_uri: plan.storage_uri,
        location: args.location.clone(),
        timestamp,
        instruction_data_base58: bs58::encode(&plan.instruction_data).into_string(),
        record_address: plan.record_address.to_base58(),
        bump: plan.bump,
    })
}

pub fn plan_file(path: &Path, args: &PrepareArgs) -> anyhow::Result<PlanSummary> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    plan(args, &bytes, photo_extension(path).as_deref())
}

pub fn run(path: &Path, args: &PrepareArgs, out: Option<PathBuf>) -> anyhow::Result<()> {
    let summary = plan_file(path, args)?;
    let json = serde_json::to_string_pretty(&summary)?;
    match out {
        Some(out) => {
            fs::write(&out, &json).with_context(|| format!("writing {}", out.display()))?;
            println!("Plan written to {}", out.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
