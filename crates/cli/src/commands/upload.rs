// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use anyhow::Context;
use photo_ledger_node::upload::{PresignResponse, PresignUploader};

use super::prepare::{plan, PlanSummary, PrepareArgs};
use crate::input::{content_type_for, photo_extension};

/// Plans the record, then stores the bytes under the planned key.
/// Nothing is uploaded when planning fails.
pub async fn upload(
    path: &Path,
    args: &PrepareArgs,
    presign_url: &str,
) -> anyhow::Result<(PlanSummary, PresignResponse)> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let detected = photo_extension(path);
    let summary = plan(args, &bytes, detected.as_deref())?;

    let ext = args
        .extension
        .as_deref()
        .or(detected.as_deref())
        .unwrap_or("jpg");
    let uploader = PresignUploader::new(presign_url, reqwest::Client::new());
    let stored = uploader.upload(&summary.key, content_type_for(ext), bytes).await?;
    Ok((summary, stored))
}

pub fn run(path: &Path, args: &PrepareArgs, presign_url: &str) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let (summary, stored) = rt.block_on(upload(path, args, presign_url))?;

    println!("\n✅ UPLOADED\n");
    println!("Key:            {}", stored.key);
    println!("Storage URI:    {}", summary.storage_uri);
    println!("Record address: {} (bump {})", summary.record_address, summary.bump);
    println!("Instruction:    {}\n", summary.instruction_data_base58);
    Ok(())
}
