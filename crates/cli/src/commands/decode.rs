// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use photo_ledger_kernel::codec::DecoderChain;
use photo_ledger_kernel::types::PhotoArgs;

use crate::input::parse_instruction_data;

/// Runs the default decoder chain. `None` means the payload was skipped.
pub fn decode(data: &[u8]) -> Option<(&'static str, PhotoArgs)> {
    DecoderChain::default().decode_named(data)
}

pub fn run(input: &str) -> anyhow::Result<()> {
    let data = parse_instruction_data(input)?;

    let Some((decoder, args)) = decode(&data) else {
        println!("\nSKIP: not a create-photo instruction ({} bytes)\n", data.len());
        return Ok(());
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Hash".to_string(), args.hash.to_hex()]);
    table.add_row(vec!["Storage URI".to_string(), args.storage_uri]);
    table.add_row(vec!["Location".to_string(), args.location]);
    table.add_row(vec![
        "Timestamp".to_string(),
        args.timestamp.unwrap_or_else(|| "(legacy record)".to_string()),
    ]);
    table.add_row(vec!["Decoder".to_string(), decoder.to_string()]);

    println!("\nCreate Photo Instruction\n");
    println!("{table}\n");
    Ok(())
}
