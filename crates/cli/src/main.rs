// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::{Args, Parser, Subcommand};
use photo_ledger_cli::commands::prepare::PrepareArgs;
use photo_ledger_cli::commands::{decode, derive, encode, hash, prepare, upload};
use photo_ledger_kernel::config::DEFAULT_PROGRAM_ID;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photoledger")]
#[command(about = "Photo Ledger CLI - encode, decode and plan photo provenance records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RecordArgs {
    /// Ledger address paying for and owning the record
    #[arg(long)]
    payer: String,

    /// Device group the photo is filed under
    #[arg(long)]
    device: String,

    /// Location string, e.g. "48.85,2.35"
    #[arg(long)]
    location: String,

    /// Capture time. Defaults to now (UTC, RFC 3339).
    #[arg(long)]
    timestamp: Option<String>,

    #[arg(long, default_value = DEFAULT_PROGRAM_ID)]
    program_id: String,

    #[arg(long, default_value = "photoverifier")]
    bucket: String,

    /// Key prefix in the bucket (default "photos")
    #[arg(long)]
    prefix: Option<String>,

    /// Stored extension. Defaults to the file's own.
    #[arg(long)]
    ext: Option<String>,
}

impl From<RecordArgs> for PrepareArgs {
    fn from(a: RecordArgs) -> Self {
        PrepareArgs {
            program_id: a.program_id,
            payer: a.payer,
            bucket: a.bucket,
            base_prefix: a.prefix,
            device_group_id: a.device,
            extension: a.ext,
            location: a.location,
            timestamp: a.timestamp,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a create-photo instruction
    Encode {
        /// 64-char hex content hash
        #[arg(long)]
        hash: String,
        #[arg(long)]
        storage_uri: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        timestamp: Option<String>,
        /// Print base58 (the ledger's encoding) instead of hex
        #[arg(long)]
        base58: bool,
    },
    /// Decode instruction data given as hex or base58
    Decode {
        data: String,
    },
    /// Derive the record address for (payer, hash, timestamp)
    Derive {
        #[arg(long, default_value = DEFAULT_PROGRAM_ID)]
        program_id: String,
        #[arg(long)]
        payer: String,
        #[arg(long)]
        hash: String,
        #[arg(long)]
        timestamp: String,
    },
    /// Content hash of a file, optionally checked against a claimed hash
    Hash {
        path: PathBuf,
        #[arg(long)]
        claim: Option<String>,
    },
    /// Compute everything needed to submit a photo record
    Prepare {
        path: PathBuf,
        #[command(flatten)]
        record: RecordArgs,
        /// Write the plan JSON here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Plan a record and upload the photo through a presign endpoint
    Upload {
        path: PathBuf,
        #[command(flatten)]
        record: RecordArgs,
        #[arg(long)]
        presign_url: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            hash,
            storage_uri,
            location,
            timestamp,
            base58,
        } => encode::run(&hash, &storage_uri, &location, timestamp.as_deref(), base58),
        Commands::Decode { data } => decode::run(&data),
        Commands::Derive {
            program_id,
            payer,
            hash,
            timestamp,
        } => derive::run(&program_id, &payer, &hash, &timestamp),
        Commands::Hash { path, claim } => hash::run(&path, claim.as_deref()),
        Commands::Prepare { path, record, out } => prepare::run(&path, &record.into(), out),
        Commands::Upload {
            path,
            record,
            presign_url,
        } => upload::run(&path, &record.into(), &presign_url),
    }
}
