// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use photo_ledger_kernel::content::ContentHasher;
use photo_ledger_kernel::types::Hash32;

pub fn hash_file(path: &Path) -> anyhow::Result<Hash32> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut hasher = ContentHasher::new();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}

pub fn run(path: &Path, claim: Option<&str>) -> anyhow::Result<()> {
    let hash = hash_file(path)?;

    let Some(claimed) = claim else {
        println!("{}", hash);
        return Ok(());
    };

    if hash.to_hex() == claimed.trim().to_ascii_lowercase() {
        println!("\n✅ VERIFIED\n");
        println!("Content Hash: {}\n", hash);
        Ok(())
    } else {
        println!("\n❌ MISMATCH\n");
        println!("Claimed Hash: {}", claimed);
        println!("Found Hash:   {}\n", hash);
        bail!("content hash mismatch for {}", path.display())
    }
}
