//! Keystore list command
//!
//! Shows the public fields of every keystore in a directory. Nothing is
//! decrypted, so no passphrase is needed.

use super::common::resolve_keys_dir;
use crate::store::{keystore_files, load_keystore};
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Information about a discovered keystore
#[derive(Debug)]
struct KeystoreInfo {
    path: PathBuf,
    id: String,
    version: u32,
    address: Option<String>,
}

/// Execute the list command
pub fn execute(home: &Path, keys_dir: Option<PathBuf>, format: &str) -> Result<()> {
    let keys_dir = resolve_keys_dir(home, keys_dir);

    if !keys_dir.exists() {
        return Err(anyhow!(
            "Keys directory not found: {}\nRun 'hdkeys import' first.",
            keys_dir.display()
        ));
    }

    let keystores = collect(&keys_dir)?;

    if keystores.is_empty() {
        println!("No keystores found in {}", keys_dir.display());
        return Ok(());
    }

    match format {
        "json" => print_json(&keystores)?,
        _ => print_text(&keystores, &keys_dir),
    }

    Ok(())
}

fn collect(keys_dir: &Path) -> Result<Vec<KeystoreInfo>> {
    let mut keystores = Vec::new();

    for path in keystore_files(keys_dir)? {
        // Unparseable files are skipped, not fatal
        match load_keystore(&path) {
            Ok(keystore) => keystores.push(KeystoreInfo {
                address: keystore.address_hint().map(String::from),
                id: keystore.id,
                version: keystore.version,
                path,
            }),
            Err(e) => debug!(path = %path.display(), error = %e, "Skipping file"),
        }
    }

    Ok(keystores)
}

fn print_text(keystores: &[KeystoreInfo], keys_dir: &Path) {
    println!("Keystores in {}", keys_dir.display());
    println!();

    for ks in keystores {
        let file_name = ks
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        println!(
            "  0x{} (v{}, {})",
            ks.address.as_deref().unwrap_or("<no address>"),
            ks.version,
            ks.id
        );
        println!("    {}", file_name);
    }

    println!();
    println!("Total: {} keystore(s)", keystores.len());
}

fn print_json(keystores: &[KeystoreInfo]) -> Result<()> {
    let json_data: Vec<serde_json::Value> = keystores
        .iter()
        .map(|ks| {
            serde_json::json!({
                "path": ks.path.display().to_string(),
                "id": ks.id,
                "version": ks.version,
                "address": ks.address,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json_data)?);

    Ok(())
}
