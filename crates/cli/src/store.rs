//! Keystore files on disk
//!
//! Records are written to a temporary file in the target directory and
//! renamed into place, so a reader never observes a partial file.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use hdkeys_crypto::Keystore;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extension of keystore files
pub const KEYSTORE_EXTENSION: &str = "json";

/// File name for a keystore: `UTC--<timestamp>--<address>.json`
///
/// `address` is lowercase hex without `0x`, as stored in the record.
pub fn keystore_file_name(created_at: DateTime<Utc>, address: &str) -> String {
    format!(
        "UTC--{}--{}.{}",
        created_at.format("%Y-%m-%dT%H-%M-%S%.9fZ"),
        address.trim_start_matches("0x").to_lowercase(),
        KEYSTORE_EXTENSION
    )
}

/// Create the keys directory with owner-only permissions if missing
pub fn ensure_keys_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).context("Failed to create keys directory")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(dir, perms).context("Failed to set directory permissions")?;
        }

        debug!(dir = %dir.display(), "Created keys directory");
    }
    Ok(())
}

/// Write a keystore into `dir`, returning the new file's path
///
/// The file gets 0600 permissions on unix. An existing file with the same
/// name is never overwritten.
pub fn save_keystore(dir: &Path, keystore: &Keystore) -> Result<PathBuf> {
    let address = keystore
        .address_hint()
        .ok_or_else(|| anyhow!("Keystore has no address to name the file by"))?;
    let path = dir.join(keystore_file_name(Utc::now(), address));

    ensure_keys_dir(dir)?;
    let json = keystore.to_json().context("Failed to serialize keystore")?;

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .context("Failed to create temporary keystore file")?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(file.path(), perms).context("Failed to set keystore permissions")?;
    }

    file.write_all(json.as_bytes())
        .context("Failed to write keystore")?;
    file.as_file()
        .sync_all()
        .context("Failed to flush keystore")?;
    file.persist_noclobber(&path)
        .map_err(|e| anyhow!("Failed to store keystore at {}: {}", path.display(), e.error))?;

    info!(path = %path.display(), version = keystore.version, "Saved keystore");
    Ok(path)
}

/// Read and parse a keystore file
pub fn load_keystore(path: &Path) -> Result<Keystore> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read keystore: {}", path.display()))?;
    Keystore::from_json(&json)
        .with_context(|| format!("Failed to parse keystore: {}", path.display()))
}

/// Keystore files in `dir`, sorted by name
pub fn keystore_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read keys directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == KEYSTORE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
