//! Keystore import command
//!
//! Derives a key from a mnemonic and writes it to an encrypted keystore.

use super::common::{get_mnemonic, get_passphrase, resolve_keys_dir};
use super::xprv::derive_at;
use super::KdfPreset;
use crate::store::save_keystore;
use anyhow::{Context, Result};
use hdkeys_crypto::{encrypt_keystore, encrypt_keystore_v4, ExtendedKey, Keystore};
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments of the import command
#[derive(Debug)]
pub struct ImportOptions {
    pub mnemonic_file: Option<PathBuf>,
    pub path: String,
    pub kdf: KdfPreset,
    pub v4: bool,
    pub passphrase_file: Option<PathBuf>,
    pub keys_dir: Option<PathBuf>,
}

/// Execute the import command
pub fn execute(home: &Path, options: ImportOptions) -> Result<()> {
    let keys_dir = resolve_keys_dir(home, options.keys_dir.clone());

    let mnemonic = get_mnemonic(options.mnemonic_file.as_deref())?;
    let key = derive_at(&mnemonic, &options.path)?;
    drop(mnemonic);

    let passphrase = get_passphrase(
        options.passphrase_file.as_deref(),
        "Enter keystore passphrase: ",
        true,
    )?;

    info!(
        path = %options.path,
        kdf = ?options.kdf,
        v4 = options.v4,
        "Encrypting keystore"
    );
    let keystore = encrypt_key(&key, passphrase.as_bytes(), options.kdf, options.v4)?;
    let file = save_keystore(&keys_dir, &keystore)?;

    println!("Address:  {}", key.key_pair().evm_address());
    println!("Keystore: {}", file.display());

    Ok(())
}

/// Encrypt the key pair of an extended key into a version 3 or 4 record
pub fn encrypt_key(
    key: &ExtendedKey,
    passphrase: &[u8],
    kdf: KdfPreset,
    v4: bool,
) -> Result<Keystore> {
    let keystore = if v4 {
        encrypt_keystore_v4(key.key_pair(), passphrase, kdf.config())
    } else {
        encrypt_keystore(key.key_pair(), passphrase, kdf.config())
    };
    keystore.context("Failed to encrypt keystore")
}
