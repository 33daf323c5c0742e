//! Keystore decryption command

use super::common::get_passphrase;
use crate::store::load_keystore;
use anyhow::{anyhow, Result};
use hdkeys_crypto::{decrypt_keystore, ErrorKind, Keystore, KeystoreError, Secp256k1KeyPair};
use std::path::Path;
use tracing::{debug, warn};

/// Execute the decrypt command
pub fn execute(file: &Path, passphrase_file: Option<&Path>) -> Result<()> {
    let keystore = load_keystore(file)?;
    debug!(file = %file.display(), version = keystore.version, "Loaded keystore");

    let passphrase = get_passphrase(passphrase_file, "Enter keystore passphrase: ", false)?;
    let key_pair = unlock(&keystore, passphrase.as_bytes())?;

    let address = key_pair.evm_address();
    if let Some(hint) = keystore.address_hint() {
        if !hint.eq_ignore_ascii_case(&hex::encode(address)) {
            warn!(recorded = hint, "Recorded address does not match the decrypted key");
        }
    }

    println!("Address: {}", address);
    Ok(())
}

/// Decrypt a record, turning the error kind into a user-facing message
pub fn unlock(keystore: &Keystore, passphrase: &[u8]) -> Result<Secp256k1KeyPair> {
    decrypt_keystore(keystore, passphrase).map_err(|e| match (&e, e.kind()) {
        (_, ErrorKind::Authentication) => anyhow!("Wrong passphrase"),
        (KeystoreError::UnsupportedKeystore(_) | KeystoreError::UnsupportedPrf(_), _) => {
            anyhow!("Unsupported keystore: {}", e)
        }
        _ => anyhow!("Failed to decrypt keystore: {}", e),
    })
}
