//! Extended key derivation command

use super::common::{get_mnemonic, parse_path};
use anyhow::{Context, Result};
use hdkeys_crypto::{derive_secp256k1_key, DerivationConfig, ExtendedKey, Mnemonic};
use std::path::Path;
use tracing::info;
use zeroize::Zeroizing;

/// Execute the xprv command
pub fn execute(mnemonic_file: Option<&Path>, path: &str, public: bool) -> Result<()> {
    let mnemonic = get_mnemonic(mnemonic_file)?;
    let encoded = derive_encoded(&mnemonic, path, public)?;

    info!(path, public, "Derived extended key");
    println!("{}", encoded.as_str());

    Ok(())
}

/// Derive the key at `path` and render it as `xprv`, or `xpub` when `public`
pub fn derive_encoded(mnemonic: &Mnemonic, path: &str, public: bool) -> Result<Zeroizing<String>> {
    let key = derive_at(mnemonic, path)?;
    let key = if public { key.neuter() } else { key };
    Ok(Zeroizing::new(key.to_base58()))
}

pub(crate) fn derive_at(mnemonic: &Mnemonic, path: &str) -> Result<ExtendedKey> {
    let config = DerivationConfig::new(parse_path(path)?);
    derive_secp256k1_key(mnemonic, &config)
        .with_context(|| format!("Failed to derive key at {}", path))
}
