//! Key derivation from mnemonic phrases
//!
//! Seed → master key → BIP-32 path, as done by account-based wallets.

use super::error::MnemonicResult;
use super::generate::Mnemonic;
use crate::bip32::{derive_master, DerivationPath, ExtendedKey, HARDENED_OFFSET};

/// Configuration for key derivation
#[derive(Debug, Clone)]
pub struct DerivationConfig {
    /// Path from the master key (default: `m/44'/60'/0'/0/0`)
    pub path: DerivationPath,
    /// Optional BIP-39 passphrase
    pub passphrase: Option<String>,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            passphrase: None,
        }
    }
}

impl DerivationConfig {
    /// Create a config for the given path
    pub fn new(path: DerivationPath) -> Self {
        Self {
            path,
            passphrase: None,
        }
    }

    /// Set the passphrase
    pub fn with_passphrase(mut self, passphrase: &str) -> Self {
        self.passphrase = Some(passphrase.to_string());
        self
    }
}

fn default_path() -> DerivationPath {
    // m/44'/60'/0'/0/0
    DerivationPath::new(vec![
        44 + HARDENED_OFFSET,
        60 + HARDENED_OFFSET,
        HARDENED_OFFSET,
        0,
        0,
    ])
}

/// Derive a secp256k1 extended key from a mnemonic
///
/// # Arguments
///
/// * `mnemonic` - The BIP-39 mnemonic
/// * `config` - Path and optional passphrase
///
/// # Returns
///
/// The `ExtendedKey` at `config.path`, with private material
///
/// # Example
///
/// ```rust
/// use hdkeys_crypto::mnemonic::{derive_secp256k1_key, DerivationConfig, Mnemonic};
///
/// let mnemonic = Mnemonic::from_phrase(
///     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
/// ).unwrap();
///
/// let key = derive_secp256k1_key(&mnemonic, &DerivationConfig::default()).unwrap();
/// assert_eq!(key.depth(), 5);
/// ```
pub fn derive_secp256k1_key(
    mnemonic: &Mnemonic,
    config: &DerivationConfig,
) -> MnemonicResult<ExtendedKey> {
    let seed = mnemonic.to_seed(config.passphrase.as_deref());
    let master = derive_master(&seed, false)?;
    Ok(master.derive_path(&config.path)?)
}
