//! Error types for mnemonic operations

use thiserror::Error;

use crate::bip32::Bip32Error;
use crate::error::ErrorKind;

/// Result type for mnemonic operations
pub type MnemonicResult<T> = Result<T, MnemonicError>;

/// Errors that can occur during mnemonic operations
#[derive(Debug, Error)]
pub enum MnemonicError {
    /// Invalid mnemonic phrase (wrong word count or invalid words)
    #[error("invalid mnemonic phrase: {0}")]
    InvalidPhrase(String),

    /// Unsupported word count for generation
    #[error("invalid word count: {0} (must be 12, 15, 18, 21, or 24)")]
    InvalidWordCount(usize),

    /// Key derivation from the seed failed
    #[error("key derivation failed: {0}")]
    Derivation(#[from] Bip32Error),
}

impl MnemonicError {
    /// Taxonomy of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MnemonicError::InvalidPhrase(_) | MnemonicError::InvalidWordCount(_) => {
                ErrorKind::Structural
            }
            MnemonicError::Derivation(e) => e.kind(),
        }
    }
}

impl From<bip39::Error> for MnemonicError {
    fn from(err: bip39::Error) -> Self {
        MnemonicError::InvalidPhrase(err.to_string())
    }
}
