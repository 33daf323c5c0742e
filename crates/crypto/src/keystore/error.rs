//! Keystore error types

use thiserror::Error;

use crate::error::{CryptoError, ErrorKind};

/// Errors that can occur during keystore operations
#[derive(Error, Debug)]
pub enum KeystoreError {
    /// Version, cipher or KDF tag outside the supported set, or KDF tag and
    /// parameter shape disagree
    #[error("unsupported keystore: {0}")]
    UnsupportedKeystore(String),

    /// PBKDF2 record names a PRF other than hmac-sha256
    #[error("unsupported PBKDF2 PRF: {0}")]
    UnsupportedPrf(String),

    /// MAC mismatch
    #[error("invalid password: MAC verification failed")]
    WrongPassword,

    /// RNG, KDF or cipher provider failed
    #[error("crypto operation failed: {0}")]
    CryptoOperationFailed(String),

    /// A hex field could not be decoded
    #[error("invalid hex in {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// KDF parameters are out of range
    #[error("invalid KDF parameters: {0}")]
    InvalidKdfParams(String),

    /// Cipher parameters are out of range
    #[error("invalid cipher parameters: {0}")]
    InvalidCipherParams(String),

    /// The key material is not a usable secp256k1 scalar
    #[error("invalid key: {0}")]
    InvalidKey(#[from] CryptoError),
}

impl KeystoreError {
    /// Taxonomy of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeystoreError::UnsupportedKeystore(_)
            | KeystoreError::InvalidHex { .. }
            | KeystoreError::Json(_)
            | KeystoreError::InvalidKdfParams(_)
            | KeystoreError::InvalidCipherParams(_) => ErrorKind::Structural,
            KeystoreError::UnsupportedPrf(_) | KeystoreError::InvalidKey(_) => {
                ErrorKind::CryptographicDomain
            }
            KeystoreError::WrongPassword => ErrorKind::Authentication,
            KeystoreError::CryptoOperationFailed(_) => ErrorKind::Collaborator,
        }
    }
}

/// Result type for keystore operations
pub type KeystoreResult<T> = Result<T, KeystoreError>;

/// Decode a hex field, tolerating an optional `0x` prefix
pub(crate) fn decode_hex(field: &'static str, value: &str) -> KeystoreResult<Vec<u8>> {
    let value = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(value).map_err(|e| KeystoreError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("salt", "0xabcd").unwrap(), vec![0xab, 0xcd]);
        assert_eq!(decode_hex("salt", "ABCD").unwrap(), vec![0xab, 0xcd]);
        assert!(matches!(
            decode_hex("salt", "abc"),
            Err(KeystoreError::InvalidHex { field: "salt", .. })
        ));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(KeystoreError::WrongPassword.kind(), ErrorKind::Authentication);
        assert_eq!(
            KeystoreError::UnsupportedKeystore("version 2".into()).kind(),
            ErrorKind::Structural
        );
        assert_eq!(
            KeystoreError::UnsupportedPrf("hmac-sha512".into()).kind(),
            ErrorKind::CryptographicDomain
        );
        assert_eq!(
            KeystoreError::InvalidKey(CryptoError::InvalidSecretKey).kind(),
            ErrorKind::CryptographicDomain
        );
        assert_eq!(
            KeystoreError::CryptoOperationFailed("rng".into()).kind(),
            ErrorKind::Collaborator
        );
    }
}
