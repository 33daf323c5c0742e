//! Cryptographic error types

use thiserror::Error;

/// Broad classification shared by every error in this crate.
///
/// Callers branch on the kind instead of on concrete variants, e.g. to tell
/// "wrong password" apart from "corrupt file".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed binary or text input. Detected before any cryptographic work.
    Structural,
    /// Valid structure, but a value the curve or algorithm set cannot accept.
    CryptographicDomain,
    /// MAC mismatch: the supplied password does not open the record.
    Authentication,
    /// A hashing, cipher or RNG provider failed underneath us.
    Collaborator,
}

/// secp256k1 key errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Scalar is zero or not below the curve order
    #[error("invalid secret key bytes")]
    InvalidSecretKey,

    /// Bytes do not encode a point on the curve
    #[error("invalid public key bytes")]
    InvalidPublicKey,
}

impl CryptoError {
    /// Taxonomy of this error
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::CryptographicDomain
    }
}
