//! Error types for extended key operations

use thiserror::Error;

use crate::error::{CryptoError, ErrorKind};

/// Result type for extended key operations
pub type Bip32Result<T> = Result<T, Bip32Error>;

/// Errors that can occur while deriving or (de)serializing extended keys
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Bip32Error {
    /// HMAC output left half is zero or not below the curve order
    #[error("master key is out of range for the curve; retry with different seed material")]
    InvalidMasterKey,

    /// The HMAC or curve provider failed
    #[error("underlying crypto failure: {0}")]
    CryptoFailure(String),

    /// Bad base58, bad checksum, wrong payload length or inconsistent header
    #[error("invalid extended key format: {0}")]
    InvalidFormat(String),

    /// Version tag is neither the private nor the public magic value
    #[error("unknown extended key version: {}", hex::encode(.0))]
    UnknownKeyVersion([u8; 4]),

    /// Key field does not hold a usable scalar or curve point
    #[error("invalid key material: {0}")]
    InvalidKey(#[from] CryptoError),

    /// Derivation path could not be parsed
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    /// Hardened children need the parent private key
    #[error("cannot derive hardened child {0} from a public-only key")]
    HardenedFromPublic(u32),

    /// The derived child key is invalid (probability below 2^-127)
    #[error("child {0} yields an invalid key; skip to the next index")]
    InvalidChild(u32),

    /// Depth would exceed 255
    #[error("maximum derivation depth exceeded")]
    DepthOverflow,
}

impl Bip32Error {
    /// Taxonomy of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Bip32Error::InvalidFormat(_)
            | Bip32Error::UnknownKeyVersion(_)
            | Bip32Error::InvalidPath(_) => ErrorKind::Structural,
            Bip32Error::CryptoFailure(_) => ErrorKind::Collaborator,
            Bip32Error::InvalidMasterKey
            | Bip32Error::InvalidKey(_)
            | Bip32Error::HardenedFromPublic(_)
            | Bip32Error::InvalidChild(_)
            | Bip32Error::DepthOverflow => ErrorKind::CryptographicDomain,
        }
    }
}
