//! Secp256k1 key types for account-based chains
//!
//! This module provides the key values shared by HD derivation and the
//! keystore codec:
//! - `Secp256k1SecretKey`: validated scalar in `[1, n)`
//! - `Secp256k1PublicKey`: curve point, compressed or uncompressed SEC1 encoding
//! - `Secp256k1KeyPair`: owned pair, optionally public-only
//!
//! Uses the k256 crate for secp256k1 curve operations.

use crate::error::CryptoError;
use alloy_primitives::{keccak256, Address};
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey as K256SecretKey};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

/// Size of a serialized secret scalar
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of a compressed SEC1 public key
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// Size of an uncompressed SEC1 public key (with 0x04 prefix)
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// Secp256k1 secret key (32 bytes scalar)
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1SecretKey(K256SecretKey);

impl Secp256k1SecretKey {
    /// Generate a new random secret key
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(K256SecretKey::random(rng))
    }

    /// Load from raw bytes (32 bytes big-endian scalar)
    ///
    /// Fails if the scalar is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_SIZE]) -> Result<Self, CryptoError> {
        K256SecretKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSecretKey)
    }

    /// Serialize to bytes (32 bytes big-endian scalar)
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_SIZE]> {
        Zeroizing::new(self.0.to_bytes().into())
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey(self.0.public_key())
    }

    pub(crate) fn as_inner(&self) -> &K256SecretKey {
        &self.0
    }

    pub(crate) fn from_inner(inner: K256SecretKey) -> Self {
        Self(inner)
    }
}

impl std::fmt::Debug for Secp256k1SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Secp256k1 public key
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey(k256::PublicKey);

impl Secp256k1PublicKey {
    /// Load from compressed bytes (33 bytes, 0x02 or 0x03 prefix)
    pub fn from_bytes(bytes: &[u8; COMPRESSED_PUBLIC_KEY_SIZE]) -> Result<Self, CryptoError> {
        // SEC1 also defines a 33-byte compact form (0x05); only compressed points are accepted
        if !matches!(bytes[0], 0x02 | 0x03) {
            return Err(CryptoError::InvalidPublicKey);
        }
        Self::from_sec1_bytes(bytes)
    }

    /// Load from uncompressed bytes (65 bytes, with 0x04 prefix)
    pub fn from_uncompressed_bytes(
        bytes: &[u8; UNCOMPRESSED_PUBLIC_KEY_SIZE],
    ) -> Result<Self, CryptoError> {
        if bytes[0] != 0x04 {
            return Err(CryptoError::InvalidPublicKey);
        }
        Self::from_sec1_bytes(bytes)
    }

    /// Load from any SEC1 encoding
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Serialize to compressed bytes (33 bytes)
    pub fn to_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_SIZE] {
        let encoded = self.0.to_encoded_point(true);
        let mut result = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
        result.copy_from_slice(encoded.as_bytes());
        result
    }

    /// Serialize to uncompressed bytes (65 bytes, with 0x04 prefix)
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_SIZE] {
        let encoded = self.0.to_encoded_point(false);
        let mut result = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
        result.copy_from_slice(encoded.as_bytes());
        result
    }

    /// Derive the account address from this public key
    ///
    /// Uses keccak256(uncompressed_pubkey[1..])[12..] (20 bytes)
    pub fn evm_address(&self) -> Address {
        let uncompressed = self.to_uncompressed_bytes();
        // Skip the 0x04 prefix byte
        let hash = keccak256(&uncompressed[1..]);
        Address::from_slice(&hash[12..])
    }

    pub(crate) fn as_inner(&self) -> &k256::PublicKey {
        &self.0
    }

    pub(crate) fn from_inner(inner: k256::PublicKey) -> Self {
        Self(inner)
    }
}

impl std::fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "Secp256k1PublicKey({})", hex::encode(&bytes[..8]))
    }
}

/// Secp256k1 key pair
///
/// A pair without a secret key is the public-only form: it stands for the
/// zero private key and is what an extended public key carries.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1KeyPair {
    pub secret_key: Option<Secp256k1SecretKey>,
    pub public_key: Secp256k1PublicKey,
}

impl Secp256k1KeyPair {
    /// Generate a new random key pair
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self::from_secret_key(Secp256k1SecretKey::generate(rng))
    }

    /// Create from secret key
    pub fn from_secret_key(secret_key: Secp256k1SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            secret_key: Some(secret_key),
            public_key,
        }
    }

    /// Create from a 32-byte big-endian scalar
    pub fn from_secret_bytes(bytes: &[u8; SECRET_KEY_SIZE]) -> Result<Self, CryptoError> {
        Secp256k1SecretKey::from_bytes(bytes).map(Self::from_secret_key)
    }

    /// Create the public-only form
    pub fn public_only(public_key: Secp256k1PublicKey) -> Self {
        Self {
            secret_key: None,
            public_key,
        }
    }

    /// Copy of this pair with the secret stripped
    pub fn to_public_only(&self) -> Self {
        Self::public_only(self.public_key.clone())
    }

    /// Whether this pair carries no private material
    pub fn is_public_only(&self) -> bool {
        self.secret_key.is_none()
    }

    /// Secret scalar zero-padded to 32 bytes; all zeros for the public-only form
    pub fn secret_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_SIZE]> {
        match &self.secret_key {
            Some(secret) => secret.to_bytes(),
            None => Zeroizing::new([0u8; SECRET_KEY_SIZE]),
        }
    }

    /// Get the account address derived from this key pair
    pub fn evm_address(&self) -> Address {
        self.public_key.evm_address()
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key)
            .field("public_only", &self.is_public_only())
            .field("evm_address", &self.evm_address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_one() -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        bytes
    }

    #[test]
    fn test_key_generation() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let bytes = keypair.public_key.to_bytes();
        let restored = Secp256k1PublicKey::from_bytes(&bytes).unwrap();
        assert_eq!(keypair.public_key, restored);
    }

    #[test]
    fn test_secret_key_serialization() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let bytes = keypair.secret_bytes();
        let restored = Secp256k1KeyPair::from_secret_bytes(&bytes).unwrap();
        assert_eq!(keypair, restored);
    }

    #[test]
    fn test_zero_and_order_rejected() {
        assert_eq!(
            Secp256k1SecretKey::from_bytes(&[0u8; 32]).unwrap_err(),
            CryptoError::InvalidSecretKey
        );

        // secp256k1 group order n
        let order: [u8; 32] =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
                .unwrap()
                .try_into()
                .unwrap();
        assert!(Secp256k1SecretKey::from_bytes(&order).is_err());
    }

    #[test]
    fn test_public_only() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let public = keypair.to_public_only();

        assert!(public.is_public_only());
        assert!(!keypair.is_public_only());
        assert_eq!(*public.secret_bytes(), [0u8; 32]);
        assert_eq!(public.public_key, keypair.public_key);
        assert_ne!(public, keypair);
    }

    #[test]
    fn test_evm_address_known_vector() {
        // Private key = 1
        let keypair = Secp256k1KeyPair::from_secret_bytes(&key_one()).unwrap();
        let expected =
            Address::from_slice(&hex::decode("7E5F4552091A69125d5DfCb7b8C2659029395Bdf").unwrap());
        assert_eq!(keypair.evm_address(), expected);
    }

    #[test]
    fn test_uncompressed_bytes() {
        let keypair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
        let uncompressed = keypair.public_key.to_uncompressed_bytes();

        assert_eq!(uncompressed[0], 0x04);

        let restored = Secp256k1PublicKey::from_uncompressed_bytes(&uncompressed).unwrap();
        assert_eq!(keypair.public_key, restored);
    }

    #[test]
    fn test_invalid_point_rejected() {
        let keypair = Secp256k1KeyPair::from_secret_bytes(&key_one()).unwrap();
        let mut bytes = keypair.public_key.to_bytes();
        bytes[0] = 0x05;
        assert_eq!(
            Secp256k1PublicKey::from_bytes(&bytes).unwrap_err(),
            CryptoError::InvalidPublicKey
        );
    }

    #[test]
    fn test_point_tags() {
        let keypair = Secp256k1KeyPair::from_secret_bytes(&key_one()).unwrap();

        let mut compressed = keypair.public_key.to_bytes();
        for tag in [0x00, 0x04, 0x05, 0x06, 0x07] {
            compressed[0] = tag;
            assert_eq!(
                Secp256k1PublicKey::from_bytes(&compressed).unwrap_err(),
                CryptoError::InvalidPublicKey
            );
        }

        let mut uncompressed = keypair.public_key.to_uncompressed_bytes();
        assert_eq!(
            Secp256k1PublicKey::from_uncompressed_bytes(&uncompressed).unwrap(),
            keypair.public_key
        );
        uncompressed[0] = 0x06;
        assert_eq!(
            Secp256k1PublicKey::from_uncompressed_bytes(&uncompressed).unwrap_err(),
            CryptoError::InvalidPublicKey
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let keypair = Secp256k1KeyPair::from_secret_bytes(&key_one()).unwrap();
        let debug = format!("{:?}", keypair.secret_key.as_ref().unwrap());
        assert!(debug.contains("[REDACTED]"));
    }
}
