//! Key material for account-based chains
//!
//! This crate provides:
//! - secp256k1 key types and account address derivation
//! - BIP-32 master and child key derivation with `xprv`/`xpub` serialization
//! - BIP-39 mnemonic phrases and seed generation
//! - Web3 Secret Storage keystores (scrypt or PBKDF2, AES-128-CTR, Keccak MAC)
//! - Zeroize-on-drop containers for seeds, derived keys and plaintext
//!
//! Nothing here performs I/O or logs; all failures are returned to the caller
//! and classified by [`ErrorKind`].

pub mod bip32;
pub mod error;
pub mod keystore;
pub mod mnemonic;
pub mod secp256k1;
pub mod secure;

// Secp256k1 exports
pub use secp256k1::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1SecretKey};

// Error exports
pub use error::{CryptoError, ErrorKind};

// Extended key exports
pub use bip32::{
    decode_extended_key, derive_master, encode_extended_key, Bip32Error, DerivationPath,
    ExtendedKey, DEFAULT_DERIVATION_PATH_SECP256K1,
};

// Secure memory exports
pub use secrecy::ExposeSecret;
pub use secure::{IntoSecret, SecretArray, SecretBytes, SecretString, Seed};

// Keystore exports
pub use keystore::{
    decrypt_keystore, encrypt_keystore, encrypt_keystore_v4, validate_keystore_structure,
    Keystore, KeystoreError, ScryptConfig,
};

// Mnemonic exports
pub use mnemonic::{derive_secp256k1_key, DerivationConfig, Mnemonic, MnemonicError};
