//! Web3 Secret Storage (version 3 and 4) encrypted keystore
//!
//! The format supports:
//!
//! - Password-based key derivation using scrypt or PBKDF2-HMAC-SHA256
//! - AES-128-CTR symmetric encryption
//! - Keccak-256 MAC over the second half of the derived key and the ciphertext
//! - JSON serialization for portability
//!
//! # Security Properties
//!
//! - Record structure is validated before any KDF work
//! - The MAC is verified in constant time before anything is decrypted
//! - Derived keys and plaintext are zeroized on drop
//!
//! # Example
//!
//! ```rust
//! use hdkeys_crypto::keystore::{decrypt_keystore, encrypt_keystore, Keystore, ScryptConfig};
//! use hdkeys_crypto::Secp256k1KeyPair;
//!
//! let key_pair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
//! let keystore = encrypt_keystore(&key_pair, b"my-strong-passphrase", ScryptConfig::LIGHT).unwrap();
//!
//! let json = keystore.to_json().unwrap();
//! let loaded = Keystore::from_json(&json).unwrap();
//! let decrypted = decrypt_keystore(&loaded, b"my-strong-passphrase").unwrap();
//! assert_eq!(decrypted.evm_address(), key_pair.evm_address());
//! ```

mod cipher;
mod error;
mod kdf;
mod mac;
mod wallet;

pub use cipher::{decrypt_secret, encrypt_secret, CipherParams, CIPHER_AES_128_CTR, IV_LENGTH};
pub use error::{KeystoreError, KeystoreResult};
pub use kdf::{
    pbkdf2_derive_key, scrypt_derive_key, KdfParams, ScryptConfig, KDF_PBKDF2, KDF_SCRYPT,
    MAX_SCRYPT_MEMORY, PRF_HMAC_SHA256,
};
pub use mac::{compute_mac, verify_mac};
pub use wallet::{
    decrypt_keystore, encrypt_keystore, encrypt_keystore_v4, validate_keystore_structure,
    Keystore, WalletCrypto, SUPPORTED_VERSIONS, VERSION_3, VERSION_4,
};
