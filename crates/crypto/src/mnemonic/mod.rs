//! Mnemonic-based key generation and recovery
//!
//! BIP-39 phrases are turned into a 64-byte seed and then into an extended
//! key along a BIP-32 path. The default path is the account path used by
//! Ethereum wallets:
//! ```text
//! m / 44' / 60' / account' / change / index
//! ```
//!
//! # Example
//!
//! ```rust
//! use hdkeys_crypto::mnemonic::{derive_secp256k1_key, DerivationConfig, Mnemonic};
//!
//! let mnemonic = Mnemonic::generate().unwrap();
//! let key = derive_secp256k1_key(&mnemonic, &DerivationConfig::default()).unwrap();
//! println!("Address: {}", key.key_pair().evm_address());
//! ```
//!
//! # Security
//!
//! - Mnemonic phrases should be stored securely offline
//! - The same mnemonic will always produce the same keys
//! - Use an optional passphrase for additional security

mod derive;
mod error;
mod generate;

pub use derive::{derive_secp256k1_key, DerivationConfig};
pub use error::{MnemonicError, MnemonicResult};
pub use generate::Mnemonic;
