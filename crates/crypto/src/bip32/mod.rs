//! Hierarchical deterministic key derivation (BIP-32)
//!
//! This module covers the full life of an extended key:
//! - Master derivation from a seed (`HMAC-SHA512("Bitcoin seed", seed)`)
//! - Child derivation, hardened and non-hardened, along a `DerivationPath`
//! - The 78-byte wire format and its base58check text form (`xprv`/`xpub`)
//!
//! # Example
//!
//! ```rust
//! use hdkeys_crypto::bip32::{derive_master, DerivationPath, ExtendedKey};
//! use hdkeys_crypto::secure::Seed;
//!
//! let seed = Seed::new(hex::decode("000102030405060708090a0b0c0d0e0f").unwrap());
//! let master = derive_master(&seed, false).unwrap();
//!
//! let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();
//! let account = master.derive_path(&path).unwrap();
//!
//! let text = account.to_base58();
//! let decoded: ExtendedKey = text.parse().unwrap();
//! assert_eq!(decoded, account);
//! ```

mod error;
mod extended;
mod master;
mod path;
mod serialize;

pub use error::{Bip32Error, Bip32Result};
pub use extended::{ExtendedKey, CHAIN_CODE_SIZE, HARDENED_OFFSET};
pub use master::{derive_master, BITCOIN_SEED};
pub use path::{DerivationPath, DEFAULT_DERIVATION_PATH_SECP256K1};
pub use serialize::{
    decode_extended_key, encode_extended_key, EXTENDED_KEY_SIZE, XPRV_VERSION, XPUB_VERSION,
};
