//! Secure memory handling for cryptographic material
//!
//! This module provides memory-safe containers for private key material with:
//! - Automatic zeroing on drop via `zeroize`
//! - Debug output masking to prevent log exposure
//! - Prevention of accidental cloning
//!
//! Derived KDF keys, decrypted plaintext and seeds all pass through these
//! containers, so they are wiped on every exit path, including early returns
//! on a wrong password.

mod material;
mod secret;

pub use material::{Seed, SEED_SIZE};
pub use secret::{IntoSecret, SecretArray, SecretBytes, SecretString};
