//! Seed container with automatic memory zeroing
//!
//! `Seed` holds the raw entropy that a master extended key is derived from.
//! It ensures that:
//! - Bytes are zeroized when the struct is dropped
//! - Debug output doesn't expose the actual bytes
//! - The struct cannot be accidentally cloned

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a BIP-39 derived seed in bytes
pub const SEED_SIZE: usize = 64;

/// Memory-safe container for an HD wallet seed.
///
/// Any length is accepted; BIP-39 produces 64 bytes, while the BIP-32 test
/// vectors use 16 to 64 bytes. The seed is consumed once by master key
/// derivation and has no further lifecycle.
///
/// # Example
///
/// ```rust
/// use hdkeys_crypto::secure::Seed;
///
/// let seed = Seed::new(vec![0x42; 64]);
/// assert_eq!(seed.len(), 64);
/// // Memory is automatically zeroed when `seed` goes out of scope
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: Vec<u8>,
}

impl Seed {
    /// Wrap raw seed bytes, taking ownership of the buffer.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Copy seed bytes out of a borrowed slice.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }

    /// Get a reference to the seed bytes.
    ///
    /// # Security
    ///
    /// The returned reference should be used immediately and not stored.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Seed length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the seed is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<[u8; SEED_SIZE]> for Seed {
    fn from(mut bytes: [u8; SEED_SIZE]) -> Self {
        let seed = Self::from_slice(&bytes);
        bytes.zeroize();
        seed
    }
}

// Custom Debug implementation to prevent exposing seeds in logs
impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seed")
            .field("length", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_creation() {
        let seed = Seed::new(vec![1u8; 16]);
        assert_eq!(seed.as_bytes(), &[1u8; 16]);
        assert_eq!(seed.len(), 16);
        assert!(!seed.is_empty());
    }

    #[test]
    fn test_seed_from_array() {
        let seed = Seed::from([7u8; SEED_SIZE]);
        assert_eq!(seed.len(), SEED_SIZE);
        assert!(seed.as_bytes().iter().all(|&b| b == 7));
    }

    #[test]
    fn test_debug_output_redacted() {
        let seed = Seed::new(vec![0xAB; 32]);
        let debug_str = format!("{:?}", seed);

        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("171")); // 0xAB = 171
    }

    #[test]
    fn test_zeroize_clears_bytes() {
        let mut seed = Seed::new(vec![0xAA; 32]);
        seed.zeroize();
        // Vec zeroization wipes the buffer and truncates it
        assert!(seed.is_empty());
    }
}
