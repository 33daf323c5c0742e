//! Mnemonic phrase generation and parsing

use super::error::{MnemonicError, MnemonicResult};
use crate::secure::{IntoSecret, SecretString, Seed};
use bip39::Mnemonic as Bip39Mnemonic;
use rand::RngCore;
use secrecy::ExposeSecret;
use zeroize::Zeroizing;

/// BIP-39 mnemonic phrase wrapper
///
/// The phrase is stored as a SecretString to prevent accidental logging,
/// and the custom `Debug` implementation hides it.
///
/// # Example
///
/// ```rust
/// use hdkeys_crypto::mnemonic::Mnemonic;
///
/// // Generate a new 24-word mnemonic
/// let mnemonic = Mnemonic::generate().unwrap();
/// assert_eq!(mnemonic.word_count(), 24);
///
/// // Import an existing mnemonic
/// let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
/// let imported = Mnemonic::from_phrase(phrase).unwrap();
/// ```
pub struct Mnemonic {
    inner: Bip39Mnemonic,
    phrase: SecretString,
}

impl Mnemonic {
    /// Generate a new random 24-word (256-bit entropy) mnemonic
    pub fn generate() -> MnemonicResult<Self> {
        Self::generate_with_word_count(24)
    }

    /// Generate a mnemonic with a specific word count
    ///
    /// # Arguments
    ///
    /// * `word_count` - Number of words (12, 15, 18, 21, or 24)
    ///
    /// # Errors
    ///
    /// Returns `MnemonicError::InvalidWordCount` for any other count
    pub fn generate_with_word_count(word_count: usize) -> MnemonicResult<Self> {
        let entropy_bytes = word_count_to_entropy_bytes(word_count)?;

        let mut entropy = Zeroizing::new(vec![0u8; entropy_bytes]);
        rand::thread_rng().fill_bytes(&mut entropy);

        let mnemonic = Bip39Mnemonic::from_entropy(&entropy)?;
        let phrase = mnemonic.to_string();
        Ok(Self {
            inner: mnemonic,
            phrase: phrase.into_secret(),
        })
    }

    /// Import a mnemonic from an existing phrase
    ///
    /// Whitespace is collapsed and words are lowercased before the checksum
    /// is verified.
    ///
    /// # Errors
    ///
    /// Returns `MnemonicError::InvalidPhrase` if:
    /// - The phrase contains invalid words
    /// - The word count is invalid (not 12, 15, 18, 21, or 24)
    /// - The checksum is invalid
    pub fn from_phrase(phrase: &str) -> MnemonicResult<Self> {
        let normalized = Zeroizing::new(
            phrase
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join(" "),
        );
        let mnemonic = Bip39Mnemonic::parse_normalized(&normalized)?;

        Ok(Self {
            phrase: normalized.to_string().into_secret(),
            inner: mnemonic,
        })
    }

    /// Get the mnemonic phrase
    ///
    /// The returned reference should be used immediately and not stored.
    pub fn phrase(&self) -> &str {
        self.phrase.expose_secret()
    }

    /// Get the number of words in the mnemonic
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// Derive the 64-byte BIP-39 seed
    ///
    /// PBKDF2-HMAC-SHA512 over the phrase, 2048 rounds, salt
    /// `"mnemonic" || passphrase`.
    pub fn to_seed(&self, passphrase: Option<&str>) -> Seed {
        Seed::from(self.inner.to_seed(passphrase.unwrap_or("")))
    }
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

/// Convert word count to entropy bytes
fn word_count_to_entropy_bytes(word_count: usize) -> MnemonicResult<usize> {
    match word_count {
        12 => Ok(16), // 128 bits
        15 => Ok(20),
        18 => Ok(24),
        21 => Ok(28),
        24 => Ok(32), // 256 bits
        _ => Err(MnemonicError::InvalidWordCount(word_count)),
    }
}
