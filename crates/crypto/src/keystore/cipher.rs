//! AES-128-CTR cipher for keystore encryption
//!
//! CTR mode provides confidentiality without padding; integrity comes from
//! the separate MAC.

use aes::Aes128;
use cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::error::{decode_hex, KeystoreError, KeystoreResult};
use crate::secure::{IntoSecret, SecretBytes};

/// The only cipher tag accepted
pub const CIPHER_AES_128_CTR: &str = "aes-128-ctr";

/// IV (initialization vector) length for AES-128-CTR
pub const IV_LENGTH: usize = 16;

/// AES-128 key length
pub const AES_KEY_LENGTH: usize = 16;

type Aes128Ctr = Ctr128BE<Aes128>;

/// Cipher parameters for AES-128-CTR
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CipherParams {
    /// Initialization vector as hex string
    pub iv: String,
}

impl CipherParams {
    pub fn new(iv: &[u8]) -> Self {
        Self {
            iv: hex::encode(iv),
        }
    }

    /// Decode and length-check the IV
    pub fn iv_bytes(&self) -> KeystoreResult<[u8; IV_LENGTH]> {
        let iv = decode_hex("cipherparams.iv", &self.iv)?;
        iv.as_slice().try_into().map_err(|_| {
            KeystoreError::InvalidCipherParams(format!(
                "IV must be {} bytes, got {}",
                IV_LENGTH,
                iv.len()
            ))
        })
    }
}

fn new_cipher(key: &[u8], iv: &[u8]) -> KeystoreResult<Aes128Ctr> {
    if key.len() < AES_KEY_LENGTH {
        return Err(KeystoreError::CryptoOperationFailed(format!(
            "cipher key must be at least {} bytes, got {}",
            AES_KEY_LENGTH,
            key.len()
        )));
    }

    // First 16 bytes of the derived key
    Aes128Ctr::new_from_slices(&key[..AES_KEY_LENGTH], iv)
        .map_err(|e| KeystoreError::InvalidCipherParams(e.to_string()))
}

/// Encrypt secret data using AES-128-CTR
///
/// # Arguments
///
/// * `secret` - The secret data to encrypt
/// * `derived_key` - KDF output; only the first 16 bytes are used
/// * `iv` - 16-byte initialization vector
///
/// # Returns
///
/// Ciphertext bytes
pub fn encrypt_secret(secret: &[u8], derived_key: &[u8], iv: &[u8]) -> KeystoreResult<Vec<u8>> {
    let mut cipher = new_cipher(derived_key, iv)?;

    let mut ciphertext = secret.to_vec();
    cipher.apply_keystream(&mut ciphertext);

    Ok(ciphertext)
}

/// Decrypt secret data using AES-128-CTR
///
/// # Returns
///
/// Decrypted secret as SecretBytes
pub fn decrypt_secret(
    ciphertext: &[u8],
    derived_key: &[u8],
    iv: &[u8],
) -> KeystoreResult<SecretBytes> {
    let mut cipher = new_cipher(derived_key, iv)?;

    let mut plaintext = ciphertext.to_vec();
    cipher.apply_keystream(&mut plaintext);

    Ok(plaintext.into_secret())
}

/// Generate a random IV
pub fn generate_iv() -> KeystoreResult<[u8; IV_LENGTH]> {
    let mut iv = [0u8; IV_LENGTH];
    rand::thread_rng()
        .try_fill_bytes(&mut iv)
        .map_err(|e| KeystoreError::CryptoOperationFailed(e.to_string()))?;
    Ok(iv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let secret = b"my-secret-key-material-32-bytes!";
        let key = vec![0xAA; 32];
        let iv = vec![0xBB; 16];

        let ciphertext = encrypt_secret(secret, &key, &iv).unwrap();
        assert_eq!(ciphertext.len(), secret.len());
        assert_ne!(&ciphertext, secret);

        let decrypted = decrypt_secret(&ciphertext, &key, &iv).unwrap();
        assert_eq!(decrypted.expose_secret(), secret);
    }

    #[test]
    fn test_only_first_half_of_key_used() {
        let secret = [0x42u8; 32];
        let iv = [0x01u8; 16];
        let mut key_a = [0xAAu8; 32];
        let key_b = [0xAAu8; 32];
        key_a[20] = 0x00;

        assert_eq!(
            encrypt_secret(&secret, &key_a, &iv).unwrap(),
            encrypt_secret(&secret, &key_b, &iv).unwrap()
        );
    }

    #[test]
    fn test_known_vector() {
        // NIST SP 800-38A F.5.1, first block
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv = hex::decode("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff").unwrap();
        let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let ciphertext = encrypt_secret(&plaintext, &key, &iv).unwrap();
        assert_eq!(hex::encode(ciphertext), "874d6191b620e3261bef6864990db6ce");
    }

    #[test]
    fn test_invalid_key_length() {
        let result = encrypt_secret(b"test", &[0xAA; 8], &[0xBB; 16]);
        assert!(matches!(result, Err(KeystoreError::CryptoOperationFailed(_))));
    }

    #[test]
    fn test_invalid_iv_length() {
        let result = encrypt_secret(b"test", &[0xAA; 32], &[0xBB; 8]);
        assert!(matches!(result, Err(KeystoreError::InvalidCipherParams(_))));
    }

    #[test]
    fn test_cipher_params() {
        let params = CipherParams::new(&[0xCC; 16]);
        assert_eq!(params.iv_bytes().unwrap(), [0xCC; 16]);

        let short = CipherParams::new(&[0xCC; 12]);
        assert!(matches!(
            short.iv_bytes(),
            Err(KeystoreError::InvalidCipherParams(_))
        ));

        let bad_hex = CipherParams { iv: "zz".to_string() };
        assert!(matches!(
            bad_hex.iv_bytes(),
            Err(KeystoreError::InvalidHex { field: "cipherparams.iv", .. })
        ));
    }

    #[test]
    fn test_generate_iv() {
        let iv1 = generate_iv().unwrap();
        let iv2 = generate_iv().unwrap();
        assert_ne!(iv1, iv2);
    }
}
