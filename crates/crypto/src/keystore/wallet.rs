//! Keystore record and the encrypt/decrypt operations
//!
//! The record follows the Web3 Secret Storage layout:
//!
//! ```json
//! {
//!   "address": "008aeeda4d805471df9b2a5b0f38a0c3bcba786b",
//!   "crypto": {
//!     "cipher": "aes-128-ctr",
//!     "cipherparams": { "iv": "..." },
//!     "ciphertext": "...",
//!     "kdf": "scrypt",
//!     "kdfparams": { "dklen": 32, "n": 262144, "p": 1, "r": 8, "salt": "..." },
//!     "mac": "..."
//!   },
//!   "id": "3198bc9c-6672-5ab3-d995-4942343ae5b6",
//!   "version": 3
//! }
//! ```

use std::collections::BTreeMap;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::cipher::{decrypt_secret, encrypt_secret, generate_iv, CipherParams, CIPHER_AES_128_CTR};
use super::error::{decode_hex, KeystoreError, KeystoreResult};
use super::kdf::{generate_salt, KdfParams, ScryptConfig, KDF_PBKDF2, KDF_SCRYPT};
use super::mac::{compute_mac, verify_mac};
use crate::error::CryptoError;
use crate::secp256k1::{Secp256k1KeyPair, SECRET_KEY_SIZE};

/// Record version with a single `address`
pub const VERSION_3: u32 = 3;

/// Record version with named `addresses`
pub const VERSION_4: u32 = 4;

/// Versions accepted by [`decrypt_keystore`]
pub const SUPPORTED_VERSIONS: [u32; 2] = [VERSION_3, VERSION_4];

/// Slot name used for the single key of a version 4 record
pub const ROOT_ADDRESS_SLOT: &str = "root";

/// Crypto section of a keystore record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletCrypto {
    /// Cipher identifier, must be "aes-128-ctr"
    pub cipher: String,
    /// Encrypted private key as hex string
    pub ciphertext: String,
    /// Cipher parameters
    pub cipherparams: CipherParams,
    /// KDF identifier, "scrypt" or "pbkdf2"
    pub kdf: String,
    /// KDF parameters, shape must agree with `kdf`
    pub kdfparams: KdfParams,
    /// MAC as hex string
    pub mac: String,
}

/// Password-protected key record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Keystore {
    /// Address of the key, lowercase hex without 0x (version 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Named addresses (version 4)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<BTreeMap<String, String>>,

    /// Encrypted key and parameters; MyEtherWallet writes this as "Crypto"
    #[serde(alias = "Crypto")]
    pub crypto: WalletCrypto,

    /// Record identifier, informational only
    pub id: String,

    /// Format version
    pub version: u32,
}

impl Keystore {
    /// Parse a keystore from JSON
    pub fn from_json(json: &str) -> KeystoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> KeystoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The address recorded in the file, if any
    ///
    /// Informational only; never used to authenticate the record.
    pub fn address_hint(&self) -> Option<&str> {
        if let Some(address) = &self.address {
            return Some(address);
        }
        let addresses = self.addresses.as_ref()?;
        addresses
            .get(ROOT_ADDRESS_SLOT)
            .or_else(|| addresses.values().next())
            .map(String::as_str)
    }
}

/// Check that a record can be decrypted by this crate
///
/// Runs to completion before any KDF or cipher work.
///
/// # Errors
///
/// `UnsupportedKeystore` if the version, cipher or KDF tag is not supported,
/// or if the KDF tag and the shape of `kdfparams` disagree.
pub fn validate_keystore_structure(keystore: &Keystore) -> KeystoreResult<()> {
    if !SUPPORTED_VERSIONS.contains(&keystore.version) {
        return Err(KeystoreError::UnsupportedKeystore(format!(
            "version {} (supported: 3, 4)",
            keystore.version
        )));
    }

    let crypto = &keystore.crypto;
    if crypto.cipher != CIPHER_AES_128_CTR {
        return Err(KeystoreError::UnsupportedKeystore(format!(
            "cipher {:?}",
            crypto.cipher
        )));
    }

    if crypto.kdf != KDF_SCRYPT && crypto.kdf != KDF_PBKDF2 {
        return Err(KeystoreError::UnsupportedKeystore(format!(
            "kdf {:?}",
            crypto.kdf
        )));
    }

    if crypto.kdf != crypto.kdfparams.tag() {
        return Err(KeystoreError::UnsupportedKeystore(format!(
            "kdf {:?} with {} parameters",
            crypto.kdf,
            crypto.kdfparams.tag()
        )));
    }

    Ok(())
}

fn encrypt_with(
    key_pair: &Secp256k1KeyPair,
    password: &[u8],
    config: ScryptConfig,
) -> KeystoreResult<WalletCrypto> {
    if key_pair.is_public_only() {
        return Err(KeystoreError::InvalidKey(CryptoError::InvalidSecretKey));
    }

    let salt = generate_salt()?;
    let iv = generate_iv()?;

    let kdfparams = config.to_params(&salt);
    let derived_key = kdfparams.derive_key(password)?;

    let secret = key_pair.secret_bytes();
    let ciphertext = encrypt_secret(&secret[..], derived_key.expose_secret(), &iv)?;
    let mac = compute_mac(derived_key.expose_secret(), &ciphertext)?;

    Ok(WalletCrypto {
        cipher: CIPHER_AES_128_CTR.to_string(),
        ciphertext: hex::encode(&ciphertext),
        cipherparams: CipherParams::new(&iv),
        kdf: KDF_SCRYPT.to_string(),
        kdfparams,
        mac: hex::encode(mac),
    })
}

fn address_hex(key_pair: &Secp256k1KeyPair) -> String {
    hex::encode(key_pair.evm_address())
}

/// Encrypt a key pair into a version 3 record
///
/// # Arguments
///
/// * `key_pair` - Key pair with private material
/// * `password` - Password bytes
/// * `config` - scrypt cost, e.g. [`ScryptConfig::LIGHT`] or [`ScryptConfig::STANDARD`]
///
/// # Errors
///
/// * `InvalidKey` if the key pair is public-only
/// * `CryptoOperationFailed` if the RNG, KDF or cipher fails
///
/// # Example
///
/// ```rust
/// use hdkeys_crypto::keystore::{decrypt_keystore, encrypt_keystore, ScryptConfig};
/// use hdkeys_crypto::Secp256k1KeyPair;
///
/// let key_pair = Secp256k1KeyPair::generate(&mut rand::thread_rng());
/// let keystore = encrypt_keystore(&key_pair, b"password", ScryptConfig::LIGHT).unwrap();
///
/// let decrypted = decrypt_keystore(&keystore, b"password").unwrap();
/// assert_eq!(decrypted, key_pair);
/// ```
pub fn encrypt_keystore(
    key_pair: &Secp256k1KeyPair,
    password: &[u8],
    config: ScryptConfig,
) -> KeystoreResult<Keystore> {
    let crypto = encrypt_with(key_pair, password, config)?;

    Ok(Keystore {
        address: Some(address_hex(key_pair)),
        addresses: None,
        crypto,
        id: Uuid::new_v4().to_string(),
        version: VERSION_3,
    })
}

/// Encrypt a key pair into a version 4 record with `addresses = {"root": ...}`
pub fn encrypt_keystore_v4(
    key_pair: &Secp256k1KeyPair,
    password: &[u8],
    config: ScryptConfig,
) -> KeystoreResult<Keystore> {
    let crypto = encrypt_with(key_pair, password, config)?;
    let addresses = BTreeMap::from([(ROOT_ADDRESS_SLOT.to_string(), address_hex(key_pair))]);

    Ok(Keystore {
        address: None,
        addresses: Some(addresses),
        crypto,
        id: Uuid::new_v4().to_string(),
        version: VERSION_4,
    })
}

/// Decrypt a record with the given password
///
/// Order: validate structure, derive the key, verify the MAC, decrypt.
/// Nothing is decrypted unless the MAC matches.
///
/// # Errors
///
/// * `UnsupportedKeystore` from [`validate_keystore_structure`]
/// * `UnsupportedPrf` for a PBKDF2 PRF other than hmac-sha256
/// * `InvalidKdfParams`, `InvalidCipherParams`, `InvalidHex` for unusable fields
/// * `WrongPassword` if the MAC does not match
/// * `InvalidKey` if the plaintext is not a valid secp256k1 scalar
pub fn decrypt_keystore(keystore: &Keystore, password: &[u8]) -> KeystoreResult<Secp256k1KeyPair> {
    validate_keystore_structure(keystore)?;
    let crypto = &keystore.crypto;

    let ciphertext = decode_hex("ciphertext", &crypto.ciphertext)?;
    let expected_mac = decode_hex("mac", &crypto.mac)?;

    let derived_key = crypto.kdfparams.derive_key(password)?;
    let mac = compute_mac(derived_key.expose_secret(), &ciphertext)?;
    if !verify_mac(&expected_mac, &mac) {
        return Err(KeystoreError::WrongPassword);
    }

    let iv = crypto.cipherparams.iv_bytes()?;
    let plaintext = decrypt_secret(&ciphertext, derived_key.expose_secret(), &iv)?;
    let plaintext = plaintext.expose_secret();

    if plaintext.len() > SECRET_KEY_SIZE {
        return Err(KeystoreError::InvalidKey(CryptoError::InvalidSecretKey));
    }
    // Left-pad short keys
    let mut secret = Zeroizing::new([0u8; SECRET_KEY_SIZE]);
    secret[SECRET_KEY_SIZE - plaintext.len()..].copy_from_slice(plaintext);

    Ok(Secp256k1KeyPair::from_secret_bytes(&secret)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // Cheap parameters for unit tests
    const TEST_CONFIG: ScryptConfig = ScryptConfig { n: 1 << 10, p: 1 };

    fn test_key_pair() -> Secp256k1KeyPair {
        let secret: [u8; 32] =
            hex::decode("7a28b5ba57c53603b0b07b56bba752f7784bf506fa95edc395f5cf6c7514fe9d")
                .unwrap()
                .try_into()
                .unwrap();
        Secp256k1KeyPair::from_secret_bytes(&secret).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key_pair = test_key_pair();
        let keystore = encrypt_keystore(&key_pair, b"password", TEST_CONFIG).unwrap();

        assert_eq!(keystore.version, VERSION_3);
        assert_eq!(keystore.crypto.cipher, "aes-128-ctr");
        assert_eq!(keystore.crypto.kdf, "scrypt");
        assert_eq!(
            keystore.address.as_deref(),
            Some("008aeeda4d805471df9b2a5b0f38a0c3bcba786b")
        );

        let decrypted = decrypt_keystore(&keystore, b"password").unwrap();
        assert_eq!(decrypted, key_pair);
    }

    #[test]
    fn test_v4_roundtrip() {
        let key_pair = test_key_pair();
        let keystore = encrypt_keystore_v4(&key_pair, b"password", TEST_CONFIG).unwrap();

        assert_eq!(keystore.version, VERSION_4);
        assert!(keystore.address.is_none());
        assert_eq!(
            keystore.address_hint(),
            Some("008aeeda4d805471df9b2a5b0f38a0c3bcba786b")
        );
        assert_eq!(decrypt_keystore(&keystore, b"password").unwrap(), key_pair);
    }

    #[test]
    fn test_wrong_password() {
        let keystore = encrypt_keystore(&test_key_pair(), b"pw1", TEST_CONFIG).unwrap();

        let err = decrypt_keystore(&keystore, b"pw2").unwrap_err();
        assert!(matches!(err, KeystoreError::WrongPassword));
        assert_eq!(err.kind(), ErrorKind::Authentication);
    }

    #[test]
    fn test_fresh_salt_iv_and_id() {
        let key_pair = test_key_pair();
        let a = encrypt_keystore(&key_pair, b"password", TEST_CONFIG).unwrap();
        let b = encrypt_keystore(&key_pair, b"password", TEST_CONFIG).unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(a.crypto.cipherparams, b.crypto.cipherparams);
        assert_ne!(a.crypto.kdfparams, b.crypto.kdfparams);
        assert_ne!(a.crypto.ciphertext, b.crypto.ciphertext);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_public_only_rejected() {
        let public = test_key_pair().to_public_only();
        assert!(matches!(
            encrypt_keystore(&public, b"password", TEST_CONFIG),
            Err(KeystoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut keystore = encrypt_keystore(&test_key_pair(), b"password", TEST_CONFIG).unwrap();
        keystore.version = 2;

        let err = decrypt_keystore(&keystore, b"password").unwrap_err();
        assert!(matches!(err, KeystoreError::UnsupportedKeystore(_)));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_unsupported_cipher() {
        let mut keystore = encrypt_keystore(&test_key_pair(), b"password", TEST_CONFIG).unwrap();
        keystore.crypto.cipher = "aes-128-cbc".to_string();

        assert!(matches!(
            validate_keystore_structure(&keystore),
            Err(KeystoreError::UnsupportedKeystore(_))
        ));
    }

    #[test]
    fn test_unknown_kdf() {
        let mut keystore = encrypt_keystore(&test_key_pair(), b"password", TEST_CONFIG).unwrap();
        keystore.crypto.kdf = "argon2".to_string();

        assert!(matches!(
            validate_keystore_structure(&keystore),
            Err(KeystoreError::UnsupportedKeystore(_))
        ));
    }

    #[test]
    fn test_kdf_shape_mismatch() {
        let mut keystore = encrypt_keystore(&test_key_pair(), b"password", TEST_CONFIG).unwrap();
        keystore.crypto.kdfparams = KdfParams::Pbkdf2 {
            // Large enough that running it would be noticeable
            c: u32::MAX,
            dklen: 32,
            prf: "hmac-sha256".to_string(),
            salt: hex::encode([0u8; 32]),
        };

        let err = decrypt_keystore(&keystore, b"password").unwrap_err();
        assert!(matches!(err, KeystoreError::UnsupportedKeystore(_)));
    }

    #[test]
    fn test_tampered_ciphertext() {
        let mut keystore = encrypt_keystore(&test_key_pair(), b"password", TEST_CONFIG).unwrap();
        let mut ciphertext = hex::decode(&keystore.crypto.ciphertext).unwrap();
        ciphertext[0] ^= 0xFF;
        keystore.crypto.ciphertext = hex::encode(ciphertext);

        assert!(matches!(
            decrypt_keystore(&keystore, b"password"),
            Err(KeystoreError::WrongPassword)
        ));
    }

    #[test]
    fn test_bad_iv_after_mac() {
        let mut keystore = encrypt_keystore(&test_key_pair(), b"password", TEST_CONFIG).unwrap();
        keystore.crypto.cipherparams = CipherParams::new(&[0u8; 8]);

        assert!(matches!(
            decrypt_keystore(&keystore, b"password"),
            Err(KeystoreError::InvalidCipherParams(_))
        ));
        // Wrong password still reports the MAC failure first
        assert!(matches!(
            decrypt_keystore(&keystore, b"other"),
            Err(KeystoreError::WrongPassword)
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let keystore = encrypt_keystore(&test_key_pair(), b"password", TEST_CONFIG).unwrap();
        let json = keystore.to_json().unwrap();

        assert!(json.contains("\"kdfparams\""));
        assert!(!json.contains("\"addresses\""));

        let parsed = Keystore::from_json(&json).unwrap();
        assert_eq!(parsed, keystore);
    }

    #[test]
    fn test_capitalized_crypto_key() {
        let keystore = encrypt_keystore(&test_key_pair(), b"password", TEST_CONFIG).unwrap();
        let json = keystore.to_json().unwrap().replace("\"crypto\"", "\"Crypto\"");

        let parsed = Keystore::from_json(&json).unwrap();
        assert_eq!(decrypt_keystore(&parsed, b"password").unwrap(), test_key_pair());
    }

    #[test]
    fn test_invalid_json() {
        let err = Keystore::from_json("{\"version\": 3}").unwrap_err();
        assert!(matches!(err, KeystoreError::Json(_)));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
}
