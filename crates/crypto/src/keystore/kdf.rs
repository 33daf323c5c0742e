//! Key Derivation Function (KDF) implementation
//!
//! Two interchangeable variants, selected by the record's `kdf` tag:
//! scrypt (written by this crate) and PBKDF2-HMAC-SHA256 (read only).

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::error::{decode_hex, KeystoreError, KeystoreResult};
use crate::secure::{IntoSecret, SecretBytes};

/// `kdf` tag for scrypt
pub const KDF_SCRYPT: &str = "scrypt";

/// `kdf` tag for PBKDF2
pub const KDF_PBKDF2: &str = "pbkdf2";

/// The only PBKDF2 PRF accepted
pub const PRF_HMAC_SHA256: &str = "hmac-sha256";

/// scrypt block size used when encrypting
pub const SCRYPT_R: u32 = 8;

/// Derived key length in bytes
pub const DKLEN: u32 = 32;

/// Salt length in bytes
pub const SALT_LENGTH: usize = 32;

const MAX_DKLEN: u32 = 64;

/// Upper bound on scrypt working memory (`128 * r * n` and `128 * r * p`)
pub const MAX_SCRYPT_MEMORY: u64 = 1 << 30;

fn default_dklen() -> u32 {
    DKLEN
}

/// scrypt cost chosen by the caller when encrypting
///
/// `r` is always 8 and the output is always 32 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptConfig {
    /// CPU/memory cost (power of 2)
    pub n: u32,
    /// Parallelization
    pub p: u32,
}

impl ScryptConfig {
    /// Low-cost preset: n = 2^12, p = 6
    pub const LIGHT: ScryptConfig = ScryptConfig { n: 1 << 12, p: 6 };

    /// High-cost preset: n = 2^18, p = 1
    pub const STANDARD: ScryptConfig = ScryptConfig { n: 1 << 18, p: 1 };

    pub fn new(n: u32, p: u32) -> Self {
        Self { n, p }
    }

    /// Record parameters for this cost and a fresh salt
    pub fn to_params(&self, salt: &[u8]) -> KdfParams {
        KdfParams::Scrypt {
            dklen: DKLEN,
            n: self.n,
            p: self.p,
            r: SCRYPT_R,
            salt: hex::encode(salt),
        }
    }
}

/// KDF parameters, one shape per algorithm
///
/// Parsed by shape, not by the `kdf` tag, so that a record whose tag and
/// shape disagree can be detected and rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum KdfParams {
    /// scrypt parameters
    Scrypt {
        /// Derived key length in bytes
        #[serde(default = "default_dklen")]
        dklen: u32,
        /// CPU/memory cost parameter (must be power of 2)
        n: u32,
        /// Parallelization parameter
        p: u32,
        /// Block size parameter
        r: u32,
        /// Salt as hex string
        salt: String,
    },
    /// PBKDF2 parameters
    Pbkdf2 {
        /// Iteration count
        c: u32,
        /// Derived key length in bytes
        #[serde(default = "default_dklen")]
        dklen: u32,
        /// Pseudo-random function, must be "hmac-sha256"
        prf: String,
        /// Salt as hex string
        salt: String,
    },
}

impl KdfParams {
    /// The `kdf` tag matching this shape
    pub fn tag(&self) -> &'static str {
        match self {
            KdfParams::Scrypt { .. } => KDF_SCRYPT,
            KdfParams::Pbkdf2 { .. } => KDF_PBKDF2,
        }
    }

    /// Declared output length
    pub fn dklen(&self) -> u32 {
        match self {
            KdfParams::Scrypt { dklen, .. } | KdfParams::Pbkdf2 { dklen, .. } => *dklen,
        }
    }

    /// Validate the parameters
    pub fn validate(&self) -> KeystoreResult<()> {
        let dklen = self.dklen();
        if !(DKLEN..=MAX_DKLEN).contains(&dklen) {
            return Err(KeystoreError::InvalidKdfParams(format!(
                "dklen must be between {} and {}, got {}",
                DKLEN, MAX_DKLEN, dklen
            )));
        }

        match self {
            KdfParams::Scrypt { n, r, p, .. } => {
                if *n < 2 || !n.is_power_of_two() {
                    return Err(KeystoreError::InvalidKdfParams(
                        "n must be a power of 2 greater than 1".to_string(),
                    ));
                }
                if *r == 0 || *p == 0 {
                    return Err(KeystoreError::InvalidKdfParams(
                        "r and p must be positive".to_string(),
                    ));
                }
                check_scrypt_memory(*n, *r, *p)
            }
            KdfParams::Pbkdf2 { c, .. } => {
                if *c == 0 {
                    return Err(KeystoreError::InvalidKdfParams(
                        "c must be positive".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Derive a key from the given password
    ///
    /// # Errors
    ///
    /// * `UnsupportedPrf` for a PBKDF2 PRF other than hmac-sha256
    /// * `InvalidKdfParams` if the parameters are out of range
    /// * `InvalidHex` if the salt is not hex
    pub fn derive_key(&self, password: &[u8]) -> KeystoreResult<SecretBytes> {
        self.validate()?;

        match self {
            KdfParams::Scrypt {
                dklen,
                n,
                r,
                p,
                salt,
            } => {
                let salt = decode_hex("kdfparams.salt", salt)?;
                scrypt_derive_key(password, &salt, *n, *r, *p, *dklen as usize)
            }
            KdfParams::Pbkdf2 { c, prf, salt, .. } => {
                if prf != PRF_HMAC_SHA256 {
                    return Err(KeystoreError::UnsupportedPrf(prf.clone()));
                }
                let salt = decode_hex("kdfparams.salt", salt)?;
                Ok(pbkdf2_derive_key(password, &salt, *c))
            }
        }
    }
}

/// Reject scrypt costs whose buffers would exceed [`MAX_SCRYPT_MEMORY`]
fn check_scrypt_memory(n: u32, r: u32, p: u32) -> KeystoreResult<()> {
    let block = 128u64 * u64::from(r);
    let within = |count: u32| {
        block
            .checked_mul(u64::from(count))
            .is_some_and(|bytes| bytes <= MAX_SCRYPT_MEMORY)
    };

    if within(n) && within(p) {
        Ok(())
    } else {
        Err(KeystoreError::InvalidKdfParams(format!(
            "scrypt n = {}, r = {}, p = {} needs more than {} bytes",
            n, r, p, MAX_SCRYPT_MEMORY
        )))
    }
}

/// Derive a key using scrypt KDF
///
/// # Arguments
///
/// * `password` - User password bytes
/// * `salt` - Random salt bytes
/// * `n` - CPU/memory cost parameter (must be power of 2)
/// * `r` - Block size parameter
/// * `p` - Parallelization parameter
/// * `dklen` - Desired key length in bytes
///
/// # Returns
///
/// Derived key as SecretBytes
pub fn scrypt_derive_key(
    password: &[u8],
    salt: &[u8],
    n: u32,
    r: u32,
    p: u32,
    dklen: usize,
) -> KeystoreResult<SecretBytes> {
    check_scrypt_memory(n, r, p)?;

    let log_n = u8::try_from(n.trailing_zeros())
        .map_err(|_| KeystoreError::InvalidKdfParams("n out of range".to_string()))?;

    let params = scrypt::Params::new(log_n, r, p, dklen)
        .map_err(|e| KeystoreError::InvalidKdfParams(format!("scrypt: {}", e)))?;

    let mut output = vec![0u8; dklen];
    scrypt::scrypt(password, salt, &params, &mut output)
        .map_err(|e| KeystoreError::CryptoOperationFailed(e.to_string()))?;

    Ok(output.into_secret())
}

/// Derive a 32-byte key using PBKDF2-HMAC-SHA256
pub fn pbkdf2_derive_key(password: &[u8], salt: &[u8], rounds: u32) -> SecretBytes {
    let mut output = vec![0u8; DKLEN as usize];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut output);
    output.into_secret()
}

/// Generate a random salt
pub fn generate_salt() -> KeystoreResult<Vec<u8>> {
    let mut salt = vec![0u8; SALT_LENGTH];
    rand::thread_rng()
        .try_fill_bytes(&mut salt)
        .map_err(|e| KeystoreError::CryptoOperationFailed(e.to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn scrypt_params(n: u32, r: u32, p: u32, dklen: u32) -> KdfParams {
        KdfParams::Scrypt {
            dklen,
            n,
            p,
            r,
            salt: hex::encode([0xAA; 32]),
        }
    }

    #[test]
    fn test_scrypt_derive_key() {
        let salt = vec![0xAA; 32];

        let derived = scrypt_derive_key(b"test-passphrase", &salt, 1024, 8, 1, 32).unwrap();
        assert_eq!(derived.expose_secret().len(), 32);

        let derived2 = scrypt_derive_key(b"test-passphrase", &salt, 1024, 8, 1, 32).unwrap();
        assert_eq!(derived.expose_secret(), derived2.expose_secret());

        let derived3 = scrypt_derive_key(b"different", &salt, 1024, 8, 1, 32).unwrap();
        assert_ne!(derived.expose_secret(), derived3.expose_secret());
    }

    #[test]
    fn test_scrypt_rfc7914_vector() {
        // RFC 7914 section 12, second vector
        let derived = scrypt_derive_key(b"password", b"NaCl", 1024, 8, 16, 64).unwrap();
        assert_eq!(
            hex::encode(derived.expose_secret()),
            "fdbabe1c9d3472007856e7190d01e9fe7c6ad7cbc8237830e77376634b373162\
             2eaf30d92e22a3886ff109279d9830dac727afb94a83ee6d8360cbdfa2cc0640"
        );
    }

    #[test]
    fn test_pbkdf2_rfc7914_vector() {
        // RFC 7914 section 11, first 32 bytes
        let derived = pbkdf2_derive_key(b"passwd", b"salt", 1);
        assert_eq!(
            hex::encode(derived.expose_secret()),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_kdf_params_validation() {
        assert!(scrypt_params(16384, 8, 1, 32).validate().is_ok());

        // n not power of 2
        assert!(scrypt_params(12345, 8, 1, 32).validate().is_err());
        // dklen too small
        assert!(scrypt_params(16384, 8, 1, 16).validate().is_err());
        // r zero
        assert!(scrypt_params(16384, 0, 1, 32).validate().is_err());

        let pbkdf2 = KdfParams::Pbkdf2 {
            c: 0,
            dklen: 32,
            prf: PRF_HMAC_SHA256.to_string(),
            salt: String::new(),
        };
        assert!(matches!(
            pbkdf2.validate(),
            Err(KeystoreError::InvalidKdfParams(_))
        ));
    }

    #[test]
    fn test_scrypt_bound_for_r() {
        // n must stay below 2^(16 r)
        let err = scrypt_params(1 << 18, 1, 8, 32).derive_key(b"pw").unwrap_err();
        assert!(matches!(err, KeystoreError::InvalidKdfParams(_)));
    }

    #[test]
    fn test_scrypt_memory_cap() {
        // 128 * 8 * 2^31 bytes, refused before any allocation
        let huge = scrypt_params(1 << 31, 8, 1, 32);
        assert!(matches!(
            huge.validate(),
            Err(KeystoreError::InvalidKdfParams(_))
        ));
        assert!(matches!(
            huge.derive_key(b"pw"),
            Err(KeystoreError::InvalidKdfParams(_))
        ));
        assert!(matches!(
            scrypt_derive_key(b"pw", b"salt", 1 << 31, 8, 1, 32),
            Err(KeystoreError::InvalidKdfParams(_))
        ));

        // Overflowing block size
        assert!(scrypt_params(1 << 20, u32::MAX, 1, 32).validate().is_err());
        // Parallel buffers count too
        assert!(scrypt_params(1 << 10, 8, u32::MAX, 32).validate().is_err());

        // 1 GiB exactly is allowed; STANDARD needs 256 MiB
        assert!(scrypt_params(1 << 20, 8, 1, 32).validate().is_ok());
        assert!(ScryptConfig::STANDARD.to_params(&[0; 32]).validate().is_ok());
    }

    #[test]
    fn test_unsupported_prf() {
        let params = KdfParams::Pbkdf2 {
            c: 1,
            dklen: 32,
            prf: "hmac-sha512".to_string(),
            salt: hex::encode([0u8; 32]),
        };
        assert!(matches!(
            params.derive_key(b"pw"),
            Err(KeystoreError::UnsupportedPrf(prf)) if prf == "hmac-sha512"
        ));
    }

    #[test]
    fn test_untagged_parsing_by_shape() {
        let scrypt: KdfParams =
            serde_json::from_str(r#"{"dklen":32,"n":262144,"p":1,"r":8,"salt":"ab"}"#).unwrap();
        assert_eq!(scrypt.tag(), KDF_SCRYPT);

        let pbkdf2: KdfParams =
            serde_json::from_str(r#"{"c":262144,"dklen":32,"prf":"hmac-sha256","salt":"ab"}"#)
                .unwrap();
        assert_eq!(pbkdf2.tag(), KDF_PBKDF2);

        // dklen defaults when absent
        let bare: KdfParams = serde_json::from_str(r#"{"n":2,"p":1,"r":8,"salt":"ab"}"#).unwrap();
        assert_eq!(bare.dklen(), DKLEN);

        assert!(serde_json::from_str::<KdfParams>(r#"{"salt":"ab"}"#).is_err());
    }

    #[test]
    fn test_presets() {
        assert_eq!(ScryptConfig::LIGHT, ScryptConfig::new(4096, 6));
        assert_eq!(ScryptConfig::STANDARD, ScryptConfig::new(262144, 1));

        let params = ScryptConfig::LIGHT.to_params(&[0xBB; 32]);
        assert!(params.validate().is_ok());
        assert_eq!(params.tag(), KDF_SCRYPT);
    }

    #[test]
    fn test_generate_salt() {
        let salt1 = generate_salt().unwrap();
        let salt2 = generate_salt().unwrap();

        assert_eq!(salt1.len(), SALT_LENGTH);
        assert_ne!(salt1, salt2);
    }
}
