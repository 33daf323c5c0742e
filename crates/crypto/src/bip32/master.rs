//! Master key derivation from a seed

use hmac::{Hmac, Mac};
use k256::SecretKey as K256SecretKey;
use sha2::Sha512;

use super::error::{Bip32Error, Bip32Result};
use super::extended::{ExtendedKey, CHAIN_CODE_SIZE};
use crate::secp256k1::{Secp256k1KeyPair, Secp256k1SecretKey};
use crate::secure::{SecretArray, Seed};

/// HMAC key used for secp256k1 master key generation
pub const BITCOIN_SEED: &[u8; 12] = b"Bitcoin seed";

type HmacSha512 = Hmac<Sha512>;

/// Compute HMAC-SHA512 into a zeroize-on-drop buffer
pub(crate) fn hmac_sha512(key: &[u8], data: &[u8]) -> Bip32Result<SecretArray<64>> {
    let mut mac =
        HmacSha512::new_from_slice(key).map_err(|e| Bip32Error::CryptoFailure(e.to_string()))?;
    mac.update(data);
    let output = mac.finalize().into_bytes();

    SecretArray::from_slice(&output)
        .ok_or_else(|| Bip32Error::CryptoFailure("unexpected HMAC-SHA512 output length".into()))
}

/// Derive the root extended key from a seed
///
/// Computes `I = HMAC-SHA512("Bitcoin seed", seed)`, uses `I[..32]` as the
/// private scalar and `I[32..]` as the chain code. With `public_only` the
/// private component is stripped before returning.
///
/// # Errors
///
/// * `InvalidMasterKey` if `I[..32]` is zero or not below the curve order.
///   No retry happens here; callers pick different seed material.
/// * `CryptoFailure` if the HMAC provider fails.
///
/// # Example
///
/// ```rust
/// use hdkeys_crypto::bip32::derive_master;
/// use hdkeys_crypto::secure::Seed;
///
/// let seed = Seed::new(hex::decode("000102030405060708090a0b0c0d0e0f").unwrap());
/// let master = derive_master(&seed, false).unwrap();
/// assert_eq!(master.depth(), 0);
/// ```
pub fn derive_master(seed: &Seed, public_only: bool) -> Bip32Result<ExtendedKey> {
    let i = hmac_sha512(BITCOIN_SEED, seed.as_bytes())?;
    let (il, ir) = i.expose_secret().split_at(32);

    let secret = K256SecretKey::from_slice(il).map_err(|_| Bip32Error::InvalidMasterKey)?;
    let key_pair = Secp256k1KeyPair::from_secret_key(Secp256k1SecretKey::from_inner(secret));
    let key_pair = if public_only {
        key_pair.to_public_only()
    } else {
        key_pair
    };

    let mut chain_code = [0u8; CHAIN_CODE_SIZE];
    chain_code.copy_from_slice(ir);

    Ok(ExtendedKey::root(key_pair, chain_code))
}
