//! Keystore MAC: `keccak256(derived_key[16..32] || ciphertext)`

use alloy_primitives::{keccak256, B256};
use subtle::ConstantTimeEq;

use super::error::{KeystoreError, KeystoreResult};

/// Compute the MAC over the second half of the derived key and the ciphertext
pub fn compute_mac(derived_key: &[u8], ciphertext: &[u8]) -> KeystoreResult<B256> {
    let mac_key = derived_key.get(16..32).ok_or_else(|| {
        KeystoreError::InvalidKdfParams(format!(
            "derived key must be at least 32 bytes, got {}",
            derived_key.len()
        ))
    })?;

    let mut preimage = Vec::with_capacity(mac_key.len() + ciphertext.len());
    preimage.extend_from_slice(mac_key);
    preimage.extend_from_slice(ciphertext);
    let mac = keccak256(&preimage);
    zeroize::Zeroize::zeroize(&mut preimage);

    Ok(mac)
}

/// Constant-time comparison of a recorded MAC against a computed one
pub fn verify_mac(expected: &[u8], computed: &B256) -> bool {
    expected.ct_eq(computed.as_slice()).into()
}
