//! Extended key wire format
//!
//! Layout (78 bytes, big-endian):
//!
//! ```text
//! version(4) | depth(1) | parent_fingerprint(4) | child_number(4) | chain_code(32) | key(33)
//! ```
//!
//! The key field is `0x00 || k` for private keys and the compressed point
//! for public keys. The payload is carried as base58check text.

use std::str::FromStr;

use zeroize::Zeroizing;

use super::error::{Bip32Error, Bip32Result};
use super::extended::{ExtendedKey, CHAIN_CODE_SIZE};
use crate::secp256k1::{
    Secp256k1KeyPair, Secp256k1PublicKey, COMPRESSED_PUBLIC_KEY_SIZE, SECRET_KEY_SIZE,
};

/// Version tag of extended private keys (`xprv`)
pub const XPRV_VERSION: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];

/// Version tag of extended public keys (`xpub`)
pub const XPUB_VERSION: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];

/// Size of the binary payload
pub const EXTENDED_KEY_SIZE: usize = 78;

/// Positional reader over the fixed layout
struct FieldReader<'a> {
    bytes: &'a [u8],
}

impl<'a> FieldReader<'a> {
    fn take<const N: usize>(&mut self) -> Bip32Result<[u8; N]> {
        if self.bytes.len() < N {
            return Err(Bip32Error::InvalidFormat("truncated payload".to_string()));
        }
        let (head, rest) = self.bytes.split_at(N);
        self.bytes = rest;
        let mut out = [0u8; N];
        out.copy_from_slice(head);
        Ok(out)
    }

    fn u8(&mut self) -> Bip32Result<u8> {
        Ok(self.take::<1>()?[0])
    }

    fn u32(&mut self) -> Bip32Result<u32> {
        Ok(u32::from_be_bytes(self.take::<4>()?))
    }
}

impl ExtendedKey {
    /// Serialize into the 78-byte payload
    pub fn to_bytes(&self) -> [u8; EXTENDED_KEY_SIZE] {
        let key_field = Zeroizing::new(match &self.key_pair().secret_key {
            Some(secret) => {
                let mut field = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
                field[1..].copy_from_slice(&*secret.to_bytes());
                field
            }
            None => self.key_pair().public_key.to_bytes(),
        });
        let version = if self.has_private_key() {
            XPRV_VERSION
        } else {
            XPUB_VERSION
        };
        let depth = [self.depth()];
        let parent_fingerprint = self.parent_fingerprint().to_be_bytes();
        let child_number = self.child_number().to_be_bytes();

        let fields: [&[u8]; 6] = [
            &version,
            &depth,
            &parent_fingerprint,
            &child_number,
            self.chain_code(),
            &key_field[..],
        ];

        let mut out = [0u8; EXTENDED_KEY_SIZE];
        let mut offset = 0;
        for field in fields {
            out[offset..offset + field.len()].copy_from_slice(field);
            offset += field.len();
        }
        out
    }

    /// Parse the 78-byte payload
    pub fn from_bytes(bytes: &[u8]) -> Bip32Result<Self> {
        if bytes.len() != EXTENDED_KEY_SIZE {
            return Err(Bip32Error::InvalidFormat(format!(
                "expected {} bytes, got {}",
                EXTENDED_KEY_SIZE,
                bytes.len()
            )));
        }

        let mut reader = FieldReader { bytes };
        let version = reader.take::<4>()?;
        if version != XPRV_VERSION && version != XPUB_VERSION {
            return Err(Bip32Error::UnknownKeyVersion(version));
        }

        let depth = reader.u8()?;
        let parent_fingerprint = reader.u32()?;
        let child_number = reader.u32()?;
        let chain_code = reader.take::<CHAIN_CODE_SIZE>()?;

        let key_pair = if version == XPRV_VERSION {
            // Padding byte is consumed without checking it is zero
            let _padding = reader.u8()?;
            let secret = Zeroizing::new(reader.take::<SECRET_KEY_SIZE>()?);
            Secp256k1KeyPair::from_secret_bytes(&secret)?
        } else {
            let point = reader.take::<COMPRESSED_PUBLIC_KEY_SIZE>()?;
            Secp256k1KeyPair::public_only(Secp256k1PublicKey::from_bytes(&point)?)
        };

        ExtendedKey::new(key_pair, chain_code, depth, parent_fingerprint, child_number)
    }

    /// Render as `xprv...` or `xpub...`
    pub fn to_base58(&self) -> String {
        encode_extended_key(self)
    }
}

impl FromStr for ExtendedKey {
    type Err = Bip32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_extended_key(s)
    }
}

/// Encode an extended key as base58check text
pub fn encode_extended_key(key: &ExtendedKey) -> String {
    let payload = Zeroizing::new(key.to_bytes());
    bs58::encode(&payload[..]).with_check().into_string()
}

/// Decode base58check text into an extended key
///
/// # Errors
///
/// * `InvalidFormat` for bad base58, a bad checksum or a payload that is not 78 bytes
/// * `UnknownKeyVersion` if the version tag is neither xprv nor xpub
/// * `InvalidKey` if the key field is not a valid scalar or point
pub fn decode_extended_key(text: &str) -> Bip32Result<ExtendedKey> {
    let payload = Zeroizing::new(
        bs58::decode(text.trim())
            .with_check(None)
            .into_vec()
            .map_err(|e| Bip32Error::InvalidFormat(e.to_string()))?,
    );
    ExtendedKey::from_bytes(&payload)
}
