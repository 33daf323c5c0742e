//! Extended key model and child key derivation

use k256::{NonZeroScalar, ProjectivePoint, SecretKey as K256SecretKey};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::error::{Bip32Error, Bip32Result};
use super::master::hmac_sha512;
use super::path::DerivationPath;
use crate::secp256k1::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1SecretKey};

/// Chain code length in bytes
pub const CHAIN_CODE_SIZE: usize = 32;

/// Index offset for hardened children (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A node in the derivation tree
///
/// Bundles a key pair (private or public-only) with the chain code and the
/// metadata that locates it in the tree. Immutable: derivation returns new
/// values.
///
/// Invariant: `depth == 0` implies `parent_fingerprint == 0` and
/// `child_number == 0`.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    key_pair: Secp256k1KeyPair,
    chain_code: [u8; CHAIN_CODE_SIZE],
    depth: u8,
    parent_fingerprint: u32,
    child_number: u32,
}

impl ExtendedKey {
    /// Assemble an extended key from its fields
    ///
    /// Rejects a root (`depth == 0`) that names a parent or child number.
    pub fn new(
        key_pair: Secp256k1KeyPair,
        chain_code: [u8; CHAIN_CODE_SIZE],
        depth: u8,
        parent_fingerprint: u32,
        child_number: u32,
    ) -> Bip32Result<Self> {
        if depth == 0 && (parent_fingerprint != 0 || child_number != 0) {
            return Err(Bip32Error::InvalidFormat(format!(
                "root key with parent fingerprint {:08x} and child number {}",
                parent_fingerprint, child_number
            )));
        }

        Ok(Self {
            key_pair,
            chain_code,
            depth,
            parent_fingerprint,
            child_number,
        })
    }

    pub(crate) fn root(key_pair: Secp256k1KeyPair, chain_code: [u8; CHAIN_CODE_SIZE]) -> Self {
        Self {
            key_pair,
            chain_code,
            depth: 0,
            parent_fingerprint: 0,
            child_number: 0,
        }
    }

    pub fn key_pair(&self) -> &Secp256k1KeyPair {
        &self.key_pair
    }

    pub fn chain_code(&self) -> &[u8; CHAIN_CODE_SIZE] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> u32 {
        self.parent_fingerprint
    }

    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    /// Whether this node carries private material
    pub fn has_private_key(&self) -> bool {
        !self.key_pair.is_public_only()
    }

    /// Identifier of this node: first 4 bytes of RIPEMD160(SHA256(compressed pubkey))
    pub fn fingerprint(&self) -> u32 {
        let sha = Sha256::digest(self.key_pair.public_key.to_bytes());
        let hash160 = Ripemd160::digest(sha);
        u32::from_be_bytes([hash160[0], hash160[1], hash160[2], hash160[3]])
    }

    /// Public-only copy of this node
    pub fn neuter(&self) -> Self {
        Self {
            key_pair: self.key_pair.to_public_only(),
            ..self.clone()
        }
    }

    /// Derive the child at `index` (CKDpriv or CKDpub)
    ///
    /// Indices at or above [`HARDENED_OFFSET`] are hardened and need private
    /// material.
    pub fn derive_child(&self, index: u32) -> Bip32Result<Self> {
        let hardened = index >= HARDENED_OFFSET;
        let depth = self.depth.checked_add(1).ok_or(Bip32Error::DepthOverflow)?;

        // Hardened: 0x00 || ser256(k_par) || ser32(i), otherwise serP(K_par) || ser32(i)
        let mut data = Zeroizing::new(Vec::with_capacity(37));
        match (&self.key_pair.secret_key, hardened) {
            (Some(secret), true) => {
                data.push(0u8);
                data.extend_from_slice(&*secret.to_bytes());
            }
            (None, true) => return Err(Bip32Error::HardenedFromPublic(index)),
            _ => data.extend_from_slice(&self.key_pair.public_key.to_bytes()),
        }
        data.extend_from_slice(&index.to_be_bytes());

        let i = hmac_sha512(&self.chain_code, &data)?;
        let (il, ir) = i.expose_secret().split_at(32);

        let tweak = NonZeroScalar::try_from(il).map_err(|_| Bip32Error::InvalidChild(index))?;

        let key_pair = match &self.key_pair.secret_key {
            Some(secret) => {
                // k_child = (I_L + k_par) mod n
                let sum = *secret.as_inner().to_nonzero_scalar().as_ref() + tweak.as_ref();
                let scalar = Option::<NonZeroScalar>::from(NonZeroScalar::new(sum))
                    .ok_or(Bip32Error::InvalidChild(index))?;
                Secp256k1KeyPair::from_secret_key(Secp256k1SecretKey::from_inner(
                    K256SecretKey::from(scalar),
                ))
            }
            None => {
                // K_child = I_L * G + K_par
                let point = ProjectivePoint::GENERATOR * tweak.as_ref()
                    + self.key_pair.public_key.as_inner().to_projective();
                let public = k256::PublicKey::from_affine(point.to_affine())
                    .map_err(|_| Bip32Error::InvalidChild(index))?;
                Secp256k1KeyPair::public_only(Secp256k1PublicKey::from_inner(public))
            }
        };

        let mut chain_code = [0u8; CHAIN_CODE_SIZE];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            key_pair,
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: index,
        })
    }

    /// Derive every index along `path`, starting from this node
    pub fn derive_path(&self, path: &DerivationPath) -> Bip32Result<Self> {
        path.indices()
            .iter()
            .try_fold(self.clone(), |key, &index| key.derive_child(index))
    }
}

impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("key_pair", &self.key_pair)
            .field("depth", &self.depth)
            .field("parent_fingerprint", &format_args!("{:08x}", self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bip32::derive_master;
    use crate::secure::Seed;

    fn vector1_master() -> ExtendedKey {
        let seed = Seed::new(hex::decode("000102030405060708090a0b0c0d0e0f").unwrap());
        derive_master(&seed, false).unwrap()
    }

    #[test]
    fn test_root_invariant_enforced() {
        let master = vector1_master();
        let result = ExtendedKey::new(
            master.key_pair().clone(),
            *master.chain_code(),
            0,
            0xdeadbeef,
            0,
        );
        assert!(matches!(result, Err(Bip32Error::InvalidFormat(_))));

        let child = ExtendedKey::new(master.key_pair().clone(), *master.chain_code(), 1, 7, 3);
        assert!(child.is_ok());
    }

    #[test]
    fn test_master_fingerprint() {
        // BIP-32 test vector 1: m has identifier 3442193e...
        assert_eq!(vector1_master().fingerprint(), 0x3442193e);
    }

    #[test]
    fn test_child_metadata() {
        let master = vector1_master();
        let child = master.derive_child(HARDENED_OFFSET).unwrap();

        assert_eq!(child.depth(), 1);
        assert_eq!(child.parent_fingerprint(), master.fingerprint());
        assert_eq!(child.child_number(), HARDENED_OFFSET);
        assert!(child.has_private_key());
    }

    #[test]
    fn test_public_derivation_matches_private() {
        let master = vector1_master();
        let account = master.derive_child(HARDENED_OFFSET).unwrap();

        let from_private = account.derive_child(1).unwrap();
        let from_public = account.neuter().derive_child(1).unwrap();

        assert_eq!(from_public, from_private.neuter());
    }

    #[test]
    fn test_hardened_from_public_fails() {
        let public = vector1_master().neuter();
        assert_eq!(
            public.derive_child(HARDENED_OFFSET + 5).unwrap_err(),
            Bip32Error::HardenedFromPublic(HARDENED_OFFSET + 5)
        );
    }

    #[test]
    fn test_depth_overflow() {
        let master = vector1_master();
        let deep = ExtendedKey::new(
            master.key_pair().clone(),
            *master.chain_code(),
            u8::MAX,
            1,
            1,
        )
        .unwrap();
        assert_eq!(deep.derive_child(0).unwrap_err(), Bip32Error::DepthOverflow);
    }

    #[test]
    fn test_derive_path_matches_manual_steps() {
        let master = vector1_master();
        let path: DerivationPath = "m/0'/1".parse().unwrap();

        let via_path = master.derive_path(&path).unwrap();
        let manual = master
            .derive_child(HARDENED_OFFSET)
            .unwrap()
            .derive_child(1)
            .unwrap();

        assert_eq!(via_path, manual);
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", vector1_master());
        assert!(debug.contains("public_only: false"));
        assert!(!debug.contains("e8f32e723decf405"));
    }
}
