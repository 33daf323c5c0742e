//! Derivation path parsing

use std::fmt;
use std::str::FromStr;

use super::error::Bip32Error;
use super::extended::HARDENED_OFFSET;

/// Default derivation path for account keys (BIP-44, coin type 60)
pub const DEFAULT_DERIVATION_PATH_SECP256K1: &str = "m/44'/60'/0'/0/0";

/// A parsed BIP-32 derivation path
///
/// Hardened components are stored with [`HARDENED_OFFSET`] already applied.
/// The empty path (`m`) addresses the master key itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath {
    indices: Vec<u32>,
}

impl DerivationPath {
    /// Create a path from raw child indices
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    /// Child indices, hardened offset included
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of components (the depth the path reaches from a root)
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a component
    pub fn child(mut self, index: u32) -> Self {
        self.indices.push(index);
        self
    }
}

/// Parse a path such as `m/44'/60'/0'/0/0`
///
/// Hardened components accept `'`, `h` or `H` suffixes.
impl FromStr for DerivationPath {
    type Err = Bip32Error;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let path = path.trim();
        let mut parts = path.split('/');

        match parts.next() {
            Some("m") | Some("M") => {}
            _ => {
                return Err(Bip32Error::InvalidPath(
                    "path must start with 'm'".to_string(),
                ))
            }
        }

        let mut indices = Vec::new();
        for part in parts {
            let (num_str, hardened) = match part.strip_suffix(['\'', 'h', 'H']) {
                Some(stripped) => (stripped, true),
                None => (part, false),
            };

            let index: u32 = num_str
                .parse()
                .map_err(|_| Bip32Error::InvalidPath(format!("invalid path component: {:?}", part)))?;

            if index >= HARDENED_OFFSET {
                return Err(Bip32Error::InvalidPath(format!(
                    "path component out of range: {}",
                    part
                )));
            }

            indices.push(if hardened { index + HARDENED_OFFSET } else { index });
        }

        Ok(Self { indices })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for &index in &self.indices {
            if index >= HARDENED_OFFSET {
                write!(f, "/{}'", index - HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}
