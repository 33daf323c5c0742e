//! Extended key inspection command

use anyhow::{Context, Result};
use hdkeys_crypto::bip32::HARDENED_OFFSET;
use hdkeys_crypto::{decode_extended_key, ExtendedKey};
use tracing::debug;

/// Public metadata of an extended key
#[derive(Debug, PartialEq, Eq)]
pub struct KeyInfo {
    pub kind: &'static str,
    pub depth: u8,
    pub parent_fingerprint: String,
    pub child_number: String,
    pub fingerprint: String,
    pub public_key: String,
    pub address: String,
}

impl KeyInfo {
    pub fn from_key(key: &ExtendedKey) -> Self {
        Self {
            kind: if key.has_private_key() { "xprv" } else { "xpub" },
            depth: key.depth(),
            parent_fingerprint: format!("{:08x}", key.parent_fingerprint()),
            child_number: format_child_number(key.child_number()),
            fingerprint: format!("{:08x}", key.fingerprint()),
            public_key: hex::encode(key.key_pair().public_key.to_bytes()),
            address: key.key_pair().evm_address().to_string(),
        }
    }
}

/// Render a child number with `'` for hardened indices
pub fn format_child_number(index: u32) -> String {
    if index >= HARDENED_OFFSET {
        format!("{}'", index - HARDENED_OFFSET)
    } else {
        index.to_string()
    }
}

/// Execute the inspect command
pub fn execute(text: &str) -> Result<()> {
    let key = decode_extended_key(text.trim()).context("Failed to decode extended key")?;
    let info = KeyInfo::from_key(&key);
    debug!(kind = info.kind, depth = info.depth, "Decoded extended key");

    println!("Type:               {}", info.kind);
    println!("Depth:              {}", info.depth);
    println!("Parent fingerprint: {}", info.parent_fingerprint);
    println!("Child number:       {}", info.child_number);
    println!("Fingerprint:        {}", info.fingerprint);
    println!("Public key:         {}", info.public_key);
    println!("Address:            {}", info.address);

    Ok(())
}
