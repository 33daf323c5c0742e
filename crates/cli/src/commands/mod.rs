//! hdkeys subcommands
//!
//! - `mnemonic`: Generate a fresh BIP-39 phrase
//! - `xprv`: Derive an extended key from a mnemonic
//! - `inspect`: Decode an `xprv`/`xpub` and show its metadata
//! - `import`: Derive a key and store it in an encrypted keystore
//! - `decrypt`: Unlock a keystore and show its address
//! - `list`: List keystores in the keys directory
//!
//! Passphrases are read from the terminal without echo unless a file is given.
//! Secrets are never logged.

pub mod common;
pub mod decrypt;
pub mod import;
pub mod inspect;
pub mod list;
pub mod mnemonic;
pub mod xprv;

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use hdkeys_crypto::{ScryptConfig, DEFAULT_DERIVATION_PATH_SECP256K1};
use std::path::{Path, PathBuf};

/// Scrypt cost presets for new keystores
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KdfPreset {
    /// n = 4096, p = 6
    Light,
    /// n = 262144, p = 1
    Standard,
}

impl KdfPreset {
    pub fn config(self) -> ScryptConfig {
        match self {
            KdfPreset::Light => ScryptConfig::LIGHT,
            KdfPreset::Standard => ScryptConfig::STANDARD,
        }
    }
}

/// Top-level subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a new BIP-39 mnemonic phrase
    Mnemonic {
        /// Number of words (12, 15, 18, 21 or 24)
        #[arg(long, default_value = "12")]
        words: usize,
    },

    /// Derive an extended private key from a mnemonic
    ///
    /// Prints the Base58Check `xprv` string, or the `xpub` with `--public`.
    Xprv {
        /// Read mnemonic from file instead of prompting
        #[arg(long)]
        mnemonic_file: Option<PathBuf>,

        /// Derivation path
        #[arg(long, default_value = DEFAULT_DERIVATION_PATH_SECP256K1)]
        path: String,

        /// Print the public extended key instead
        #[arg(long)]
        public: bool,
    },

    /// Decode an extended key and print its metadata
    Inspect {
        /// `xprv...` or `xpub...` string
        key: String,
    },

    /// Derive a key from a mnemonic and store it in an encrypted keystore
    ///
    /// The file is written as `UTC--<timestamp>--<address>.json` in the
    /// keys directory with owner-only permissions.
    Import {
        /// Read mnemonic from file instead of prompting
        #[arg(long)]
        mnemonic_file: Option<PathBuf>,

        /// Derivation path
        #[arg(long, default_value = DEFAULT_DERIVATION_PATH_SECP256K1)]
        path: String,

        /// Scrypt cost preset
        #[arg(long, value_enum, default_value_t = KdfPreset::Standard)]
        kdf: KdfPreset,

        /// Write a version 4 record (`addresses.root`) instead of version 3
        #[arg(long)]
        v4: bool,

        /// Read passphrase from file instead of prompting
        #[arg(long)]
        passphrase_file: Option<PathBuf>,

        /// Keys directory (default: <home>/keys)
        #[arg(long)]
        keys_dir: Option<PathBuf>,
    },

    /// Decrypt a keystore file and print its address
    Decrypt {
        /// Keystore file
        file: PathBuf,

        /// Read passphrase from file instead of prompting
        #[arg(long)]
        passphrase_file: Option<PathBuf>,
    },

    /// List keystores without decrypting them
    List {
        /// Keys directory (default: <home>/keys)
        #[arg(long)]
        keys_dir: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Execute a subcommand against the given home directory
pub fn execute_command(home: &Path, command: Command) -> Result<()> {
    match command {
        Command::Mnemonic { words } => mnemonic::execute(words),
        Command::Xprv {
            mnemonic_file,
            path,
            public,
        } => xprv::execute(mnemonic_file.as_deref(), &path, public),
        Command::Inspect { key } => inspect::execute(&key),
        Command::Import {
            mnemonic_file,
            path,
            kdf,
            v4,
            passphrase_file,
            keys_dir,
        } => import::execute(
            home,
            import::ImportOptions {
                mnemonic_file,
                path,
                kdf,
                v4,
                passphrase_file,
                keys_dir,
            },
        ),
        Command::Decrypt {
            file,
            passphrase_file,
        } => decrypt::execute(&file, passphrase_file.as_deref()),
        Command::List { keys_dir, format } => list::execute(home, keys_dir, &format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kdf_preset_config() {
        assert_eq!(KdfPreset::Light.config(), ScryptConfig::LIGHT);
        assert_eq!(KdfPreset::Standard.config(), ScryptConfig::STANDARD);
    }
}
