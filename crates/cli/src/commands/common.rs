//! Shared prompting and input helpers for the subcommands

use anyhow::{anyhow, Context, Result};
use hdkeys_crypto::{DerivationPath, Mnemonic};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Default keys directory name within home
pub const DEFAULT_KEYS_DIR: &str = "keys";

/// Minimum length for passphrases protecting new keystores
pub const MIN_PASSPHRASE_LENGTH: usize = 8;

/// Word counts accepted for mnemonic input
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Resolve keys directory: use provided path or `<home>/keys`
pub fn resolve_keys_dir(home: &Path, keys_dir: Option<PathBuf>) -> PathBuf {
    keys_dir.unwrap_or_else(|| home.join(DEFAULT_KEYS_DIR))
}

/// Parse a derivation path argument
pub fn parse_path(path: &str) -> Result<DerivationPath> {
    path.parse()
        .with_context(|| format!("Invalid derivation path: {}", path))
}

/// Read passphrase from file or prompt interactively
///
/// `confirm` is set when creating a keystore: the prompt is repeated and the
/// minimum length enforced.
pub fn get_passphrase(
    passphrase_file: Option<&Path>,
    prompt: &str,
    confirm: bool,
) -> Result<Zeroizing<String>> {
    let passphrase = match passphrase_file {
        Some(file) => read_passphrase_from_file(file)?,
        None => prompt_passphrase(prompt, confirm)?,
    };

    if confirm {
        validate_passphrase_strength(&passphrase)?;
    }

    Ok(passphrase)
}

/// Read passphrase from a file, trimming surrounding whitespace
pub fn read_passphrase_from_file(path: &Path) -> Result<Zeroizing<String>> {
    let content = Zeroizing::new(
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read passphrase file: {}", path.display()))?,
    );

    let passphrase = Zeroizing::new(content.trim().to_string());

    if passphrase.is_empty() {
        return Err(anyhow!("Passphrase file is empty"));
    }

    Ok(passphrase)
}

/// Prompt for passphrase with optional confirmation
pub fn prompt_passphrase(prompt: &str, confirm: bool) -> Result<Zeroizing<String>> {
    let passphrase = Zeroizing::new(
        rpassword::prompt_password(prompt).context("Failed to read passphrase")?,
    );

    if confirm {
        let confirmation = Zeroizing::new(
            rpassword::prompt_password("Confirm passphrase: ")
                .context("Failed to read passphrase confirmation")?,
        );

        if *passphrase != *confirmation {
            return Err(anyhow!("Passphrases do not match"));
        }
    }

    Ok(passphrase)
}

/// Reject passphrases shorter than [`MIN_PASSPHRASE_LENGTH`]
pub fn validate_passphrase_strength(passphrase: &str) -> Result<()> {
    if passphrase.chars().count() < MIN_PASSPHRASE_LENGTH {
        return Err(anyhow!(
            "Passphrase must be at least {} characters",
            MIN_PASSPHRASE_LENGTH
        ));
    }
    Ok(())
}

/// Read mnemonic from file or prompt interactively
pub fn get_mnemonic(mnemonic_file: Option<&Path>) -> Result<Mnemonic> {
    let phrase = match mnemonic_file {
        Some(file) => read_mnemonic_from_file(file)?,
        None => prompt_mnemonic()?,
    };

    Mnemonic::from_phrase(&phrase).context("Invalid mnemonic phrase")
}

/// Read mnemonic from a file
pub fn read_mnemonic_from_file(path: &Path) -> Result<Zeroizing<String>> {
    let content = Zeroizing::new(
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read mnemonic file: {}", path.display()))?,
    );

    let mnemonic = Zeroizing::new(content.trim().to_string());

    if mnemonic.is_empty() {
        return Err(anyhow!("Mnemonic file is empty"));
    }

    check_word_count(&mnemonic)?;
    Ok(mnemonic)
}

/// Prompt for mnemonic phrase on stdin
pub fn prompt_mnemonic() -> Result<Zeroizing<String>> {
    eprintln!("Enter your mnemonic phrase (12, 15, 18, 21, or 24 words):");
    eprint!("> ");
    io::stderr().flush()?;

    let mut input = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut input)?;

    let mnemonic = Zeroizing::new(input.trim().to_string());
    check_word_count(&mnemonic)?;
    Ok(mnemonic)
}

fn check_word_count(mnemonic: &str) -> Result<()> {
    let word_count = mnemonic.split_whitespace().count();
    if !VALID_WORD_COUNTS.contains(&word_count) {
        return Err(anyhow!(
            "Invalid mnemonic: expected 12, 15, 18, 21, or 24 words, got {}",
            word_count
        ));
    }
    Ok(())
}

/// Display warning about mnemonic security
pub fn display_mnemonic_warning(mnemonic: &str) {
    println!();
    println!("============================================================");
    println!("                    IMPORTANT - SAVE THIS!");
    println!("============================================================");
    println!();
    println!("Your mnemonic recovery phrase:");
    println!();

    // Words in groups of 4
    let words: Vec<&str> = mnemonic.split_whitespace().collect();
    for (i, chunk) in words.chunks(4).enumerate() {
        let start_num = i * 4 + 1;
        let formatted: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(j, word)| format!("{:2}. {:<12}", start_num + j, word))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    println!();
    println!("============================================================");
    println!("  This phrase is the ONLY way to recover your keys.");
    println!("  Store it securely offline. Never share it with anyone.");
    println!("============================================================");
    println!();
}
