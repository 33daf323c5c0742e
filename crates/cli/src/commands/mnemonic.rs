//! Mnemonic generation command

use super::common::display_mnemonic_warning;
use anyhow::{Context, Result};
use hdkeys_crypto::Mnemonic;
use tracing::info;

/// Execute the mnemonic command
pub fn execute(words: usize) -> Result<()> {
    let mnemonic =
        Mnemonic::generate_with_word_count(words).context("Failed to generate mnemonic")?;

    info!(words = mnemonic.word_count(), "Generated mnemonic");
    display_mnemonic_warning(mnemonic.phrase());

    Ok(())
}
