//! hdkeys command-line application
//!
//! Thin layer over `hdkeys-crypto`: prompting, file storage and output.

pub mod commands;
pub mod store;

pub use commands::{execute_command, Command, KdfPreset};

/// Environment variable overriding the home directory
pub const HDKEYS_HOME_ENV: &str = "HDKEYS_HOME";

/// Home directory name under the user's home
pub const DEFAULT_HOME_DIR: &str = ".hdkeys";
