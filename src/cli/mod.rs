//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::EncryptionKey;
use crate::errors::{Result, VaultAuditError};

/// VaultAudit CLI: password-hygiene audits for encrypted vault exports.
#[derive(Parser)]
#[command(
    name = "vaultaudit",
    about = "Security audit for encrypted password vaults",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory for the audit history database (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Audit an encrypted vault export
    Audit {
        /// Path to the export file (JSON array of items)
        file: String,

        /// Output format: table or json (default from config)
        #[arg(short, long)]
        format: Option<String>,

        /// Evaluate as of this RFC 3339 time instead of now
        #[arg(long)]
        now: Option<String>,

        /// Do not record this run in the audit history
        #[arg(long)]
        no_history: bool,
    },

    /// Run the password checks on a single password
    Check {
        /// Password to check (omit for interactive prompt)
        password: Option<String>,
    },

    /// Encrypt a plaintext export into the stored format
    Seal {
        /// Path to the plaintext export (items with a `data` object)
        file: String,

        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate a new random encryption key
    Keygen,

    /// View past audit runs
    History {
        /// Number of runs to show (default: 20)
        #[arg(long, default_value = "20")]
        last: usize,
        /// Show runs since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// The project directory (current working directory).
pub fn project_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Load settings from the project directory.
pub fn load_settings() -> Result<Settings> {
    Settings::load(&project_dir()?)
}

/// Directory holding the history database, honoring `--data-dir`.
pub fn data_dir(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let project = project_dir()?;
    Ok(match &cli.data_dir {
        Some(dir) => project.join(dir),
        None => settings.data_path(&project),
    })
}

/// Get the item encryption key, trying in order:
/// 1. The environment variable named by `settings.key_env` (CI/CD)
/// 2. Interactive prompt
pub fn resolve_key(settings: &Settings) -> Result<EncryptionKey> {
    let text = prompt_key(&settings.key_env)?;
    EncryptionKey::parse(&text)
}

/// Read the key text.  Returns `Zeroizing<String>` so it is wiped on drop.
fn prompt_key(key_env: &str) -> Result<Zeroizing<String>> {
    // 1. Check the environment variable first (CI/CD friendly).
    if let Ok(key) = std::env::var(key_env) {
        if !key.is_empty() {
            return Ok(Zeroizing::new(key));
        }
    }

    // 2. Fall back to interactive prompt.
    let key = dialoguer::Password::new()
        .with_prompt(format!("Enter encryption key (or set {key_env})"))
        .interact()
        .map_err(|e| VaultAuditError::CommandFailed(format!("key prompt: {e}")))?;
    Ok(Zeroizing::new(key))
}

/// Read a password for `check`: argument if given, otherwise a hidden prompt.
pub fn prompt_password(given: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(pw) = given {
        return Ok(Zeroizing::new(pw.to_string()));
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Password to check")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| VaultAuditError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
