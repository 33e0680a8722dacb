//! `vaultaudit completions` — print a shell completion script.
//!
//! Example: `vaultaudit completions zsh > ~/.zfunc/_vaultaudit`

use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::{Result, VaultAuditError};

/// Execute the `completions` command.
pub fn execute(shell: &str) -> Result<()> {
    let shell = shell_from_name(shell)?;
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, &mut std::io::stdout());
    Ok(())
}

/// Case-insensitive shell lookup; `ps` is accepted for PowerShell.
fn shell_from_name(name: &str) -> Result<Shell> {
    let name = if name.eq_ignore_ascii_case("ps") {
        "powershell"
    } else {
        name
    };

    <Shell as ValueEnum>::from_str(name, true).map_err(|_| {
        let known: Vec<String> = Shell::value_variants()
            .iter()
            .map(ToString::to_string)
            .collect();
        VaultAuditError::CommandFailed(format!(
            "unknown shell '{name}', supported: {}",
            known.join(", ")
        ))
    })
}
