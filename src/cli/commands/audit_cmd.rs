//! `vaultaudit audit` — score an encrypted vault export.
//!
//! Usage:
//!   vaultaudit audit items.json
//!   vaultaudit audit items.json --format json
//!   vaultaudit audit items.json --now 2025-01-01T00:00:00Z --no-history

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::audit::{audit_items, UserAudit};
use crate::cli::output;
use crate::cli::{load_settings, resolve_key, Cli};
use crate::config::OutputFormat;
use crate::errors::{Result, VaultAuditError};
use crate::vault::load_export;

/// Execute the `audit` command.
pub fn execute(
    cli: &Cli,
    file: &str,
    format: Option<&str>,
    now: Option<&str>,
    no_history: bool,
) -> Result<()> {
    let settings = load_settings()?;

    let format = match format {
        Some(f) => OutputFormat::parse(f)?,
        None => settings.output_format,
    };
    let now = match now {
        Some(ts) => parse_now(ts)?,
        None => Utc::now(),
    };

    let source = Path::new(file);
    let items = load_export(source)?;
    info!("loaded {} item(s) from {}", items.len(), source.display());

    let key = resolve_key(&settings)?;
    let audit = audit_items(&items, &key, now);

    if settings.record_history && !no_history {
        record_history(cli, &settings, file, &audit);
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&audit)
                .map_err(|e| VaultAuditError::SerializationError(e.to_string()))?;
            println!("{json}");
        }
        OutputFormat::Table => output::print_audit(&audit),
    }

    Ok(())
}

fn parse_now(ts: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| VaultAuditError::CommandFailed(format!("invalid --now '{ts}': {e}")))
}

#[cfg(feature = "history")]
fn record_history(
    cli: &Cli,
    settings: &crate::config::Settings,
    source: &str,
    audit: &UserAudit,
) {
    let Ok(dir) = crate::cli::data_dir(cli, settings) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    if let Some(history) = crate::history::AuditHistory::open(&dir) {
        history.record(source, audit);
    }
}

#[cfg(not(feature = "history"))]
fn record_history(_: &Cli, _: &crate::config::Settings, _: &str, _: &UserAudit) {}
