//! `vaultaudit history` — display past audit runs.
//!
//! Usage:
//!   vaultaudit history               # show last 20 runs
//!   vaultaudit history --last 5      # show last 5
//!   vaultaudit history --since 7d    # runs from the last 7 days

use chrono::{DateTime, TimeDelta, Utc};

use crate::cli::output;
use crate::audit::RiskLevel;
use crate::cli::{data_dir, load_settings, Cli};
use crate::errors::{Result, VaultAuditError};
use crate::history::{AuditHistory, AuditRun};

/// Execute the `history` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let settings = load_settings()?;
    let dir = data_dir(cli, &settings)?;

    if !AuditHistory::db_path(&dir).exists() {
        output::info("No audit history yet.");
        output::tip("Run `vaultaudit audit <FILE>` to record your first audit.");
        return Ok(());
    }

    let history = AuditHistory::open(&dir)
        .ok_or_else(|| VaultAuditError::HistoryError("failed to open history database".into()))?;

    let since_dt = match since {
        Some(s) => Some(parse_duration(s, Utc::now())?),
        None => None,
    };

    let runs = history.query(last, since_dt)?;

    if runs.is_empty() {
        output::info("No audit runs found.");
        return Ok(());
    }

    print_history_table(&runs);

    Ok(())
}

/// Parse a human-friendly duration string like "7d", "24h", "30m" and
/// return the instant that far before `now`.
fn parse_duration(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let input = input.trim();

    let (num_str, unit) = if let Some(s) = input.strip_suffix('d') {
        (s, 'd')
    } else if let Some(s) = input.strip_suffix('h') {
        (s, 'h')
    } else if let Some(s) = input.strip_suffix('m') {
        (s, 'm')
    } else {
        return Err(VaultAuditError::CommandFailed(format!(
            "invalid duration '{input}', use a format like 7d, 24h or 30m"
        )));
    };

    let num: i64 = num_str.parse().map_err(|_| {
        VaultAuditError::CommandFailed(format!(
            "invalid duration '{input}': number part is not valid"
        ))
    })?;

    let duration = match unit {
        'd' => TimeDelta::try_days(num),
        'h' => TimeDelta::try_hours(num),
        _ => TimeDelta::try_minutes(num),
    };

    duration
        .and_then(|d| now.checked_sub_signed(d))
        .ok_or_else(|| {
            VaultAuditError::CommandFailed(format!("duration '{input}' is out of range"))
        })
}

/// Print audit runs in a formatted table.
fn print_history_table(runs: &[AuditRun]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Source", "Score", "Risk", "Items", "Flagged", "Issues"]);

    for run in runs {
        table.add_row(vec![
            run.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            run.source.clone(),
            format!("{}%", run.score_percent),
            risk_cell(&run.risk_level),
            run.total_items.to_string(),
            run.flagged_items.to_string(),
            run.issue_count.to_string(),
        ]);
    }

    println!("{}", style(format!("{} audit run(s):", runs.len())).bold());
    println!("{table}");
}

/// Risk levels come back from SQLite as text.
fn risk_cell(level: &str) -> String {
    match RiskLevel::parse(level) {
        Some(level) => output::colorize_risk(level),
        None => level.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("7d", now()).unwrap(), now() - chrono::Duration::days(7));
        assert_eq!(parse_duration("24h", now()).unwrap(), now() - chrono::Duration::hours(24));
        assert_eq!(parse_duration(" 30m ", now()).unwrap(), now() - chrono::Duration::minutes(30));
    }

    #[test]
    fn parse_duration_invalid() {
        assert!(parse_duration("abc", now()).is_err());
        assert!(parse_duration("7x", now()).is_err());
        assert!(parse_duration("d", now()).is_err());
    }

    #[test]
    fn parse_duration_out_of_range() {
        for input in ["1000000000000000d", "9223372036854775807h", "-1000000000000000d"] {
            assert!(matches!(
                parse_duration(input, now()),
                Err(VaultAuditError::CommandFailed(_))
            ));
        }
    }

    #[test]
    fn risk_cell_keeps_label() {
        assert!(console::strip_ansi_codes(&risk_cell("low")).contains("low"));
        assert!(console::strip_ansi_codes(&risk_cell("high")).contains("high"));
        assert_eq!(risk_cell("unknown"), "unknown");
    }
}
