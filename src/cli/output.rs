//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::audit::{Check, RiskLevel, UserAudit};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Colorize a risk level for display.
pub fn colorize_risk(level: RiskLevel) -> String {
    match level {
        RiskLevel::Low => style(level.as_str()).green().bold().to_string(),
        RiskLevel::Medium => style(level.as_str()).yellow().bold().to_string(),
        RiskLevel::High => style(level.as_str()).red().bold().to_string(),
    }
}

fn pass_mark(passed: bool) -> String {
    if passed {
        style("\u{2713}").green().to_string()
    } else {
        style("\u{2717}").red().to_string()
    }
}

/// Print the headline, per-item scores, and the issue list.
pub fn print_audit(audit: &UserAudit) {
    println!(
        "{} {}%  risk: {}  ({} items, {} flagged)",
        style("Vault score:").bold(),
        audit.score_percent,
        colorize_risk(audit.risk_level),
        audit.summary.total_items,
        audit.summary.flagged_items,
    );

    if audit.item_reports.is_empty() {
        info("No items in this vault.");
        return;
    }

    let mut items = Table::new();
    items.set_content_arrangement(ContentArrangement::Dynamic);
    items.set_header(vec!["Item", "Type", "Checks", "Score"]);
    for r in &audit.item_reports {
        items.add_row(vec![
            r.title.clone(),
            r.item_type
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            format!("{}/{}", r.passed_checks, r.total_checks),
            format!("{}%", r.item_score),
        ]);
    }
    println!("{items}");

    if audit.issues.is_empty() {
        success("No issues found.");
        return;
    }

    let mut issues = Table::new();
    issues.set_content_arrangement(ContentArrangement::Dynamic);
    issues.set_header(vec!["Item", "Check", "Reason"]);
    for issue in &audit.issues {
        issues.add_row(vec![
            issue.title.clone(),
            issue.check.clone(),
            issue.reason.clone(),
        ]);
    }
    println!("{}", style(format!("{} issue(s):", audit.issues.len())).bold());
    println!("{issues}");
}

/// Print a list of checks with pass/fail marks.
pub fn print_checks(checks: &[Check]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Check", "Reason"]);
    for c in checks {
        table.add_row(vec![pass_mark(c.passed), c.name.clone(), c.reason.clone()]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorize_risk_keeps_label() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert!(console::strip_ansi_codes(&colorize_risk(level)).contains(level.as_str()));
        }
    }
}
