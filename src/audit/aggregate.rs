//! Roll item reports up into a user-level verdict.

use super::analyzer::percent;
use super::report::{AuditSummary, Issue, ItemReport, RiskLevel, UserAudit};

/// Items scoring below this are counted as flagged.
pub const FLAGGED_BELOW: u8 = 70;

/// Combine item reports into a `UserAudit`.
///
/// An empty vault scores 100 / low.  `generated_at` is left unset for
/// the caller to stamp.
pub fn aggregate(reports: Vec<ItemReport>) -> UserAudit {
    if reports.is_empty() {
        return UserAudit {
            score_percent: 100,
            risk_level: RiskLevel::Low,
            summary: AuditSummary {
                total_items: 0,
                flagged_items: 0,
            },
            issues: Vec::new(),
            item_reports: Vec::new(),
            generated_at: None,
        };
    }

    let total_items = reports.len();
    let score_sum: u64 = reports.iter().map(|r| u64::from(r.item_score)).sum();
    let score_percent = percent(score_sum, 100 * total_items as u64);

    let flagged_items = reports
        .iter()
        .filter(|r| r.item_score < FLAGGED_BELOW)
        .count();

    let issues = reports
        .iter()
        .flat_map(|r| {
            r.failed_checks().map(move |c| Issue {
                item_id: r.item_id.clone(),
                title: r.title.clone(),
                item_type: r.item_type.clone(),
                check: c.name.clone(),
                reason: c.reason.clone(),
            })
        })
        .collect();

    UserAudit {
        score_percent,
        risk_level: RiskLevel::from_score(score_percent),
        summary: AuditSummary {
            total_items,
            flagged_items,
        },
        issues,
        item_reports: reports,
        generated_at: None,
    }
}
