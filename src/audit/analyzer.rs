//! Per-item analysis.
//!
//! Check groups by item type:
//! - password / login / unset: `hasPassword`, then (only when a password
//!   exists) `length>=12`, `entropy`, `notCommon`; always `recentlyUpdated`
//! - card: `cardExpiry`
//! - note / secure_note: `hasContent`
//!
//! An item matching no group gets a single passing `noChecks` check, so
//! `total_checks` is never zero.

use chrono::{DateTime, Utc};

use super::common::is_common_password;
use super::entropy::estimate_entropy;
use super::expiry::{end_of_month, is_still_valid, parse_expiry};
use super::report::{Check, ItemReport};
use crate::vault::{DecryptedPayload, ItemType, VaultItem};

pub const MIN_PASSWORD_LEN: usize = 12;
pub const MIN_ENTROPY_BITS: u32 = 50;
/// Passwords this short fail `notCommon` even when not on the list.
pub const SHORT_PASSWORD_LEN: usize = 6;
pub const MAX_AGE_DAYS: i64 = 365;

const MS_PER_DAY: i64 = 86_400_000;

/// Append-only list of checks for one item.
#[derive(Debug, Default)]
struct Checks(Vec<Check>);

impl Checks {
    fn add(&mut self, name: &str, passed: bool, reason: impl Into<String>) {
        self.0.push(Check {
            name: name.to_string(),
            passed,
            reason: reason.into(),
        });
    }
}

/// Analyze one item against its decrypted payload.
///
/// `now` is passed in so the result depends only on the inputs.
pub fn analyze_item(item: &VaultItem, payload: &DecryptedPayload, now: DateTime<Utc>) -> ItemReport {
    let mut checks = Checks::default();

    match item.item_type {
        None | Some(ItemType::Password) | Some(ItemType::Login) => {
            check_password(&mut checks, payload.password());
            check_freshness(&mut checks, item, now);
        }
        Some(ItemType::Card) => check_card_expiry(&mut checks, payload.expiry(), now),
        Some(ItemType::Note) | Some(ItemType::SecureNote) => {
            check_content(&mut checks, payload.content())
        }
        Some(ItemType::Other(_)) => {}
    }

    if checks.0.is_empty() {
        checks.add(
            "noChecks",
            true,
            "No applicable automated checks for this item type",
        );
    }

    let checks = checks.0;
    let total_checks = checks.len() as u32;
    let passed_checks = checks.iter().filter(|c| c.passed).count() as u32;

    ItemReport {
        item_id: item.id.clone(),
        title: display_title(item, payload),
        item_type: item.item_type.clone(),
        total_checks,
        passed_checks,
        item_score: percent(passed_checks as u64, total_checks as u64),
        checks,
    }
}

/// `round(100 * part / whole)` with halves rounded up.  `whole` must be > 0.
pub(crate) fn percent(part: u64, whole: u64) -> u8 {
    ((200 * part + whole) / (2 * whole)).min(100) as u8
}

/// Run the password-content checks (`hasPassword`, `length>=12`,
/// `entropy`, `notCommon`) and return them.
///
/// Also used on its own by `vaultaudit check`.
pub fn password_checks(password: Option<&str>) -> Vec<Check> {
    let mut checks = Checks::default();
    check_password(&mut checks, password);
    checks.0
}

fn check_password(checks: &mut Checks, password: Option<&str>) {
    let Some(pw) = password.filter(|p| !p.is_empty()) else {
        checks.add("hasPassword", false, "No password field found in item data");
        return;
    };
    checks.add("hasPassword", true, "Password present");

    let length = pw.chars().count();

    let long_enough = length >= MIN_PASSWORD_LEN;
    checks.add(
        "length>=12",
        long_enough,
        if long_enough {
            "Good length".to_string()
        } else {
            format!("Password shorter than {MIN_PASSWORD_LEN} chars")
        },
    );

    let bits = estimate_entropy(pw);
    checks.add(
        "entropy",
        bits >= MIN_ENTROPY_BITS,
        format!("Estimated entropy {bits} bits"),
    );

    let common = is_common_password(Some(pw)) || length <= SHORT_PASSWORD_LEN;
    checks.add(
        "notCommon",
        !common,
        if common {
            "Password is common or very short"
        } else {
            "Not common"
        },
    );
}

fn check_freshness(checks: &mut Checks, item: &VaultItem, now: DateTime<Utc>) {
    let Some(updated) = item.updated_at.or(item.created_at) else {
        checks.add("recentlyUpdated", false, "No update or creation time recorded");
        return;
    };

    let age_days = (now - updated).num_milliseconds().div_euclid(MS_PER_DAY);
    let fresh = age_days <= MAX_AGE_DAYS;
    checks.add(
        "recentlyUpdated",
        fresh,
        if fresh {
            format!("Updated {age_days} days ago")
        } else {
            format!("Not updated in {age_days} days")
        },
    );
}

fn check_card_expiry(checks: &mut Checks, expiry: Option<&str>, now: DateTime<Utc>) {
    let Some(raw) = expiry else {
        checks.add("cardExpiry", false, "No expiry date found");
        return;
    };

    let Some(date) = parse_expiry(raw) else {
        checks.add("cardExpiry", false, format!("Could not parse expiry: {raw}"));
        return;
    };

    let last_day = end_of_month(date).format("%Y-%m-%d");
    if is_still_valid(date, now) {
        checks.add("cardExpiry", true, format!("Expires {last_day}"));
    } else {
        checks.add("cardExpiry", false, format!("Expired on {last_day}"));
    }
}

fn check_content(checks: &mut Checks, content: Option<&str>) {
    let has_content = content.is_some_and(|c| !c.trim().is_empty());
    checks.add(
        "hasContent",
        has_content,
        if has_content { "Has content" } else { "Empty note" },
    );
}

fn display_title(item: &VaultItem, payload: &DecryptedPayload) -> String {
    item.title
        .as_deref()
        .filter(|t| !t.is_empty())
        .or_else(|| payload.username())
        .unwrap_or("Untitled")
        .to_string()
}
