//! Card expiry parsing.
//!
//! Accepted forms, tried in order:
//! - `MM/YY`   (year is 2000 + YY)
//! - `MM/YYYY`
//! - ISO 8601: RFC 3339 timestamp, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD`,
//!   `YYYY/MM/DD`, `YYYY-MM`
//!
//! Slash forms with a month outside 1..=12 are rejected rather than
//! rolled into the next year.  All dates are taken as UTC.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

fn slash_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{2})/(\d{2}|\d{4})$").expect("static expiry pattern"))
}

/// Parse an expiry string into a date.
///
/// Slash forms resolve to the first day of the month.  Returns `None`
/// for anything unparseable; never errors.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();

    if let Some(caps) = slash_pattern().captures(s) {
        let month: u32 = caps[1].parse().ok()?;
        let year_part = &caps[2];
        let mut year: i32 = year_part.parse().ok()?;
        if year_part.len() == 2 {
            year += 2000;
        }
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    parse_iso(s)
}

fn parse_iso(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    // Year-month only.
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first_of_next| first_of_next - Duration::days(1))
        .unwrap_or(NaiveDate::MAX)
}

/// A card is valid through the last day of its expiry month, inclusive.
pub fn is_still_valid(expiry: NaiveDate, now: DateTime<Utc>) -> bool {
    end_of_month(expiry) >= now.date_naive()
}
