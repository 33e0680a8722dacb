//! Security audit engine.
//!
//! Scores password hygiene across a user's vault:
//! - heuristic entropy estimate (`entropy`)
//! - known-weak password list (`common`)
//! - card expiry parsing (`expiry`)
//! - per-item checks (`analyzer`)
//! - user-level roll-up (`aggregate`)
//! - decrypt + analyze + aggregate over a whole export (`runner`)
//!
//! `analyze_item` and `aggregate` are pure: the current time is an
//! argument and nothing here touches I/O.

pub mod aggregate;
pub mod analyzer;
pub mod common;
pub mod entropy;
pub mod expiry;
pub mod report;
pub mod runner;

pub use aggregate::aggregate;
pub use analyzer::{analyze_item, password_checks};
pub use common::is_common_password;
pub use entropy::estimate_entropy;
pub use expiry::parse_expiry;
pub use report::{AuditSummary, Check, Issue, ItemReport, RiskLevel, UserAudit};
pub use runner::{audit_items, audit_plain};
