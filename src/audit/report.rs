//! Audit result types.
//!
//! These serialize with camelCase keys so the JSON output matches what
//! the web client already renders.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vault::ItemType;

/// One named check run against an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    #[serde(rename = "ok")]
    pub passed: bool,
    pub reason: String,
}

/// Result of analyzing a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReport {
    pub item_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub total_checks: u32,
    pub passed_checks: u32,
    pub item_score: u8,
    pub checks: Vec<Check>,
}

impl ItemReport {
    pub fn failed_checks(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a user score.  Boundaries fall into the safer bucket.
    pub fn from_score(score_percent: u8) -> Self {
        if score_percent < 40 {
            RiskLevel::High
        } else if score_percent < 70 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Inverse of `as_str`, for levels read back from storage.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub total_items: usize,
    pub flagged_items: usize,
}

/// A failed check, flattened with its owning item's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub item_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
    pub check: String,
    pub reason: String,
}

/// User-level audit verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAudit {
    pub score_percent: u8,
    pub risk_level: RiskLevel,
    pub summary: AuditSummary,
    pub issues: Vec<Issue>,
    pub item_reports: Vec<ItemReport>,
    /// Stamped by the caller once aggregation is done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl UserAudit {
    pub fn stamped(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}
