//! Audit history — SQLite record of past audit runs.
//!
//! Each `vaultaudit audit` stores its headline numbers in
//! `<data_dir>/history.db` so score trends can be reviewed later.
//!
//! If the database can't be opened or written to, audits still run;
//! they just aren't recorded.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::{debug, warn};

use crate::audit::UserAudit;
use crate::errors::{Result, VaultAuditError};

/// One recorded audit run.
#[derive(Debug, Clone)]
pub struct AuditRun {
    pub id: i64,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub score_percent: u8,
    pub risk_level: String,
    pub total_items: i64,
    pub flagged_items: i64,
    pub issue_count: i64,
}

/// SQLite-backed audit history.
pub struct AuditHistory {
    conn: Connection,
}

impl AuditHistory {
    /// File name of the history database inside the data directory.
    const FILE_NAME: &'static str = "history.db";

    /// Open (or create) the history database at `<data_dir>/history.db`.
    ///
    /// Returns `None` if the database can't be opened; callers should
    /// treat this as "history unavailable" and continue normally.
    pub fn open(data_dir: &Path) -> Option<Self> {
        let db_path = Self::db_path(data_dir);
        let conn = match Connection::open(&db_path) {
            Ok(conn) => conn,
            Err(e) => {
                debug!("history unavailable at {}: {e}", db_path.display());
                return None;
            }
        };

        // History holds item titles; keep it owner-only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_runs (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                generated_at  TEXT NOT NULL,
                source        TEXT NOT NULL,
                score_percent INTEGER NOT NULL,
                risk_level    TEXT NOT NULL,
                total_items   INTEGER NOT NULL,
                flagged_items INTEGER NOT NULL,
                issue_count   INTEGER NOT NULL
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an audit result.  Fire-and-forget: failures are logged
    /// and otherwise ignored.
    pub fn record(&self, source: &str, audit: &UserAudit) {
        let generated_at = audit.generated_at.unwrap_or_else(Utc::now).to_rfc3339();
        let result = self.conn.execute(
            "INSERT INTO audit_runs
                (generated_at, source, score_percent, risk_level, total_items, flagged_items, issue_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                generated_at,
                source,
                audit.score_percent,
                audit.risk_level.as_str(),
                audit.summary.total_items as i64,
                audit.summary.flagged_items as i64,
                audit.issues.len() as i64,
            ],
        );
        if let Err(e) = result {
            warn!("failed to record audit history: {e}");
        }
    }

    /// Query recent runs.
    ///
    /// - `limit`: maximum number of runs to return (most recent first).
    /// - `since`: if provided, only return runs generated at or after it.
    pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditRun>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let (sql, params): (&str, Vec<Box<dyn rusqlite::types::ToSql>>) = match since {
            Some(ref ts) => (
                "SELECT id, generated_at, source, score_percent, risk_level,
                        total_items, flagged_items, issue_count
                 FROM audit_runs
                 WHERE generated_at >= ?1
                 ORDER BY id DESC
                 LIMIT ?2",
                vec![
                    Box::new(ts.to_rfc3339()) as Box<dyn rusqlite::types::ToSql>,
                    Box::new(limit_i64),
                ],
            ),
            None => (
                "SELECT id, generated_at, source, score_percent, risk_level,
                        total_items, flagged_items, issue_count
                 FROM audit_runs
                 ORDER BY id DESC
                 LIMIT ?1",
                vec![Box::new(limit_i64) as Box<dyn rusqlite::types::ToSql>],
            ),
        };

        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| VaultAuditError::HistoryError(format!("query prepare: {e}")))?;

        let params_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| &**p).collect();

        let rows = stmt
            .query_map(params_refs.as_slice(), |row| {
                let ts_str: String = row.get(1)?;
                let generated_at = DateTime::parse_from_rfc3339(&ts_str)
                    .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                Ok(AuditRun {
                    id: row.get(0)?,
                    generated_at,
                    source: row.get(2)?,
                    score_percent: row.get(3)?,
                    risk_level: row.get(4)?,
                    total_items: row.get(5)?,
                    flagged_items: row.get(6)?,
                    issue_count: row.get(7)?,
                })
            })
            .map_err(|e| VaultAuditError::HistoryError(format!("query exec: {e}")))?;

        let mut runs = Vec::new();
        for row in rows {
            runs.push(row.map_err(|e| VaultAuditError::HistoryError(format!("row parse: {e}")))?);
        }

        Ok(runs)
    }

    /// Return the path to the history database (for testing/display).
    pub fn db_path(data_dir: &Path) -> PathBuf {
        data_dir.join(Self::FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{aggregate, Check, ItemReport};
    use chrono::Duration;
    use tempfile::TempDir;

    fn sample_audit(score: u8, at: DateTime<Utc>) -> UserAudit {
        let report = ItemReport {
            item_id: "1".into(),
            title: "Mail".into(),
            item_type: None,
            total_checks: 1,
            passed_checks: 0,
            item_score: score,
            checks: vec![Check {
                name: "hasPassword".into(),
                passed: false,
                reason: "No password field found in item data".into(),
            }],
        };
        aggregate(vec![report]).stamped(at)
    }

    #[test]
    fn open_creates_database() {
        let dir = TempDir::new().unwrap();
        assert!(AuditHistory::open(dir.path()).is_some());
        assert!(dir.path().join("history.db").exists());
    }

    #[test]
    fn record_and_query_roundtrip() {
        let dir = TempDir::new().unwrap();
        let history = AuditHistory::open(dir.path()).unwrap();

        history.record("a.json", &sample_audit(20, Utc::now()));
        history.record("b.json", &sample_audit(90, Utc::now()));

        let runs = history.query(10, None).unwrap();
        assert_eq!(runs.len(), 2);

        // Most recent first.
        assert_eq!(runs[0].source, "b.json");
        assert_eq!(runs[0].score_percent, 90);
        assert_eq!(runs[0].risk_level, "low");
        assert_eq!(runs[1].risk_level, "high");
        assert_eq!(runs[1].total_items, 1);
        assert_eq!(runs[1].flagged_items, 1);
        assert_eq!(runs[1].issue_count, 1);
    }

    #[test]
    fn query_with_limit() {
        let dir = TempDir::new().unwrap();
        let history = AuditHistory::open(dir.path()).unwrap();

        for i in 0..10 {
            history.record(&format!("run-{i}.json"), &sample_audit(50, Utc::now()));
        }

        assert_eq!(history.query(3, None).unwrap().len(), 3);
    }

    #[test]
    fn query_with_since_filter() {
        let dir = TempDir::new().unwrap();
        let history = AuditHistory::open(dir.path()).unwrap();

        history.record("old.json", &sample_audit(50, Utc::now() - Duration::days(30)));
        history.record("new.json", &sample_audit(50, Utc::now()));

        let since = Utc::now() - Duration::days(7);
        let runs = history.query(10, Some(since)).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].source, "new.json");
    }

    #[test]
    fn open_returns_none_on_bad_path() {
        let result = AuditHistory::open(Path::new("/nonexistent/path/that/does/not/exist"));
        assert!(result.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn history_db_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let _history = AuditHistory::open(dir.path()).unwrap();

        let perms = std::fs::metadata(dir.path().join("history.db"))
            .unwrap()
            .permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
