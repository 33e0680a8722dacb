use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultAuditError};

/// How `vaultaudit audit` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(VaultAuditError::CommandFailed(format!(
                "unknown output format '{other}', expected 'table' or 'json'"
            ))),
        }
    }
}

/// Project-level configuration, loaded from `.vaultaudit.toml`.
///
/// Every field has a sensible default so VaultAudit works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Environment variable holding the item encryption key.
    #[serde(default = "default_key_env")]
    pub key_env: String,

    /// Directory (relative to project root) for the audit history database.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Default output format for `audit`.
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Whether `audit` records each run in the history database.
    #[serde(default = "default_record_history")]
    pub record_history: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_env() -> String {
    "VAULTAUDIT_KEY".to_string()
}

fn default_data_dir() -> String {
    ".vaultaudit".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_record_history() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_env: default_key_env(),
            data_dir: default_data_dir(),
            output_format: default_output_format(),
            record_history: default_record_history(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".vaultaudit.toml";

    /// Load settings from `<project_dir>/.vaultaudit.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultAuditError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Directory holding `history.db`.
    ///
    /// Example: `project_dir/.vaultaudit`
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.key_env, "VAULTAUDIT_KEY");
        assert_eq!(s.data_dir, ".vaultaudit");
        assert_eq!(s.output_format, OutputFormat::Table);
        assert!(s.record_history);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.key_env, "VAULTAUDIT_KEY");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
key_env = "VAULT_ENCRYPTION_KEY"
data_dir = "audits"
output_format = "json"
record_history = false
"#;
        fs::write(tmp.path().join(".vaultaudit.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.key_env, "VAULT_ENCRYPTION_KEY");
        assert_eq!(settings.data_dir, "audits");
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert!(!settings.record_history);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".vaultaudit.toml"), "output_format = \"json\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.output_format, OutputFormat::Json);
        // Rest should be defaults
        assert_eq!(settings.data_dir, ".vaultaudit");
        assert!(settings.record_history);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".vaultaudit.toml"), "not valid {{toml").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn load_errors_on_unknown_format() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".vaultaudit.toml"), "output_format = \"xml\"\n").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn data_path_respects_custom_dir() {
        let s = Settings {
            data_dir: "audits".to_string(),
            ..Settings::default()
        };
        let project = Path::new("/home/user/project");
        assert_eq!(
            s.data_path(project),
            PathBuf::from("/home/user/project/audits")
        );
    }

    #[test]
    fn output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::parse("yaml").is_err());
    }
}
