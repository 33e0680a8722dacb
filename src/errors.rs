use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in VaultAudit.
///
/// The scoring engine itself never produces these: anomalies inside an
/// item become failed checks. Errors only come from the layers around it
/// (keys, decryption, input files, settings, history, CLI).
#[derive(Debug, Error)]
pub enum VaultAuditError {
    // --- Crypto errors ---
    #[error("Invalid encryption key: {0}")]
    InvalidKey(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    // --- Input errors ---
    #[error("Export file not found at {0}")]
    ExportNotFound(PathBuf),

    #[error("Invalid export file: {0}")]
    InvalidExport(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- History errors ---
    #[error("History error: {0}")]
    HistoryError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for VaultAudit results.
pub type Result<T> = std::result::Result<T, VaultAuditError>;
