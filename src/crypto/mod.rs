//! Cryptographic primitives for VaultAudit.
//!
//! This module provides the AES-256-GCM envelope the item store uses for
//! each item's `encryptedData` (`envelope`).

pub mod envelope;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{decrypt, EncryptionKey, ...};
pub use envelope::{decrypt, encrypt, generate_key, EncryptionKey};
