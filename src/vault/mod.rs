//! Vault module — the item records the auditor reads.
//!
//! This module provides:
//! - `VaultItem`, `ItemType` and the stored/plain export shapes (`item`)
//! - `DecryptedPayload`, the typed view of an item's secret fields (`payload`)

pub mod item;
pub mod payload;

// Re-export the most commonly used items.
pub use item::{load_export, load_plain_export, EncryptedItem, ItemType, PlainItem, VaultItem};
pub use payload::DecryptedPayload;
