//! Batch orchestration: decrypt, analyze, aggregate, stamp.
//!
//! Each item is decrypted on its own.  A failed decryption becomes a
//! `DecryptError` payload for that item and the batch keeps going.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::aggregate::aggregate;
use super::analyzer::analyze_item;
use super::report::{ItemReport, UserAudit};
use crate::crypto::envelope::{self, EncryptionKey};
use crate::vault::{DecryptedPayload, EncryptedItem, VaultItem};

/// Decrypt and audit every stored item.
pub fn audit_items(items: &[EncryptedItem], key: &EncryptionKey, now: DateTime<Utc>) -> UserAudit {
    let reports = items
        .iter()
        .map(|stored| {
            let payload = decrypt_payload(stored, key);
            analyze_item(&stored.item, &payload, now)
        })
        .collect();

    finish(reports, now)
}

/// Audit items whose payloads are already decrypted.
pub fn audit_plain(items: &[(VaultItem, DecryptedPayload)], now: DateTime<Utc>) -> UserAudit {
    let reports = items
        .iter()
        .map(|(item, payload)| analyze_item(item, payload, now))
        .collect();

    finish(reports, now)
}

fn decrypt_payload(stored: &EncryptedItem, key: &EncryptionKey) -> DecryptedPayload {
    match envelope::decrypt(key, &stored.encrypted_data) {
        Ok(plaintext) => DecryptedPayload::resolve(stored.item.item_type.as_ref(), &plaintext),
        Err(e) => {
            warn!(item_id = %stored.item.id, "could not decrypt item: {e}");
            DecryptedPayload::DecryptError
        }
    }
}

fn finish(reports: Vec<ItemReport>, now: DateTime<Utc>) -> UserAudit {
    let audit = aggregate(reports).stamped(now);
    debug!(
        items = audit.summary.total_items,
        flagged = audit.summary.flagged_items,
        score = audit.score_percent,
        "audit complete"
    );
    audit
}
