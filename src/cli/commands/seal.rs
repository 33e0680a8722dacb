//! `vaultaudit seal` — encrypt a plaintext export into the stored format.
//!
//! Each item's `data` object is serialized, encrypted with the item key,
//! and written back as `encryptedData`.  Handy for building test vaults
//! and for migrating plaintext dumps.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::cli::{load_settings, resolve_key};
use crate::crypto::{encrypt, EncryptionKey};
use crate::errors::{Result, VaultAuditError};
use crate::vault::{load_plain_export, EncryptedItem, PlainItem};

/// Execute the `seal` command.
pub fn execute(file: &str, output_path: Option<&str>) -> Result<()> {
    let source = Path::new(file);

    if output_path.is_some_and(|dest| Path::new(dest) == source) {
        return Err(VaultAuditError::CommandFailed(
            "refusing to overwrite the plaintext input with its sealed form".into(),
        ));
    }

    let items = load_plain_export(source)?;
    let settings = load_settings()?;
    let key = resolve_key(&settings)?;

    let sealed = seal_items(items, &key)?;
    let content = serde_json::to_string_pretty(&sealed)
        .map_err(|e| VaultAuditError::SerializationError(e.to_string()))?;

    match output_path {
        Some(dest) => {
            fs::write(dest, format!("{content}\n")).map_err(|e| {
                VaultAuditError::CommandFailed(format!("failed to write sealed export: {e}"))
            })?;
            info!("sealed {} item(s) into {dest}", sealed.len());
            output::success(&format!("Sealed {} items into {dest}", sealed.len()));
        }
        None => println!("{content}"),
    }

    Ok(())
}

/// Encrypt each item's `data` into `encryptedData`.
pub fn seal_items(items: Vec<PlainItem>, key: &EncryptionKey) -> Result<Vec<EncryptedItem>> {
    items
        .into_iter()
        .map(|plain| {
            let plaintext = serde_json::to_vec(&plain.data)
                .map_err(|e| VaultAuditError::SerializationError(e.to_string()))?;
            Ok(EncryptedItem {
                item: plain.item,
                subtitle: plain.subtitle,
                category: plain.category,
                encrypted_data: encrypt(key, &plaintext)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::decrypt;
    use crate::vault::VaultItem;
    use serde_json::json;

    #[test]
    fn sealed_items_decrypt_to_original_data() {
        let key = EncryptionKey::from_bytes([4u8; 32]);
        let items = vec![PlainItem {
            item: VaultItem {
                id: "1".into(),
                title: Some("Mail".into()),
                ..VaultItem::default()
            },
            subtitle: None,
            category: Some("work".into()),
            data: json!({"username": "me", "password": "s3cret"}),
        }];

        let sealed = seal_items(items, &key).unwrap();
        assert_eq!(sealed.len(), 1);
        assert_eq!(sealed[0].item.id, "1");
        assert_eq!(sealed[0].category.as_deref(), Some("work"));

        let plaintext = decrypt(&key, &sealed[0].encrypted_data).unwrap();
        let data: serde_json::Value = serde_json::from_slice(&plaintext).unwrap();
        assert_eq!(data["password"], "s3cret");
    }
}
