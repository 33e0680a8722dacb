//! Stored vault items as the item store hands them to the auditor.
//!
//! An export file is a JSON array of items.  Each item carries its
//! metadata in the clear and its secret fields in `encryptedData`
//! (see `crate::crypto::envelope` for the envelope layout).

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::{Result, VaultAuditError};

/// The kind of a vault item.
///
/// Unknown type strings are kept verbatim in `Other` so that an item of
/// a newer type still gets audited (it simply matches no check group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    Password,
    Login,
    Card,
    Note,
    SecureNote,
    Other(String),
}

impl ItemType {
    pub fn as_str(&self) -> &str {
        match self {
            ItemType::Password => "password",
            ItemType::Login => "login",
            ItemType::Card => "card",
            ItemType::Note => "note",
            ItemType::SecureNote => "secure_note",
            ItemType::Other(s) => s,
        }
    }
}

impl From<String> for ItemType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "password" => ItemType::Password,
            "login" => ItemType::Login,
            "card" => ItemType::Card,
            "note" => ItemType::Note,
            "secure_note" => ItemType::SecureNote,
            _ => ItemType::Other(s),
        }
    }
}

impl From<ItemType> for String {
    fn from(t: ItemType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item metadata read by the audit engine.
///
/// `item_type == None` means the type was never set (missing, `null` or
/// blank); it is audited like a password item.  Timestamps that do not
/// parse are read as missing so the item still gets audited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItem {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, rename = "type", deserialize_with = "unset_if_blank")]
    pub item_type: Option<ItemType>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn unset_if_blank<'de, D>(deserializer: D) -> std::result::Result<Option<ItemType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(ItemType::from))
}

/// RFC 3339 text or epoch milliseconds; anything else is `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_timestamp))
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

/// An item as stored: metadata plus the encrypted payload blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedItem {
    #[serde(flatten)]
    pub item: VaultItem,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// base64(iv || tag || ciphertext)
    pub encrypted_data: String,
}

/// An item whose secret fields are still in the clear.
///
/// This is the input format of `vaultaudit seal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainItem {
    #[serde(flatten)]
    pub item: VaultItem,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub data: serde_json::Value,
}

/// Load an encrypted export file (JSON array of items).
pub fn load_export(path: &Path) -> Result<Vec<EncryptedItem>> {
    read_items(path)
}

/// Load a plaintext export file (JSON array of items with `data`).
pub fn load_plain_export(path: &Path) -> Result<Vec<PlainItem>> {
    read_items(path)
}

fn read_items<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(VaultAuditError::ExportNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;

    serde_json::from_str(&content)
        .map_err(|e| VaultAuditError::InvalidExport(format!("{}: {e}", path.display())))
}
