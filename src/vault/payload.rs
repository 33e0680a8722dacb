//! Decrypted item payloads.
//!
//! The plaintext inside an item is a free-form JSON object whose field
//! names depend on the item type and on which client wrote it.  We probe
//! the known aliases once, here, and hand the analyzer a typed variant.

use serde_json::{Map, Value};

use super::item::ItemType;

/// Field aliases for the password, in priority order.
const PASSWORD_FIELDS: &[&str] = &["password", "pass", "value"];

/// Field aliases for a card's expiry, in priority order.
const EXPIRY_FIELDS: &[&str] = &["expiry", "exp", "cardExpiry"];

/// Field aliases for a note's body, in priority order.
const NOTE_FIELDS: &[&str] = &["note", "content"];

/// A decrypted payload, resolved against the item's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptedPayload {
    Login {
        password: Option<String>,
        username: Option<String>,
    },
    Card {
        expiry: Option<String>,
        username: Option<String>,
    },
    Note {
        content: Option<String>,
        username: Option<String>,
    },
    /// A JSON object for an item type with no type-specific fields.
    Other { username: Option<String> },
    /// Plaintext that was not a JSON object.
    Raw(String),
    /// The item could not be decrypted.
    DecryptError,
}

impl DecryptedPayload {
    /// Resolve decrypted plaintext bytes for an item of `item_type`.
    pub fn resolve(item_type: Option<&ItemType>, plaintext: &[u8]) -> Self {
        let text = match std::str::from_utf8(plaintext) {
            Ok(t) => t,
            Err(_) => return DecryptedPayload::Raw(String::from_utf8_lossy(plaintext).into()),
        };

        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(item_type, &value),
            Err(_) => DecryptedPayload::Raw(text.to_string()),
        }
    }

    /// Resolve an already-parsed JSON value.
    pub fn from_value(item_type: Option<&ItemType>, value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return DecryptedPayload::Raw(value.to_string());
        };

        let username = probe(obj, &["username"]);

        match item_type {
            None | Some(ItemType::Password) | Some(ItemType::Login) => DecryptedPayload::Login {
                password: probe(obj, PASSWORD_FIELDS),
                username,
            },
            Some(ItemType::Card) => DecryptedPayload::Card {
                expiry: probe(obj, EXPIRY_FIELDS),
                username,
            },
            Some(ItemType::Note) | Some(ItemType::SecureNote) => DecryptedPayload::Note {
                content: probe(obj, NOTE_FIELDS),
                username,
            },
            Some(ItemType::Other(_)) => DecryptedPayload::Other { username },
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            DecryptedPayload::Login { password, .. } => password.as_deref(),
            _ => None,
        }
    }

    pub fn expiry(&self) -> Option<&str> {
        match self {
            DecryptedPayload::Card { expiry, .. } => expiry.as_deref(),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            DecryptedPayload::Note { content, .. } => content.as_deref(),
            _ => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            DecryptedPayload::Login { username, .. }
            | DecryptedPayload::Card { username, .. }
            | DecryptedPayload::Note { username, .. }
            | DecryptedPayload::Other { username } => username.as_deref(),
            DecryptedPayload::Raw(_) | DecryptedPayload::DecryptError => None,
        }
    }
}

/// First present value among `keys`.
///
/// Non-empty strings count as present; numbers are rendered to text.
/// Everything else (null, bool, "", arrays, objects) is absent.
fn probe(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
