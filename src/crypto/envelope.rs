//! AES-256-GCM envelope used by the item store for `encryptedData`.
//!
//! Layout of the decoded bytes (the stored string is base64 of this):
//!   [ 12-byte IV | 16-byte auth tag | ciphertext ]
//!
//! Note the tag sits *before* the ciphertext, while `aes-gcm` appends
//! it, so both directions shuffle the pieces.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroizing;

use crate::errors::{Result, VaultAuditError};

/// Size of the AES-256-GCM nonce in bytes.
const IV_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Required key length in bytes.
pub const KEY_LEN: usize = 32;

/// A 256-bit item encryption key, wiped from memory on drop.
pub struct EncryptionKey(Zeroizing<[u8; KEY_LEN]>);

impl EncryptionKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Parse a key given as base64 or hex text.  Base64 is tried first;
    /// either way it must decode to exactly 32 bytes.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(VaultAuditError::InvalidKey("key is empty".into()));
        }

        let decoded = STANDARD
            .decode(text)
            .ok()
            .filter(|b| b.len() == KEY_LEN)
            .or_else(|| hex::decode(text).ok().filter(|b| b.len() == KEY_LEN))
            .map(Zeroizing::new)
            .ok_or_else(|| {
                VaultAuditError::InvalidKey(format!(
                    "key must be {KEY_LEN} bytes, encoded as base64 or hex"
                ))
            })?;

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self::from_bytes(bytes))
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.0.as_slice()))
    }
}

/// Generate a fresh random key, returned as base64 text.
pub fn generate_key() -> String {
    let key = Aes256Gcm::generate_key(&mut OsRng);
    STANDARD.encode(key.as_slice())
}

/// Encrypt `plaintext` and return the base64 envelope.
pub fn encrypt(key: &EncryptionKey, plaintext: &[u8]) -> Result<String> {
    let iv = Aes256Gcm::generate_nonce(&mut OsRng);

    let sealed = key
        .cipher()
        .encrypt(&iv, plaintext)
        .map_err(|e| VaultAuditError::EncryptionFailed(format!("encryption error: {e}")))?;

    // aes-gcm returns ciphertext || tag.
    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

    let mut output = Vec::with_capacity(IV_LEN + TAG_LEN + ciphertext.len());
    output.extend_from_slice(&iv);
    output.extend_from_slice(tag);
    output.extend_from_slice(ciphertext);
    Ok(STANDARD.encode(output))
}

/// Decrypt a base64 envelope produced by `encrypt` (or the item store).
pub fn decrypt(key: &EncryptionKey, payload: &str) -> Result<Vec<u8>> {
    let data = STANDARD
        .decode(payload.trim())
        .map_err(|_| VaultAuditError::DecryptionFailed)?;

    if data.len() < IV_LEN + TAG_LEN {
        return Err(VaultAuditError::DecryptionFailed);
    }

    let (iv, rest) = data.split_at(IV_LEN);
    let (tag, ciphertext) = rest.split_at(TAG_LEN);

    let mut sealed = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    sealed.extend_from_slice(ciphertext);
    sealed.extend_from_slice(tag);

    key.cipher()
        .decrypt(Nonce::from_slice(iv), sealed.as_slice())
        .map_err(|_| VaultAuditError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base64_key() {
        let text = STANDARD.encode([9u8; KEY_LEN]);
        assert!(EncryptionKey::parse(&text).is_ok());
    }

    #[test]
    fn parse_hex_key() {
        let text = hex::encode([9u8; KEY_LEN]);
        assert!(EncryptionKey::parse(&text).is_ok());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let short = STANDARD.encode([1u8; 16]);
        assert!(matches!(
            EncryptionKey::parse(&short),
            Err(VaultAuditError::InvalidKey(_))
        ));
        assert!(EncryptionKey::parse("").is_err());
        assert!(EncryptionKey::parse("zz-not-a-key").is_err());
    }

    #[test]
    fn hex_and_base64_forms_decrypt_the_same_data() {
        let raw = [0x5Au8; KEY_LEN];
        let from_b64 = EncryptionKey::parse(&STANDARD.encode(raw)).unwrap();
        let from_hex = EncryptionKey::parse(&hex::encode(raw)).unwrap();

        let blob = encrypt(&from_b64, b"{}").unwrap();
        assert_eq!(decrypt(&from_hex, &blob).unwrap(), b"{}");
    }

    #[test]
    fn envelope_layout_is_iv_tag_ciphertext() {
        let key = EncryptionKey::from_bytes([3u8; KEY_LEN]);
        let plaintext = b"hello";
        let blob = encrypt(&key, plaintext).unwrap();
        let bytes = STANDARD.decode(blob).unwrap();
        assert_eq!(bytes.len(), IV_LEN + TAG_LEN + plaintext.len());
    }

    #[test]
    fn decrypt_rejects_short_input() {
        let key = EncryptionKey::from_bytes([3u8; KEY_LEN]);
        let short = STANDARD.encode([0u8; IV_LEN + TAG_LEN - 1]);
        assert!(decrypt(&key, &short).is_err());
    }

    #[test]
    fn generated_key_parses() {
        let text = generate_key();
        assert!(EncryptionKey::parse(&text).is_ok());
        assert_ne!(text, generate_key());
    }
}
