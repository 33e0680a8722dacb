//! Integration tests for the item encryption envelope.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use vaultaudit::crypto::{decrypt, encrypt, generate_key, EncryptionKey};
use vaultaudit::vault::{DecryptedPayload, ItemType};

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = EncryptionKey::from_bytes([0xABu8; 32]);
    let plaintext = br#"{"username":"me","password":"hunter2"}"#;

    let blob = encrypt(&key, plaintext).expect("encrypt should succeed");
    let recovered = decrypt(&key, &blob).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_envelopes_each_time() {
    let key = EncryptionKey::from_bytes([0xCDu8; 32]);

    let a = encrypt(&key, b"same").expect("encrypt 1");
    let b = encrypt(&key, b"same").expect("encrypt 2");

    // Fresh IV per call.
    assert_ne!(a, b);
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = EncryptionKey::from_bytes([0x11u8; 32]);
    let wrong = EncryptionKey::from_bytes([0x22u8; 32]);

    let blob = encrypt(&key, b"{}").expect("encrypt");
    assert!(decrypt(&wrong, &blob).is_err());
}

#[test]
fn decrypt_detects_tampering() {
    let key = EncryptionKey::from_bytes([0x33u8; 32]);
    let blob = encrypt(&key, b"card data").expect("encrypt");

    let mut bytes = STANDARD.decode(&blob).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    let tampered = STANDARD.encode(bytes);

    assert!(decrypt(&key, &tampered).is_err());
}

#[test]
fn decrypt_rejects_invalid_base64() {
    let key = EncryptionKey::from_bytes([0x44u8; 32]);
    assert!(decrypt(&key, "%%% not base64 %%%").is_err());
}

// ---------------------------------------------------------------------------
// Key handling
// ---------------------------------------------------------------------------

#[test]
fn generated_keys_round_trip_through_text() {
    let text = generate_key();
    let key = EncryptionKey::parse(&text).expect("generated key parses");

    let blob = encrypt(&key, b"x").unwrap();
    let again = EncryptionKey::parse(&text).unwrap();
    assert_eq!(decrypt(&again, &blob).unwrap(), b"x");
}

#[test]
fn key_text_is_trimmed() {
    let text = format!("  {}\n", generate_key());
    assert!(EncryptionKey::parse(&text).is_ok());
}

// ---------------------------------------------------------------------------
// Decrypt then resolve
// ---------------------------------------------------------------------------

#[test]
fn decrypted_bytes_resolve_by_item_type() {
    let key = EncryptionKey::from_bytes([0x55u8; 32]);
    let blob = encrypt(&key, br#"{"cardExpiry":"09/31","username":"me"}"#).unwrap();
    let plaintext = decrypt(&key, &blob).unwrap();

    let payload = DecryptedPayload::resolve(Some(&ItemType::Card), &plaintext);
    assert_eq!(payload.expiry(), Some("09/31"));
    assert_eq!(payload.username(), Some("me"));
}
