// tests/core/envelope.rs
use script_vault::consts::{HEADER_LEN, NONCE_LEN};
use script_vault::core::envelope::{decrypt, encrypt};
use script_vault::{VaultError, VaultKey};

fn key(byte: u8) -> VaultKey {
    VaultKey::new([byte; 32])
}

#[test]
fn test_encrypt_decrypt_roundtrip_in_memory() {
    let plaintext = b"echo 'Attack at dawn!'\n";
    let key = key(0x11);

    let ciphertext = encrypt(plaintext, &key).unwrap();
    let decrypted = decrypt(ciphertext.expose_secret(), &key).unwrap();

    assert_eq!(decrypted.expose_secret().as_slice(), plaintext.as_slice());
}

#[test]
fn test_ciphertext_length_is_header_plus_plaintext() {
    let key = key(0x22);
    for len in [1usize, 15, 16, 17, 64, 1000] {
        let plaintext = vec![b'x'; len];
        let ciphertext = encrypt(&plaintext, &key).unwrap();
        assert_eq!(ciphertext.expose_secret().len(), HEADER_LEN + len);
    }
}

#[test]
fn test_empty_plaintext_produces_bare_header() {
    let key = key(0x33);
    let ciphertext = encrypt(b"", &key).unwrap();
    assert_eq!(ciphertext.expose_secret().len(), HEADER_LEN);

    let decrypted = decrypt(ciphertext.expose_secret(), &key).unwrap();
    assert!(decrypted.expose_secret().is_empty());
}

#[test]
fn test_encrypt_uses_fresh_nonce_each_time() {
    let key = key(0x44);
    let a = encrypt(b"same input", &key).unwrap();
    let b = encrypt(b"same input", &key).unwrap();

    assert_ne!(
        &a.expose_secret()[..NONCE_LEN],
        &b.expose_secret()[..NONCE_LEN]
    );
    assert_ne!(a.expose_secret(), b.expose_secret());
}

#[test]
fn test_ciphertext_does_not_contain_plaintext() {
    let key = key(0x55);
    let plaintext = b"a very recognisable secret string";
    let ciphertext = encrypt(plaintext, &key).unwrap();

    assert!(!ciphertext
        .expose_secret()
        .windows(plaintext.len())
        .any(|w| w == plaintext));
}

#[test]
fn test_flipping_any_bit_fails_authentication() {
    let key = key(0x66);
    let ciphertext = encrypt(b"puts 1", &key).unwrap();
    let original = ciphertext.expose_secret().clone();

    for byte in 0..original.len() {
        for bit in 0..8 {
            let mut tampered = original.clone();
            tampered[byte] ^= 1 << bit;
            let result = decrypt(&tampered, &key);
            assert!(
                matches!(result, Err(VaultError::AuthenticationFailed)),
                "byte {byte} bit {bit} was not detected"
            );
        }
    }
}

#[test]
fn test_decrypt_fails_with_wrong_key() {
    let ciphertext = encrypt(b"secret", &key(0x01)).unwrap();
    let wrong = decrypt(ciphertext.expose_secret(), &key(0x02));
    assert!(matches!(wrong, Err(VaultError::AuthenticationFailed)));
}

#[test]
fn test_decrypt_fails_on_truncation() {
    let key = key(0x77);
    let ciphertext = encrypt(b"truncate me", &key).unwrap();
    let bytes = ciphertext.expose_secret();

    let result = decrypt(&bytes[..bytes.len() - 1], &key);
    assert!(matches!(result, Err(VaultError::AuthenticationFailed)));
}

#[test]
fn test_decrypt_rejects_input_shorter_than_header() {
    let key = key(0x88);
    let result = decrypt(&[0u8; HEADER_LEN - 1], &key);
    match result {
        Err(err @ VaultError::InputTooShort { got, min, .. }) => {
            assert_eq!((got, min), (HEADER_LEN - 1, HEADER_LEN));
            assert_eq!(
                err.to_string(),
                "input too short: got 39 bytes, expected at least 40 bytes"
            );
        }
        other => panic!("expected InputTooShort, got {other:?}"),
    }
}

#[test]
fn test_random_header_never_authenticates() {
    let key = key(0x99);
    let result = decrypt(&[0xabu8; HEADER_LEN + 1], &key);
    assert!(matches!(result, Err(VaultError::AuthenticationFailed)));
}
