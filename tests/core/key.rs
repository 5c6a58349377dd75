// tests/core/key.rs
use std::env;

use script_vault::consts::KEY_LEN;
use script_vault::core::{decode_key, generate_key};
use script_vault::{EnvKeyProvider, KeyProvider, StaticKeyProvider, VaultError};

const KEY_HEX: &str = "d0516606a61d10aeef791dedb0b298c0b52114d377ca23ef5591506460a90111";

// Every test owns its own variable so parallel tests never race on the environment
fn provider_with(var: &str, value: Option<&str>) -> EnvKeyProvider {
    match value {
        Some(value) => env::set_var(var, value),
        None => env::remove_var(var),
    }
    EnvKeyProvider::new(var)
}

#[test]
fn test_missing_variable_is_key_missing() {
    let provider = provider_with("SCRIPT_VAULT_TEST_KEY_MISSING", None);
    match provider.resolve_key() {
        Err(VaultError::KeyMissing { var }) => assert_eq!(var, "SCRIPT_VAULT_TEST_KEY_MISSING"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("resolved a key from an unset variable"),
    }
}

#[test]
fn test_short_key_is_malformed() {
    let provider = provider_with("SCRIPT_VAULT_TEST_KEY_SHORT", Some(&KEY_HEX[..62]));
    assert!(matches!(
        provider.resolve_key(),
        Err(VaultError::KeyMalformed { .. })
    ));
}

#[test]
fn test_long_key_is_malformed() {
    let long = format!("{KEY_HEX}00");
    let provider = provider_with("SCRIPT_VAULT_TEST_KEY_LONG", Some(&long));
    assert!(matches!(
        provider.resolve_key(),
        Err(VaultError::KeyMalformed { .. })
    ));
}

#[test]
fn test_non_hex_key_is_malformed() {
    let bad = format!("zz{}", &KEY_HEX[2..]);
    let provider = provider_with("SCRIPT_VAULT_TEST_KEY_NON_HEX", Some(&bad));
    assert!(matches!(
        provider.resolve_key(),
        Err(VaultError::KeyMalformed { .. })
    ));
}

#[test]
fn test_valid_key_resolves_to_its_bytes() {
    let provider = provider_with("SCRIPT_VAULT_TEST_KEY_VALID", Some(KEY_HEX));
    let key = provider.resolve_key().unwrap();
    assert_eq!(hex::encode(key.expose_secret()), KEY_HEX);
}

#[test]
fn test_key_is_resolved_fresh_each_time() {
    let var = "SCRIPT_VAULT_TEST_KEY_FRESH";
    let provider = provider_with(var, Some(KEY_HEX));
    assert!(provider.resolve_key().is_ok());

    env::remove_var(var);
    assert!(matches!(
        provider.resolve_key(),
        Err(VaultError::KeyMissing { .. })
    ));
}

#[test]
fn test_malformed_key_message_does_not_echo_the_value() {
    let bad = format!("{}zz", &KEY_HEX[..62]);
    let err = match decode_key(&bad) {
        Err(err) => err,
        Ok(_) => panic!("decoded a malformed key"),
    };
    assert!(!err.to_string().contains(&bad));
}

#[test]
fn test_generate_key_is_random_and_32_bytes() {
    let key1 = generate_key();
    let key2 = generate_key();

    assert_eq!(key1.expose_secret().len(), KEY_LEN * 2);
    assert!(key1
        .expose_secret()
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    assert_ne!(key1.expose_secret(), key2.expose_secret());
    assert!(decode_key(key1.expose_secret()).is_ok());
}

#[test]
fn test_static_provider_hands_out_the_same_key() {
    let provider = StaticKeyProvider::from_hex(KEY_HEX).unwrap();
    let a = provider.resolve_key().unwrap();
    let b = provider.resolve_key().unwrap();
    assert_eq!(a.expose_secret(), b.expose_secret());
}

#[test]
fn test_static_provider_copies_are_independent() {
    let provider = StaticKeyProvider::from_hex(KEY_HEX).unwrap();
    let mut first = provider.resolve_key().unwrap();
    first.expose_secret_mut().fill(0);

    let second = provider.resolve_key().unwrap();
    assert_eq!(second.expose_secret().len(), KEY_LEN);
    assert_eq!(hex::encode(second.expose_secret()), KEY_HEX);
}
