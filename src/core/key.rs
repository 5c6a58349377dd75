// src/core/key.rs
//! Key acquisition and generation
//!
//! Operations never reach for the process environment themselves; they ask a
//! [`KeyProvider`]. [`EnvKeyProvider`] is the production source,
//! [`StaticKeyProvider`] is for tests and embedding.

use std::env::{self, VarError};

use rand::RngCore;

use crate::aliases::{HexText, VaultKey};
use crate::consts::{DEFAULT_KEY_ENV, KEY_LEN};
use crate::core::hex_codec;
use crate::error::{Result, VaultError};

/// Resolves the symmetric key for one operation
pub trait KeyProvider {
    fn resolve_key(&self) -> Result<VaultKey>;
}

/// Reads a hex-encoded key from one named environment variable, fresh on every call
#[derive(Debug, Clone)]
pub struct EnvKeyProvider {
    var: String,
}

impl EnvKeyProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvKeyProvider {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_ENV)
    }
}

impl KeyProvider for EnvKeyProvider {
    fn resolve_key(&self) -> Result<VaultKey> {
        let hex_key = match env::var(&self.var) {
            Ok(value) => HexText::new(value),
            Err(VarError::NotPresent) => {
                return Err(VaultError::KeyMissing {
                    var: self.var.clone(),
                })
            }
            Err(VarError::NotUnicode(_)) => {
                return Err(VaultError::KeyMalformed {
                    reason: format!("{} is not valid unicode", self.var),
                })
            }
        };
        decode_key(hex_key.expose_secret())
    }
}

/// Holds a key in memory and hands out copies of it
pub struct StaticKeyProvider {
    key: VaultKey,
}

impl StaticKeyProvider {
    pub fn new(key: VaultKey) -> Self {
        Self { key }
    }

    pub fn from_hex(hex_key: &str) -> Result<Self> {
        decode_key(hex_key).map(Self::new)
    }
}

impl KeyProvider for StaticKeyProvider {
    fn resolve_key(&self) -> Result<VaultKey> {
        // Slice copy into the zeroizing buffer; no loose array of key bytes
        let mut key = VaultKey::new([0u8; KEY_LEN]);
        key.expose_secret_mut().copy_from_slice(self.key.expose_secret());
        Ok(key)
    }
}

/// Decode exactly `KEY_LEN` bytes of hex straight into a zeroizing key
pub fn decode_key(hex_key: &str) -> Result<VaultKey> {
    if hex_key.len() != KEY_LEN * 2 {
        return Err(VaultError::KeyMalformed {
            reason: format!(
                "expected {} hex chars, got {}",
                KEY_LEN * 2,
                hex_key.len()
            ),
        });
    }

    let mut key = VaultKey::new([0u8; KEY_LEN]);
    // The decoder's message quotes the offending character, so it is not passed on
    hex_codec::decode_into(hex_key, key.expose_secret_mut(), "encryption key").map_err(|_| {
        VaultError::KeyMalformed {
            reason: "value is not valid hex".to_owned(),
        }
    })?;
    Ok(key)
}

/// Generate a fresh random key, hex-encoded for storage as the environment secret
pub fn generate_key() -> HexText {
    let mut key = VaultKey::new([0u8; KEY_LEN]);
    rand::rng().fill_bytes(key.expose_secret_mut());
    hex_codec::encode(key.expose_secret())
}
