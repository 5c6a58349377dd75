// src/aliases.rs
//! Secret buffer types
//!
//! Every buffer that can hold key material, plaintext source or ciphertext
//! is one of these types, so it is zeroized when dropped. Access goes through
//! `expose_secret`/`expose_secret_mut` so reads of secret bytes stand out.

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use crate::consts::KEY_LEN;

/// Owned secret, wiped on drop and redacted in `Debug`
pub struct Secret<T: Zeroize>(Zeroizing<T>);

impl<T: Zeroize> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(Zeroizing::new(value))
    }

    pub fn expose_secret(&self) -> &T {
        &self.0
    }

    pub fn expose_secret_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

// Fixed-size secrets
pub type VaultKey = Secret<[u8; KEY_LEN]>; // 256-bit XChaCha20-Poly1305 key

// Dynamic secrets
pub type PlainText = Secret<Vec<u8>>; // recovered source code
pub type CipherText = Secret<Vec<u8>>; // header ‖ encrypted payload
pub type HexText = Secret<String>; // hex transport form of a ciphertext or key
