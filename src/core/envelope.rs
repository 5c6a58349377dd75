// src/core/envelope.rs
//! Pure cryptographic primitives, no I/O
//!
//! Envelope layout:
//!
//! ```text
//! [ nonce (24) ][ tag (16) ][ XChaCha20 ciphertext (len = plaintext) ]
//! ```
//!
//! `CONTEXT` is bound in as associated data, so an envelope only opens under
//! the same key *and* inside this system.

use chacha20poly1305::aead::{AeadInPlace, KeyInit};
use chacha20poly1305::{Key, Tag, XChaCha20Poly1305, XNonce};
use rand::RngCore;

use crate::aliases::{CipherText, PlainText, VaultKey};
use crate::consts::{CONTEXT, HEADER_LEN, NONCE_LEN};
use crate::core::util::alloc_zeroed;
use crate::error::{Result, VaultError};

fn cipher(key: &VaultKey) -> XChaCha20Poly1305 {
    XChaCha20Poly1305::new(Key::from_slice(key.expose_secret()))
}

/// Encrypt plaintext in memory → `HEADER_LEN + plaintext.len()` bytes
pub fn encrypt(plaintext: &[u8], key: &VaultKey) -> Result<CipherText> {
    let mut ciphertext = CipherText::new(alloc_zeroed(HEADER_LEN + plaintext.len(), "ciphertext")?);
    let out = ciphertext.expose_secret_mut();

    let (header, body) = out.split_at_mut(HEADER_LEN);
    let (nonce, tag_slot) = header.split_at_mut(NONCE_LEN);
    rand::rng().fill_bytes(nonce);
    body.copy_from_slice(plaintext);

    let tag = cipher(key)
        .encrypt_in_place_detached(XNonce::from_slice(nonce), CONTEXT, body)
        .map_err(|_| VaultError::EncryptionFailed)?;
    tag_slot.copy_from_slice(&tag);

    Ok(ciphertext)
}

/// Decrypt an envelope → plaintext of exactly `ciphertext.len() - HEADER_LEN` bytes
///
/// The tag is verified before the payload is decrypted; on failure the
/// scratch buffer is dropped (and zeroized) without being returned.
pub fn decrypt(ciphertext: &[u8], key: &VaultKey) -> Result<PlainText> {
    if ciphertext.len() < HEADER_LEN {
        return Err(VaultError::InputTooShort {
            got: ciphertext.len(),
            min: HEADER_LEN,
            unit: "bytes",
        });
    }

    let (header, body) = ciphertext.split_at(HEADER_LEN);
    let (nonce, tag) = header.split_at(NONCE_LEN);

    let mut plaintext = PlainText::new(alloc_zeroed(body.len(), "plaintext")?);
    let buf = plaintext.expose_secret_mut();
    buf.copy_from_slice(body);

    cipher(key)
        .decrypt_in_place_detached(XNonce::from_slice(nonce), CONTEXT, buf, Tag::from_slice(tag))
        .map_err(|_| VaultError::AuthenticationFailed)?;

    Ok(plaintext)
}
