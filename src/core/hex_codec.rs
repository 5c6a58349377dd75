// src/core/hex_codec.rs
//! Binary ↔ hex transcoding for the embeddable text form of a ciphertext

use crate::aliases::HexText;
use crate::core::util::alloc_zeroed;
use crate::error::{Result, VaultError};

/// Encode bytes as lowercase hex
pub fn encode(bytes: &[u8]) -> HexText {
    HexText::new(hex::encode(bytes))
}

/// Decode `text` into the front of `dest`, returning the number of bytes written
///
/// Fails on odd length, non-hex characters, or when `dest` holds fewer than
/// `text.len() / 2` bytes.
pub fn decode_into(text: &str, dest: &mut [u8], what: &'static str) -> Result<usize> {
    let hex_err = |source| VaultError::Hex { what, source };

    if text.len() % 2 != 0 {
        return Err(hex_err(hex::FromHexError::OddLength));
    }
    let len = text.len() / 2;
    if dest.len() < len {
        return Err(hex_err(hex::FromHexError::InvalidStringLength));
    }

    hex::decode_to_slice(text, &mut dest[..len]).map_err(hex_err)?;
    Ok(len)
}

/// Decode `text` into a freshly allocated buffer
pub fn decode(text: &str, what: &'static str) -> Result<Vec<u8>> {
    let mut buf = alloc_zeroed(text.len() / 2, what)?;
    decode_into(text, &mut buf, what)?;
    Ok(buf)
}
