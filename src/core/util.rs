//! Small utility functions used across the core module
//!
//! Buffer allocation lives here so every secret buffer is sized up front and
//! allocation failure is reported instead of aborting the process.

use crate::error::{Result, VaultError};

/// Allocate a zero-filled buffer of exactly `len` bytes
pub fn alloc_zeroed(len: usize, what: &'static str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| VaultError::AllocationFailed { what, source })?;
    buf.resize(len, 0);
    Ok(buf)
}
