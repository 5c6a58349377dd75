// src/error.rs
//! Public error type for the entire crate
//!
//! Messages name the failing step and carry OS error text where there is
//! one. They never carry key material, plaintext or ciphertext.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("environment variable not found: {var}")]
    KeyMissing { var: String },

    #[error("unable to hex-decode encryption key: {reason}")]
    KeyMalformed { reason: String },

    /// `unit` is "hex chars" for a payload and "bytes" for a raw envelope
    #[error("input too short: got {got} {unit}, expected at least {min} {unit}")]
    InputTooShort {
        got: usize,
        min: usize,
        unit: &'static str,
    },

    #[error("unable to hex-decode {what}: {source}")]
    Hex {
        what: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("unable to decrypt code: authentication failed")]
    AuthenticationFailed,

    #[error("unable to encrypt code")]
    EncryptionFailed,

    #[error("unable to {action}: {source}")]
    Io {
        action: String,
        #[source]
        source: io::Error,
    },

    #[error("unable to allocate memory for {what}: {source}")]
    AllocationFailed {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error("unable to execute code: {reason}")]
    ExecutionFailed { reason: String },

    #[error("not a sealed script: {reason}")]
    NotSealed { reason: &'static str },

    #[error("invalid config file '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl VaultError {
    /// Adapter for `map_err` that tags an I/O error with the step it broke
    pub fn io(action: impl Into<String>) -> impl FnOnce(io::Error) -> VaultError {
        let action = action.into();
        move |source| VaultError::Io { action, source }
    }
}
