// src/lib.rs
//! script-vault: keep scripts encrypted at rest, decrypt them only to run them
//!
//! Features:
//! - XChaCha20-Poly1305 envelopes with a fixed 40-byte header
//! - Sealed files that are themselves runnable stubs
//! - Atomic write-then-rename rewrites
//! - Secret buffers zeroized on every exit path

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod vault;

pub mod error;

// Re-export everything users need at the crate root
pub use aliases::{CipherText, HexText, PlainText, Secret, VaultKey};
pub use config::{load as load_config, Config};
pub use crate::core::{
    ContextState, EnvKeyProvider, Executor, InterpreterExecutor, KeyProvider, StaticKeyProvider,
    Template, VaultContext,
};
pub use error::{Result, VaultError};
pub use vault::{encrypt_file, generate_key, run, run_file, PayloadSource};
