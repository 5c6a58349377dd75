// src/core/mod.rs
pub mod context;
pub mod envelope;
pub mod exec;
pub mod file;
pub mod hex_codec;
pub mod key;
pub mod util;

pub use context::{ContextState, VaultContext};
pub use exec::{Executor, InterpreterExecutor};
pub use file::{AtomicRewriter, Template};
pub use key::{decode_key, generate_key, EnvKeyProvider, KeyProvider, StaticKeyProvider};

pub use crate::error::Result;
