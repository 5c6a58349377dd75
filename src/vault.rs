// src/vault.rs
//! The public operations: generate a key, seal a file, run sealed code
//!
//! Each call builds its own [`VaultContext`], so nothing secret outlives the
//! call and no buffer is shared between calls.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::aliases::HexText;
use crate::consts::{FILE_PAYLOAD_PREFIX, STDIN_PAYLOAD};
use crate::core::{key, Executor, KeyProvider, Template, VaultContext};
use crate::error::{Result, VaultError};

/// Fresh random key, hex-encoded, for storage as the environment secret
pub fn generate_key() -> HexText {
    key::generate_key()
}

/// Rewrite the file at `path` in place as a sealed script
pub fn encrypt_file<K>(path: impl AsRef<Path>, keys: &K, template: &Template) -> Result<()>
where
    K: KeyProvider + ?Sized,
{
    VaultContext::open(keys)?.encrypt_file(path.as_ref(), template)
}

/// Decrypt a hex payload and execute the recovered source
pub fn run<K, E>(hex: &str, keys: &K, executor: &mut E) -> Result<()>
where
    K: KeyProvider + ?Sized,
    E: Executor + ?Sized,
{
    VaultContext::open(keys)?.run(hex, executor)
}

/// Read a sealed file, extract its payload and run it
pub fn run_file<K, E>(
    path: impl AsRef<Path>,
    keys: &K,
    template: &Template,
    executor: &mut E,
) -> Result<()>
where
    K: KeyProvider + ?Sized,
    E: Executor + ?Sized,
{
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(VaultError::io(format!("read sealed file '{}'", path.display())))?;
    let payload = template.extract_payload(&contents)?;
    debug!(path = %path.display(), chars = payload.len(), "extracted payload");
    run(payload, keys, executor)
}

/// Where the `run` command takes its hex payload from
///
/// Sealed files pass the payload on a descriptor (`@/dev/fd/3`) or on stdin
/// (`-`), never as an argument, so it is not bound by the kernel's
/// per-argument size limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    Inline(String),
    Stdin,
    File(PathBuf),
}

impl PayloadSource {
    /// `-` is stdin, `@PATH` is a file, anything else is the payload itself
    pub fn parse(arg: &str) -> Self {
        if arg == STDIN_PAYLOAD {
            Self::Stdin
        } else if let Some(path) = arg.strip_prefix(FILE_PAYLOAD_PREFIX) {
            Self::File(PathBuf::from(path))
        } else {
            Self::Inline(arg.to_owned())
        }
    }

    /// Fetch the payload with surrounding whitespace removed
    pub fn read(self) -> Result<HexText> {
        let text = match self {
            Self::Inline(text) => text,
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(VaultError::io("read payload from stdin"))?;
                text
            }
            Self::File(path) => std::fs::read_to_string(&path).map_err(VaultError::io(format!(
                "read payload from '{}'",
                path.display()
            )))?,
        };
        Ok(trimmed(text))
    }
}

fn trimmed(mut text: String) -> HexText {
    let end = text.trim_end().len();
    text.truncate(end);
    let start = text.len() - text.trim_start().len();
    text.drain(..start);
    HexText::new(text)
}
