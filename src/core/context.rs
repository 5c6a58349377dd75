// src/core/context.rs
//! Single-use owner of every buffer touched by one encrypt or run operation
//!
//! A [`VaultContext`] is opened with a key, populated step by step, and
//! consumed by exactly one of [`VaultContext::encrypt_file`] or
//! [`VaultContext::run`]. Teardown lives in `Drop`: the key, plaintext,
//! ciphertext and hex buffers are zeroized and released, and a staged
//! temporary file is unlinked. Because the context is a local of the
//! consuming method, teardown has finished before its `Result` reaches the
//! caller, on the success path and on every `?` alike.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};
use zeroize::Zeroize;

use crate::aliases::{CipherText, HexText, PlainText, VaultKey};
use crate::consts::{HEADER_LEN, MIN_HEX_LEN};
use crate::core::envelope;
use crate::core::exec::Executor;
use crate::core::file::{AtomicRewriter, Template};
use crate::core::hex_codec;
use crate::core::key::KeyProvider;
use crate::core::util::alloc_zeroed;
use crate::error::{Result, VaultError};

/// How far an operation has populated its context
///
/// There is no empty state: [`VaultContext::open`] either returns a context
/// holding its key or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    KeyLoaded,
    PlaintextLoaded,
    CiphertextComputed,
    HexComputed,
    Done,
}

pub struct VaultContext {
    state: ContextState,
    key: VaultKey,
    plaintext: Option<PlainText>,
    ciphertext: Option<CipherText>,
    hex: Option<HexText>,
    input_path: Option<PathBuf>,
    staged: Option<AtomicRewriter>,
}

impl fmt::Debug for VaultContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultContext")
            .field("state", &self.state)
            .field("input_path", &self.input_path)
            .field("staged", &self.staged.as_ref().map(AtomicRewriter::staged_path))
            .finish_non_exhaustive()
    }
}

impl VaultContext {
    /// Start an operation by resolving its key
    pub fn open<K: KeyProvider + ?Sized>(keys: &K) -> Result<Self> {
        let key = keys.resolve_key()?;
        trace!("vault context opened");
        Ok(Self {
            state: ContextState::KeyLoaded,
            key,
            plaintext: None,
            ciphertext: None,
            hex: None,
            input_path: None,
            staged: None,
        })
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Seal the file at `path` in place
    pub fn encrypt_file(mut self, path: &Path, template: &Template) -> Result<()> {
        // Owned copy; the caller's path is never touched
        let input_path: &Path = self.input_path.insert(path.to_path_buf());
        let describe = |action: &str| format!("{action} '{}'", input_path.display());

        let mut input =
            File::open(input_path).map_err(VaultError::io(describe("read input file")))?;

        let staged = self.staged.insert(AtomicRewriter::stage(input_path)?);

        let metadata = input
            .metadata()
            .map_err(VaultError::io(describe("determine length of input file")))?;
        staged.set_permissions(metadata.permissions())?;

        let len = usize::try_from(metadata.len()).map_err(|_| VaultError::Io {
            action: describe("read input file"),
            source: io::Error::other("file too large for this platform"),
        })?;
        let plaintext = self
            .plaintext
            .insert(PlainText::new(alloc_zeroed(len, "input data")?));
        input
            .read_exact(plaintext.expose_secret_mut())
            .map_err(VaultError::io(describe("read source code from")))?;
        drop(input);
        self.state = ContextState::PlaintextLoaded;
        debug!(path = %input_path.display(), bytes = len, "read plaintext");

        let ciphertext = self
            .ciphertext
            .insert(envelope::encrypt(plaintext.expose_secret(), &self.key)?);
        self.state = ContextState::CiphertextComputed;

        let hex = self
            .hex
            .insert(hex_codec::encode(ciphertext.expose_secret()));
        self.state = ContextState::HexComputed;

        staged.write_all(template.preamble.as_bytes())?;
        staged.write_all(hex.expose_secret().as_bytes())?;
        staged.write_all(template.postamble.as_bytes())?;

        if let Some(staged) = self.staged.take() {
            staged.commit()?;
        }
        self.state = ContextState::Done;
        info!(path = %path.display(), "sealed file");
        Ok(())
    }

    /// Decrypt a hex payload and hand the recovered source to `executor`
    pub fn run<E: Executor + ?Sized>(mut self, hex: &str, executor: &mut E) -> Result<()> {
        if hex.len() < MIN_HEX_LEN {
            return Err(VaultError::InputTooShort {
                got: hex.len(),
                min: MIN_HEX_LEN,
                unit: "hex chars",
            });
        }

        // Owned by the context before decoding so a failure still zeroizes it
        let ciphertext = self
            .ciphertext
            .insert(CipherText::new(alloc_zeroed(hex.len() / 2, "ciphertext")?));
        hex_codec::decode_into(hex, ciphertext.expose_secret_mut(), "code")?;
        self.state = ContextState::CiphertextComputed;

        let plaintext = self
            .plaintext
            .insert(envelope::decrypt(ciphertext.expose_secret(), &self.key)?);
        self.state = ContextState::PlaintextLoaded;
        debug_assert_eq!(
            plaintext.expose_secret().len(),
            ciphertext.expose_secret().len() - HEADER_LEN
        );
        debug!(bytes = plaintext.expose_secret().len(), "decrypted code");

        executor
            .execute(plaintext.expose_secret())
            .map_err(|err| match err {
                err @ VaultError::ExecutionFailed { .. } => err,
                other => VaultError::ExecutionFailed {
                    reason: other.to_string(),
                },
            })?;

        self.state = ContextState::Done;
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(staged) = self.staged.take() {
            staged.discard();
        }
        // Each secret zeroizes itself as it drops
        self.hex = None;
        self.ciphertext = None;
        self.plaintext = None;
        self.key.expose_secret_mut().zeroize();
        self.input_path = None;
        trace!(state = ?self.state, "vault context torn down");
    }
}

impl Drop for VaultContext {
    fn drop(&mut self) {
        self.teardown();
    }
}
