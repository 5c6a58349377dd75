// src/core/file.rs
//! On-disk side of sealing: the stub template and the atomic rewrite
//!
//! A sealed file is `<preamble><hex payload><postamble>`. The rewrite stages
//! the new contents in `<dir>/.vault.XXXXXX` beside the target and renames it
//! over the target only once it is fully written, synced and closed.

use std::fs::{self, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::TemplateSettings;
use crate::consts::{DEFAULT_POSTAMBLE, DEFAULT_PREAMBLE, TEMP_PREFIX, TEMP_RAND_LEN};
use crate::error::{Result, VaultError};

/// Literal text framing the hex payload of a sealed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub preamble: String,
    pub postamble: String,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_owned(),
            postamble: DEFAULT_POSTAMBLE.to_owned(),
        }
    }
}

impl From<&TemplateSettings> for Template {
    fn from(settings: &TemplateSettings) -> Self {
        Self {
            preamble: settings.preamble.clone(),
            postamble: settings.postamble.clone(),
        }
    }
}

impl Template {
    /// Pull the hex payload back out of a sealed file's contents
    pub fn extract_payload<'a>(&self, contents: &'a str) -> Result<&'a str> {
        let rest = contents
            .strip_prefix(self.preamble.as_str())
            .ok_or(VaultError::NotSealed {
                reason: "preamble not found",
            })?;
        rest.strip_suffix(self.postamble.as_str())
            .ok_or(VaultError::NotSealed {
                reason: "postamble not found",
            })
    }
}

/// Directory holding `path`, with `.` for bare file names
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// A staged replacement for one target file
///
/// Dropping it without [`commit`](Self::commit) unlinks the staged file and
/// leaves the target untouched.
#[derive(Debug)]
pub struct AtomicRewriter {
    target: PathBuf,
    staged: NamedTempFile,
}

impl AtomicRewriter {
    /// Create a uniquely named staging file in the target's own directory
    pub fn stage(target: &Path) -> Result<Self> {
        let target = target.to_path_buf();
        let staged = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .rand_bytes(TEMP_RAND_LEN)
            .tempfile_in(parent_dir(&target))
            .map_err(VaultError::io("create temporary file"))?;

        debug!(staged = %staged.path().display(), "staged temporary file");
        Ok(Self { target, staged })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn staged_path(&self) -> &Path {
        self.staged.path()
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.staged
            .write_all(bytes)
            .map_err(VaultError::io("write to temporary file"))
    }

    /// Give the staged file the same permission bits as the target it replaces
    pub fn set_permissions(&self, permissions: Permissions) -> Result<()> {
        fs::set_permissions(self.staged.path(), permissions)
            .map_err(VaultError::io("set permissions on temporary file"))
    }

    /// Flush, sync and close the staged file, then rename it over the target
    pub fn commit(mut self) -> Result<()> {
        self.staged
            .flush()
            .map_err(VaultError::io("write to temporary file"))?;
        self.staged
            .as_file()
            .sync_all()
            .map_err(VaultError::io("sync temporary file"))?;

        // Closes the handle; the path is still unlinked on drop until persisted
        let staged = self.staged.into_temp_path();
        staged
            .persist(&self.target)
            .map_err(|err| VaultError::Io {
                action: "rename temporary file".to_owned(),
                source: err.error,
            })?;

        debug!(target = %self.target.display(), "replaced target");
        Ok(())
    }

    /// Drop the staged file without touching the target
    pub fn discard(self) {
        debug!(staged = %self.staged.path().display(), "discarding temporary file");
    }
}
