// src/core/exec.rs
//! Hand-off of recovered source to whatever runs it
//!
//! An [`Executor`] receives exactly the decrypted bytes (no terminator) and
//! reports pass or fail. [`InterpreterExecutor`] streams them to a child
//! process through a pipe so the plaintext never lands on disk. By default
//! the pipe is the child's fd 3 (`sh /dev/fd/3`), which leaves the user's
//! stdin to the script itself.

use std::io::{self, ErrorKind, Write};
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::config::InterpreterSettings;
use crate::error::{Result, VaultError};

pub trait Executor {
    fn execute(&mut self, source: &[u8]) -> Result<()>;
}

impl<F> Executor for F
where
    F: FnMut(&[u8]) -> Result<()>,
{
    fn execute(&mut self, source: &[u8]) -> Result<()> {
        self(source)
    }
}

/// Runs source through an interpreter program reading its script from a pipe
#[derive(Debug, Clone)]
pub struct InterpreterExecutor {
    program: String,
    args: Vec<String>,
    source_fd: i32,
}

impl InterpreterExecutor {
    /// Interpreter reading its script from stdin
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            source_fd: 0,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Deliver the script on descriptor `fd` of the child instead of stdin
    ///
    /// The interpreter still has to be told where to look, usually with a
    /// `/dev/fd/N` argument.
    pub fn source_fd(mut self, fd: i32) -> Self {
        self.source_fd = fd;
        self
    }

    fn failed(&self, what: impl std::fmt::Display) -> VaultError {
        VaultError::ExecutionFailed {
            reason: format!("{}: {what}", self.program),
        }
    }

    fn spawn(&self) -> io::Result<(Child, Box<dyn Write>)> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);

        if self.source_fd == 0 {
            let mut child = command.stdin(Stdio::piped()).spawn()?;
            let stdin = child
                .stdin
                .take()
                .ok_or_else(|| io::Error::other("stdin was not captured"))?;
            return Ok((child, Box::new(stdin)));
        }
        spawn_with_source_fd(command, self.source_fd)
    }
}

#[cfg(unix)]
fn spawn_with_source_fd(mut command: Command, fd: i32) -> io::Result<(Child, Box<dyn Write>)> {
    use std::os::fd::AsRawFd;
    use std::os::unix::process::CommandExt;

    // Both ends are close-on-exec; only the dup'd copy survives into the child
    let (reader, writer) = io::pipe()?;
    let read_fd = reader.as_raw_fd();

    // SAFETY: the hook runs between fork and exec and only makes
    // async-signal-safe calls on descriptors it does not own
    unsafe {
        command.pre_exec(move || {
            if read_fd == fd {
                let flags = libc::fcntl(fd, libc::F_GETFD);
                if flags == -1 || libc::fcntl(fd, libc::F_SETFD, flags & !libc::FD_CLOEXEC) == -1 {
                    return Err(io::Error::last_os_error());
                }
            } else if libc::dup2(read_fd, fd) == -1 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }

    let child = command.spawn()?;
    drop(reader);
    Ok((child, Box::new(writer)))
}

#[cfg(not(unix))]
fn spawn_with_source_fd(_command: Command, fd: i32) -> io::Result<(Child, Box<dyn Write>)> {
    Err(io::Error::new(
        ErrorKind::Unsupported,
        format!("source_fd = {fd} needs a unix platform"),
    ))
}

impl Default for InterpreterExecutor {
    fn default() -> Self {
        Self::from(&InterpreterSettings::default())
    }
}

impl From<&InterpreterSettings> for InterpreterExecutor {
    fn from(settings: &InterpreterSettings) -> Self {
        Self::new(settings.program.clone())
            .args(settings.args.iter().cloned())
            .source_fd(settings.source_fd)
    }
}

impl Executor for InterpreterExecutor {
    fn execute(&mut self, source: &[u8]) -> Result<()> {
        let (mut child, mut sink) = self
            .spawn()
            .map_err(|err| self.failed(format_args!("unable to spawn: {err}")))?;
        debug!(program = %self.program, pid = child.id(), fd = self.source_fd, "interpreter started");

        let written = match sink.write_all(source) {
            Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
            other => other,
        };
        // EOF for the interpreter
        drop(sink);

        let status = child
            .wait()
            .map_err(|err| self.failed(format_args!("unable to wait: {err}")))?;
        written.map_err(|err| self.failed(format_args!("unable to write source: {err}")))?;

        if !status.success() {
            return Err(self.failed(format_args!("exited with {status}")));
        }
        debug!(program = %self.program, "interpreter finished");
        Ok(())
    }
}
