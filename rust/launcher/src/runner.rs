//! Subprocess execution for the client command.

use std::{io, process};

use crate::command::LaunchCommand;

/// Exit code used when the client binary cannot be found.
pub const EXIT_NOT_FOUND: u8 = 127;
/// Exit code used when the client binary exists but cannot be started.
pub const EXIT_NOT_EXECUTABLE: u8 = 126;

/// How the child process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Exited normally with a status code.
    Code(i32),
    /// Killed by a signal.
    Signal(i32),
}

impl ExitStatus {
    #[must_use]
    pub fn success(self) -> bool {
        self == Self::Code(0)
    }

    /// The code this process should exit with to mirror the child.
    ///
    /// Signal termination maps to `128 + signal`, the shell convention.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        let code = match self {
            Self::Code(code) => code,
            Self::Signal(signal) => 128 + signal,
        };
        u8::try_from(code & 0xff).unwrap_or(u8::MAX)
    }
}

impl From<process::ExitStatus> for ExitStatus {
    fn from(status: process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Signal(signal);
            }
        }
        Self::Code(1)
    }
}

/// Runs a built command and reports how it terminated.
pub trait Executor {
    fn execute(&self, command: &LaunchCommand) -> Result<ExitStatus, ChildProcessError>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, command: &LaunchCommand) -> Result<ExitStatus, ChildProcessError> {
        (**self).execute(command)
    }
}

/// Executes commands as real child processes.
///
/// The child inherits stdin, stdout, stderr and the environment. The call
/// blocks until the child exits; there is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&self, command: &LaunchCommand) -> Result<ExitStatus, ChildProcessError> {
        tracing::debug!("Spawning: {}", command);

        let status = command
            .to_command()
            .status()
            .map_err(|e| ChildProcessError::from_spawn(&command.program, e))?;
        let status = ExitStatus::from(status);

        if status.success() {
            tracing::info!("{} exited successfully", command.program);
        } else {
            tracing::warn!(?status, "{} exited unsuccessfully", command.program);
        }
        Ok(status)
    }
}

/// The client process could not be started.
#[derive(Debug, thiserror::Error)]
pub enum ChildProcessError {
    #[error("{0}: command not found")]
    NotFound(String),
    #[error("{0}: permission denied")]
    PermissionDenied(String),
    #[error("failed to spawn {0}: {1}")]
    Spawn(String, io::Error),
}

impl ChildProcessError {
    fn from_spawn(program: &str, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound(program.to_string()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(program.to_string()),
            _ => Self::Spawn(program.to_string(), e),
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound(_) => EXIT_NOT_FOUND,
            Self::PermissionDenied(_) | Self::Spawn(..) => EXIT_NOT_EXECUTABLE,
        }
    }
}
