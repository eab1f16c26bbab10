//! The resolve, build, execute sequence.

use std::path::Path;

use crate::{
    command::{CommandError, LaunchCommand, build_command},
    config::LauncherConfig,
    paths::{PathContext, PathResolutionError},
    runner::{ChildProcessError, Executor},
};

/// Submits the application through an [`Executor`].
pub struct Launcher<E> {
    config: LauncherConfig,
    executor: E,
}

impl<E: Executor> Launcher<E> {
    #[must_use]
    pub fn new(config: LauncherConfig, executor: E) -> Self {
        Self { config, executor }
    }

    #[must_use]
    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Resolve the path context from a launcher file location.
    pub fn resolve(&self, launcher: impl AsRef<Path>) -> Result<PathContext, LaunchError> {
        Ok(PathContext::from_launcher(
            launcher,
            self.config.layout.app_root_depth,
        )?)
    }

    /// Build the client command for a resolved context.
    pub fn command(&self, ctx: &PathContext) -> Result<LaunchCommand, LaunchError> {
        Ok(build_command(ctx, &self.config)?)
    }

    /// Run a built command and return the exit code to mirror.
    pub fn execute(&self, command: &LaunchCommand) -> Result<u8, LaunchError> {
        tracing::info!(program = %command.program, "Submitting application");
        let status = self.executor.execute(command)?;
        Ok(status.exit_code())
    }

    /// Resolve paths, build the command and run it.
    ///
    /// Nothing is executed if path resolution or command assembly fails.
    pub fn launch_from(&self, launcher: impl AsRef<Path>) -> Result<u8, LaunchError> {
        let ctx = self.resolve(launcher)?;
        let command = self.command(&ctx)?;
        self.execute(&command)
    }
}

/// Errors that stop a launch.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("path resolution failed: {0}")]
    Paths(#[from] PathResolutionError),
    #[error("invalid command: {0}")]
    Command(#[from] CommandError),
    #[error(transparent)]
    Child(#[from] ChildProcessError),
}

impl LaunchError {
    /// Exit code for this process when the launch fails.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Paths(_) | Self::Command(_) => 1,
            Self::Child(e) => e.exit_code(),
        }
    }
}
