#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! YARN application launcher
//!
//! Resolves repository paths from the launcher's install location, builds the
//! `hadoop jar` client invocation and runs it, mirroring the child's exit code.

pub mod command;
pub mod config;
pub mod launch;
pub mod paths;
pub mod runner;

pub use command::{LaunchCommand, build_command, build_parameters};
pub use config::LauncherConfig;
pub use launch::{LaunchError, Launcher};
pub use paths::{PathContext, PathResolutionError, resolve_paths};
pub use runner::{ChildProcessError, Executor, ExitStatus, SystemExecutor};
