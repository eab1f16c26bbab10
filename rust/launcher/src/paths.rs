//! Repository paths derived from the launcher's install location.

use std::{
    io,
    path::{Path, PathBuf},
};

/// The two directories every other path is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    /// Application root, `depth` levels above the launcher file.
    pub app_root: PathBuf,
    /// Project root, one level above the application root.
    pub project_root: PathBuf,
}

impl PathContext {
    /// Build a context from known directories without touching the filesystem.
    #[must_use]
    pub fn new(app_root: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            project_root: project_root.into(),
        }
    }

    /// Resolve the context from the launcher file's location.
    ///
    /// The path is canonicalized first, so a symlinked launcher resolves
    /// relative to its real location.
    pub fn from_launcher(
        launcher: impl AsRef<Path>,
        depth: usize,
    ) -> Result<Self, PathResolutionError> {
        let launcher = launcher.as_ref();
        let real = launcher
            .canonicalize()
            .map_err(|e| PathResolutionError::Canonicalize(launcher.to_path_buf(), e))?;

        let app_root = real
            .ancestors()
            .nth(depth)
            .ok_or_else(|| PathResolutionError::MissingAncestor {
                launcher: real.clone(),
                depth,
            })?
            .to_path_buf();
        let project_root = app_root
            .parent()
            .ok_or_else(|| PathResolutionError::MissingAncestor {
                launcher: real.clone(),
                depth: depth + 1,
            })?
            .to_path_buf();

        for dir in [&app_root, &project_root] {
            if !dir.is_dir() {
                return Err(PathResolutionError::NotADirectory(dir.clone()));
            }
        }

        tracing::debug!(
            app_root = %app_root.display(),
            project_root = %project_root.display(),
            "Resolved paths"
        );

        Ok(Self {
            app_root,
            project_root,
        })
    }
}

/// Resolve the context from the running executable's location.
pub fn resolve_paths(depth: usize) -> Result<PathContext, PathResolutionError> {
    let exe = std::env::current_exe().map_err(PathResolutionError::CurrentExe)?;
    PathContext::from_launcher(exe, depth)
}

/// The launcher's install location does not have the expected layout above it.
#[derive(Debug, thiserror::Error)]
pub enum PathResolutionError {
    #[error("failed to locate the running executable: {0}")]
    CurrentExe(io::Error),
    #[error("failed to resolve launcher path {0}: {1}")]
    Canonicalize(PathBuf, io::Error),
    #[error("launcher {launcher} has no ancestor {depth} levels up")]
    MissingAncestor { launcher: PathBuf, depth: usize },
    #[error("expected a directory at {0}")]
    NotADirectory(PathBuf),
}
