//! Site Builder Port
//!
//! Defines the interface for invoking the external static-site generator.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Error raised when the external generator fails.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    #[error("failed to launch generator: {0}")]
    Spawn(String),
    #[error("generator exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },
}

/// Invoker for the external static-site generator.
///
/// The generator is run against the site source directory and emits its
/// output to a build directory; that directory is what gets published.
#[async_trait]
pub trait SiteBuilder: Send + Sync {
    /// Build the site and return the output directory.
    ///
    /// A non-zero generator exit aborts the publish before any upload.
    async fn build(&self, source_dir: &Path) -> Result<PathBuf, BuildError>;
}
