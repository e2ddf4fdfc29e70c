//! Command Site Builder
//!
//! Implements SiteBuilder by spawning the external static-site
//! generator as a child process: `<generator> -d <output-dir>`, run in
//! the site source directory.

use crate::domain::ports::{BuildError, SiteBuilder};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Process-spawning site builder.
pub struct CommandSiteBuilder {
    program: String,
    output_dir: PathBuf,
}

impl CommandSiteBuilder {
    /// `program` is the generator binary; `output_dir` is where it is
    /// told to emit the built site (relative paths resolve against the
    /// source directory).
    pub fn new(program: &str, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.to_string(),
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl SiteBuilder for CommandSiteBuilder {
    async fn build(&self, source_dir: &Path) -> Result<PathBuf, BuildError> {
        let out = if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            source_dir.join(&self.output_dir)
        };

        tracing::info!(
            "running {} -d {} in {}",
            self.program,
            out.display(),
            source_dir.display()
        );

        let output = Command::new(&self.program)
            .arg("-d")
            .arg(&out)
            .current_dir(source_dir)
            .output()
            .await
            .map_err(|e| BuildError::Spawn(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(BuildError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(out)
    }
}
