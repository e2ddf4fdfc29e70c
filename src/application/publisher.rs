//! Publish Service - Content deployment use case
//!
//! Materializes built site content into the origin and invalidates the
//! delivery cache so changes become visible: build, upload, invalidate.

use crate::domain::entities::PublishJob;
use crate::domain::ports::{
    BuildError, CacheInvalidator, InvalidationError, ObjectUploader, SiteBuilder,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Errors raised during a publish, tagged with the failing phase so the
/// caller can decide whether to retry.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The generator failed; nothing was uploaded and the origin is
    /// unchanged.
    #[error("build phase: {0}")]
    Build(#[from] BuildError),
    /// Upload stopped partway; the origin may hold a mix of old and new
    /// objects. Not rolled back.
    #[error("upload phase: {0}")]
    Upload(String),
    /// Content is uploaded but stale cached copies may still be served.
    #[error("invalidation phase: {0}")]
    Invalidation(#[from] InvalidationError),
}

/// Outcome of a completed publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReport {
    pub uploaded: usize,
    pub pruned: usize,
    pub invalidated: usize,
    /// Caller reference submitted with the invalidation batch.
    pub invalidation_reference: String,
}

/// Publish service - runs the deployment phase.
///
/// Re-running the same job is idempotent for upload (the same source
/// tree produces the same object set), not for invalidation cost. No two
/// publishes may run concurrently against the same origin/topology pair;
/// the external deployment runner is responsible for serializing calls.
pub struct PublishService {
    builder: Arc<dyn SiteBuilder>,
    store: Arc<dyn ObjectUploader>,
    invalidator: Arc<dyn CacheInvalidator>,
}

impl PublishService {
    pub fn new(
        builder: Arc<dyn SiteBuilder>,
        store: Arc<dyn ObjectUploader>,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Self {
        Self {
            builder,
            store,
            invalidator,
        }
    }

    /// Execute one publish: build, upload, optionally prune, invalidate.
    pub async fn publish(&self, job: &PublishJob) -> Result<PublishReport, PublishError> {
        // 1. Build. A generator failure aborts before any upload.
        let output_dir = self.builder.build(&job.source_dir).await?;
        tracing::info!("site built into {}", output_dir.display());

        // 2. Upload the whole output tree, tagging cache metadata.
        let files = collect_files(&output_dir)?;
        let cache_control = format!("max-age={}", job.max_age.as_secs());
        let mut uploaded = Vec::with_capacity(files.len());

        for (key, path) in files {
            let body = tokio::fs::read(&path)
                .await
                .map_err(|e| PublishError::Upload(format!("read {}: {}", path.display(), e)))?;

            self.store
                .put(
                    &job.bucket,
                    &key,
                    Bytes::from(body),
                    &cache_control,
                    content_type(&key),
                )
                .await
                .map_err(|e| PublishError::Upload(format!("{}: {}", key, e)))?;

            tracing::debug!("uploaded {} ({})", key, cache_control);
            uploaded.push(key);
        }

        // 3. Optional prune. The default policy is additive: objects
        // absent from the new build output stay in the origin.
        let pruned = if job.prune {
            self.prune_absent(&job.bucket, &uploaded).await?
        } else {
            0
        };

        // 4. Invalidate the uploaded paths so stale cached responses are
        // not served past deployment.
        let paths: Vec<String> = uploaded.iter().map(|k| format!("/{}", k)).collect();
        let reference = Uuid::new_v4().to_string();
        if !paths.is_empty() {
            self.invalidator
                .invalidate(&job.distribution_id, &paths, &reference)
                .await?;
        }

        let report = PublishReport {
            uploaded: uploaded.len(),
            pruned,
            invalidated: paths.len(),
            invalidation_reference: reference,
        };
        tracing::info!(
            "publish complete: {} uploaded, {} pruned, {} invalidated",
            report.uploaded,
            report.pruned,
            report.invalidated
        );
        Ok(report)
    }

    /// Delete destination objects absent from this upload.
    async fn prune_absent(&self, bucket: &str, uploaded: &[String]) -> Result<usize, PublishError> {
        let keep: HashSet<&str> = uploaded.iter().map(String::as_str).collect();
        let existing = self
            .store
            .list(bucket)
            .await
            .map_err(|e| PublishError::Upload(format!("list {}: {}", bucket, e)))?;

        let mut pruned = 0;
        for key in existing {
            if !keep.contains(key.as_str()) {
                self.store
                    .delete(bucket, &key)
                    .await
                    .map_err(|e| PublishError::Upload(format!("delete {}: {}", key, e)))?;
                tracing::debug!("pruned stale object {}", key);
                pruned += 1;
            }
        }
        Ok(pruned)
    }
}

/// Walk the build output and return `(key, path)` pairs.
///
/// Keys are bucket-relative and always use `/` separators.
fn collect_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, PublishError> {
    fn walk(
        root: &Path,
        dir: &Path,
        out: &mut Vec<(String, PathBuf)>,
    ) -> Result<(), std::io::Error> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                walk(root, &path, out)?;
            } else {
                let relative = path
                    .strip_prefix(root)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                out.push((key, path));
            }
        }
        Ok(())
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files)
        .map_err(|e| PublishError::Upload(format!("walk {}: {}", dir.display(), e)))?;
    files.sort();
    Ok(files)
}

/// Resolve a content type from the object key's extension.
fn content_type(key: &str) -> &'static str {
    match key.rsplit('.').next() {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("txt") => "text/plain",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
