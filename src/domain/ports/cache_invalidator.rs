//! Cache Invalidator Port
//!
//! Defines the interface for discarding cached responses at the edge.

use async_trait::async_trait;

/// Error raised when an invalidation cannot be submitted.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalidation failed: {0}")]
pub struct InvalidationError(pub String);

/// Invalidator for the delivery topology's edge cache.
///
/// Called after upload completes so stale cached responses are not
/// served past deployment. Each batch carries a unique caller reference
/// so retries are distinguishable from duplicates.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Invalidate the given paths on a distribution.
    async fn invalidate(
        &self,
        distribution_id: &str,
        paths: &[String],
        reference: &str,
    ) -> Result<(), InvalidationError>;
}
