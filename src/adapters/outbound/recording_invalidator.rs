//! Recording Invalidator
//!
//! Implements CacheInvalidator by recording batches in memory. Used for
//! tests and dry runs; a cloud deployment swaps in a provider-backed
//! implementation.

use crate::domain::ports::{CacheInvalidator, InvalidationError};
use async_trait::async_trait;
use parking_lot::Mutex;

/// One recorded invalidation submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationBatch {
    pub distribution_id: String,
    pub paths: Vec<String>,
    pub reference: String,
}

/// In-memory invalidator that remembers every batch.
#[derive(Default)]
pub struct RecordingInvalidator {
    batches: Mutex<Vec<InvalidationBatch>>,
}

impl RecordingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every batch submitted so far, in order.
    pub fn batches(&self) -> Vec<InvalidationBatch> {
        self.batches.lock().clone()
    }
}

#[async_trait]
impl CacheInvalidator for RecordingInvalidator {
    async fn invalidate(
        &self,
        distribution_id: &str,
        paths: &[String],
        reference: &str,
    ) -> Result<(), InvalidationError> {
        tracing::debug!(
            "invalidating {} paths on {} (ref {})",
            paths.len(),
            distribution_id,
            reference
        );
        self.batches.lock().push(InvalidationBatch {
            distribution_id: distribution_id.to_string(),
            paths: paths.to_vec(),
            reference: reference.to_string(),
        });
        Ok(())
    }
}
