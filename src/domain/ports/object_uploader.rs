//! Object Uploader Port
//!
//! Defines the interface for synchronizing built content into the origin.

use async_trait::async_trait;
use bytes::Bytes;

/// Error raised by the object store.
#[derive(Debug, Clone, thiserror::Error)]
#[error("object store error: {0}")]
pub struct StoreError(pub String);

/// Uploader for site objects.
///
/// Every uploaded object carries its Cache-Control header and a content
/// type. `list` and `delete` exist to support opt-in pruning; the default
/// publish policy is additive and never deletes.
#[async_trait]
pub trait ObjectUploader: Send + Sync {
    /// Store one object under the given key.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        cache_control: &str,
        content_type: &str,
    ) -> Result<(), StoreError>;

    /// List every object key currently in the bucket.
    async fn list(&self, bucket: &str) -> Result<Vec<String>, StoreError>;

    /// Remove one object.
    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StoreError>;
}
