//! Bucket Provisioner Port
//!
//! Defines the interface for materializing the content origin.

use crate::domain::entities::OriginBucket;
use async_trait::async_trait;

/// Error raised when the origin cannot be provisioned.
#[derive(Debug, Clone, thiserror::Error)]
#[error("bucket provisioning failed: {0}")]
pub struct ProvisionError(pub String);

/// Provisioner for the storage origin.
///
/// The mechanics of creating the bucket are external; this port only
/// guarantees that a bucket with the given name exists afterwards and is
/// fronted by an access identity, so it is never publicly readable.
#[async_trait]
pub trait BucketProvisioner: Send + Sync {
    /// Ensure a bucket with this name exists and return its descriptor.
    ///
    /// Idempotent: provisioning an existing bucket returns the same
    /// descriptor.
    async fn provision(&self, name: &str) -> Result<OriginBucket, ProvisionError>;
}
