//! Certificate Lookup Port
//!
//! Defines the interface for resolving TLS certificates by reference.

use crate::domain::entities::Certificate;
use async_trait::async_trait;

/// Resolver for TLS certificate references.
///
/// Certificate issuance is out of scope; the topology only needs to know
/// whether a usable certificate exists for the configured reference.
#[async_trait]
pub trait CertificateLookup: Send + Sync {
    /// Resolve a certificate by its reference.
    ///
    /// Returns None when the reference does not resolve to a usable
    /// certificate.
    async fn find(&self, arn: &str) -> Option<Certificate>;
}
