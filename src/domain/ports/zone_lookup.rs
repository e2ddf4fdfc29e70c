//! Zone Lookup Port
//!
//! Defines the interface for resolving DNS zones by name.

use crate::domain::entities::HostedZone;
use async_trait::async_trait;

/// Resolver for DNS zone names.
///
/// This is an outbound port that abstracts the zone registry of the
/// hosting account. Implementations may query a cloud DNS service or an
/// in-memory registry for tests.
#[async_trait]
pub trait ZoneLookup: Send + Sync {
    /// Resolve a zone by name.
    ///
    /// Returns the hosted zone, or None if no zone with that name exists
    /// for the account/environment. Callers treat None as fatal when a
    /// domain depends on the zone.
    async fn find_zone(&self, zone_name: &str) -> Option<HostedZone>;
}
