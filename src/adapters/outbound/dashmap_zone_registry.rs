//! DashMap Zone Registry
//!
//! Implements ZoneLookup against an in-memory registry. Used for local
//! wiring and tests; a cloud deployment swaps in a provider-backed
//! implementation.

use crate::domain::entities::HostedZone;
use crate::domain::ports::ZoneLookup;
use async_trait::async_trait;
use dashmap::DashMap;

/// In-memory zone registry keyed by normalized zone name.
#[derive(Default)]
pub struct DashMapZoneRegistry {
    zones: DashMap<String, HostedZone>,
}

/// Zone names compare case-insensitively and ignore the trailing dot.
fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

impl DashMapZoneRegistry {
    pub fn new() -> Self {
        Self {
            zones: DashMap::new(),
        }
    }

    /// Register a zone.
    pub fn insert(&self, name: &str, id: &str) {
        self.zones.insert(
            normalize(name),
            HostedZone {
                id: id.to_string(),
                name: name.to_string(),
            },
        );
    }

    /// Builder-style registration for test setup.
    pub fn with_zone(self, name: &str, id: &str) -> Self {
        self.insert(name, id);
        self
    }
}

#[async_trait]
impl ZoneLookup for DashMapZoneRegistry {
    async fn find_zone(&self, zone_name: &str) -> Option<HostedZone> {
        self.zones.get(&normalize(zone_name)).map(|e| e.value().clone())
    }
}
