mod command_site_builder;
mod dashmap_certificate_store;
mod dashmap_object_store;
mod dashmap_zone_registry;
mod fs_object_store;
mod recording_invalidator;

pub use command_site_builder::CommandSiteBuilder;
pub use dashmap_certificate_store::DashMapCertificateStore;
pub use dashmap_object_store::{DashMapObjectStore, StoredObject};
pub use dashmap_zone_registry::DashMapZoneRegistry;
pub use fs_object_store::{FsObjectStore, ObjectMeta};
pub use recording_invalidator::{InvalidationBatch, RecordingInvalidator};
