mod bucket_provisioner;
mod cache_invalidator;
mod certificate_lookup;
mod object_uploader;
mod site_builder;
mod zone_lookup;

pub use bucket_provisioner::{BucketProvisioner, ProvisionError};
pub use cache_invalidator::{CacheInvalidator, InvalidationError};
pub use certificate_lookup::CertificateLookup;
pub use object_uploader::{ObjectUploader, StoreError};
pub use site_builder::{BuildError, SiteBuilder};
pub use zone_lookup::ZoneLookup;
