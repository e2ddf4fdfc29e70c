//! siteforge Library
//!
//! This module exposes the siteforge components for use in integration
//! tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{
    AssemblyError, PublishError, PublishReport, PublishService, SiteAssembler, SiteAssembly,
    SiteOptions,
};
pub use config::load_config;
pub use domain::entities::{
    AliasRecord, DeliveryConfig, EdgeOutcome, EdgeRequest, EdgeResponse, OriginBucket, PublishJob,
};
pub use domain::ports::{
    BucketProvisioner, CacheInvalidator, CertificateLookup, ObjectUploader, SiteBuilder,
    ZoneLookup,
};
pub use domain::services::EdgeHandler;
pub use domain::value_objects::{DomainName, DomainSet, HttpVersion, PriceClass, TlsVersion};
