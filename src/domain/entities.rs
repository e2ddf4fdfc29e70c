//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the siteforge domain.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::{HttpVersion, PriceClass, TlsVersion};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// An incoming viewer request as seen at the delivery edge.
///
/// `uri` carries path plus query, never scheme or host. The host arrives
/// separately in the Host header; the edge platform guarantees its
/// presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRequest {
    /// Value of the Host header.
    pub host_header: String,
    /// Request path and query, e.g. `/blog/?page=2`.
    pub uri: String,
}

impl EdgeRequest {
    pub fn new(host_header: &str, uri: &str) -> Self {
        Self {
            host_header: host_header.to_string(),
            uri: uri.to_string(),
        }
    }
}

/// Redirect produced by the edge handler instead of forwarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeResponse {
    /// Always 301 for apex redirection.
    pub status: u16,
    /// Absolute redirect target, `https://<apex><original uri>`.
    pub location: String,
}

/// Result of running the edge handler on one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeOutcome {
    /// Respond immediately with a redirect; the origin is never reached.
    Redirect(EdgeResponse),
    /// Forward the (possibly rewritten) request toward the origin.
    Forward(EdgeRequest),
}

/// The storage location holding built site assets.
///
/// The bucket is fronted by an access identity so it is never publicly
/// readable; only the delivery topology's identity may fetch objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginBucket {
    /// Bucket name, unique within the object store.
    pub name: String,
    /// Access-control identity the delivery layer authenticates as.
    pub access_identity: String,
}

/// A DNS zone resolved through the `ZoneLookup` port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    /// Provider-assigned zone identifier.
    pub id: String,
    /// Zone name, e.g. `example.com`.
    pub name: String,
}

/// A TLS certificate resolved through the `CertificateLookup` port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Provider-assigned certificate reference.
    pub arn: String,
}

/// One alias record resolving a hostname to the delivery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    /// Hostname the record answers for.
    pub record_name: String,
    /// Zone the record is created in.
    pub zone_id: String,
    /// Resource identifier, derived from the domain's id token so that
    /// multiple domains sharing a zone never collide.
    pub record_id: String,
    /// The delivery topology's alias address.
    pub target: String,
}

/// Stage of the delivery pipeline a handler is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandlerStage {
    /// Before cache lookup, for every request regardless of cache state.
    ViewerRequest,
    /// After the response is produced, before returning to the viewer.
    ViewerResponse,
}

impl HandlerStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewerRequest => "viewer-request",
            Self::ViewerResponse => "viewer-response",
        }
    }
}

/// Mapping of an origin error status to a custom response page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMapping {
    /// Status code returned by the origin.
    pub error_code: u16,
    /// Object served instead, e.g. `/404.html`.
    pub response_page_path: String,
    /// Status code returned to the viewer. Not remapped to 200.
    pub response_code: u16,
}

/// Complete, internally consistent distribution configuration.
///
/// Produced once by the topology composer and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Logical identifier for the distribution.
    pub id: String,
    /// Generated endpoint hostname; the alias target for DNS records.
    pub endpoint: String,
    /// Storage origin behind this distribution.
    pub origin: OriginBucket,
    /// Rendered source of the edge request handler.
    pub handler_source: String,
    /// Stage the handler runs at. Always the viewer-request stage.
    pub handler_stage: HandlerStage,
    /// Certificate backing custom-domain TLS, when configured.
    pub certificate: Option<Certificate>,
    /// Servable hostnames. Empty unless a certificate is attached.
    pub aliases: Vec<String>,
    pub price_class: PriceClass,
    pub minimum_tls: TlsVersion,
    pub http_version: HttpVersion,
    /// Dual-stack addressing. Always on.
    pub ipv6_enabled: bool,
    /// Object served for directory roots, `index.html`.
    pub default_root_object: String,
    pub error_mappings: Vec<ErrorMapping>,
}

/// Deferred deployment action: build, upload, invalidate.
///
/// Created at assembly time, executed later by the publish service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishJob {
    /// Directory holding the site source fed to the external generator.
    pub source_dir: PathBuf,
    /// Cache lifetime tagged onto every uploaded object.
    pub max_age: Duration,
    /// Target bucket name.
    pub bucket: String,
    /// Distribution whose cache is invalidated after upload.
    pub distribution_id: String,
    /// Delete destination objects absent from the build output.
    /// Off by default: publishing is additive.
    pub prune: bool,
}
