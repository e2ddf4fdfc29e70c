//! Site Assembler - Main application use case
//!
//! Composes the full delivery topology from supplied or defaulted
//! options: origin, distribution configuration, edge handler source,
//! DNS bindings, and the deferred publish job. This is the primary
//! interface for callers assembling a site.

use crate::domain::entities::{
    AliasRecord, DeliveryConfig, ErrorMapping, HandlerStage, PublishJob,
};
use crate::domain::ports::{BucketProvisioner, CertificateLookup, ProvisionError, ZoneLookup};
use crate::domain::services::{handler_source, EdgeHandler, HandlerSourceError};
use crate::domain::value_objects::{DomainSet, HttpVersion, PriceClass, TlsVersion};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default bucket name when none is supplied.
const DEFAULT_BUCKET: &str = "site-content";

/// Default cache lifetime for published objects: 60 minutes.
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(3600);

/// Construction-time options for one site.
///
/// Everything except `source_dir` is optional and falls back to the
/// documented defaults.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Directory holding the site source. Required.
    pub source_dir: PathBuf,
    /// Bucket name for the content origin.
    pub bucket: Option<String>,
    /// Reference to the TLS certificate covering the domain list.
    pub certificate_arn: Option<String>,
    /// Servable hostnames; index 0 is the apex.
    pub domains: DomainSet,
    pub price_class: Option<PriceClass>,
    pub minimum_tls: Option<TlsVersion>,
    pub http_version: Option<HttpVersion>,
    /// Cache lifetime for published objects.
    pub max_age: Option<Duration>,
    /// Delete destination objects absent from the build output.
    pub prune: bool,
}

impl SiteOptions {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            bucket: None,
            certificate_arn: None,
            domains: DomainSet::default(),
            price_class: None,
            minimum_tls: None,
            http_version: None,
            max_age: None,
            prune: false,
        }
    }
}

/// The fully-linked, immutable set of entities for one site.
///
/// Serializable so the declarative resource set can be inspected or
/// handed to an external provisioner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAssembly {
    pub delivery: DeliveryConfig,
    /// One alias record per configured domain.
    pub bindings: Vec<AliasRecord>,
    /// Deferred deployment action, executed by the publish service.
    pub publish_job: PublishJob,
    /// `https://<apex>`, or the generated endpoint when no domain is
    /// configured.
    pub resolved_url: String,
}

/// Errors raised during assembly.
///
/// Any of these aborts the whole topology construction; no partial
/// infrastructure is considered valid.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// Domain list non-empty but no certificate resolvable; the custom
    /// domains could never be served over TLS.
    #[error("domain names configured but no usable certificate; supply a certificate or drop the domain list")]
    Configuration,
    /// A configured domain's zone does not exist for this account.
    #[error("hosted zone '{zone}' not found for domain '{domain}'")]
    ZoneNotFound { domain: String, zone: String },
    #[error(transparent)]
    HandlerSource(#[from] HandlerSourceError),
    #[error(transparent)]
    Provision(#[from] ProvisionError),
}

/// Site assembler - composes the delivery topology.
///
/// Assembly is synchronous, single-pass, and side-effect-free except for
/// origin provisioning, which runs only after every validation has
/// passed.
pub struct SiteAssembler {
    zones: Arc<dyn ZoneLookup>,
    certificates: Arc<dyn CertificateLookup>,
    buckets: Arc<dyn BucketProvisioner>,
}

impl SiteAssembler {
    pub fn new(
        zones: Arc<dyn ZoneLookup>,
        certificates: Arc<dyn CertificateLookup>,
        buckets: Arc<dyn BucketProvisioner>,
    ) -> Self {
        Self {
            zones,
            certificates,
            buckets,
        }
    }

    /// Assemble the full topology.
    ///
    /// Order of operations:
    /// 1. Resolve the certificate and reject domains-without-certificate.
    /// 2. Render the edge handler with the apex embedded.
    /// 3. Resolve every domain's zone (fails naming the first domain
    ///    whose zone is missing).
    /// 4. Provision the origin.
    /// 5. Derive the delivery configuration, bindings, and publish job.
    pub async fn assemble(&self, opts: SiteOptions) -> Result<SiteAssembly, AssemblyError> {
        // 1. Certificate resolution. A dangling reference counts as
        // missing: the topology would not be reachable over HTTPS on the
        // custom domains, so fail at assembly instead of at runtime.
        let certificate = match &opts.certificate_arn {
            Some(arn) => {
                let found = self.certificates.find(arn).await;
                if found.is_none() {
                    tracing::warn!("certificate reference '{}' did not resolve", arn);
                }
                found
            }
            None => None,
        };
        if !opts.domains.is_empty() && certificate.is_none() {
            return Err(AssemblyError::Configuration);
        }

        // 2. Edge handler, parameterized with the apex. The rendered
        // source embeds the same apex the pure handler would use, so the
        // deployed function and the in-process model agree byte-for-byte.
        let handler = EdgeHandler::for_domains(&opts.domains);
        let source = handler_source::render(handler.apex())?;

        // 3. Zone resolution for every configured domain.
        let mut zones = Vec::with_capacity(opts.domains.len());
        for domain in opts.domains.iter() {
            let zone = self.zones.find_zone(domain.zone_name()).await.ok_or_else(|| {
                AssemblyError::ZoneNotFound {
                    domain: domain.hostname().to_string(),
                    zone: domain.zone_name().to_string(),
                }
            })?;
            zones.push((domain.clone(), zone));
        }

        // 4. Origin provisioning.
        let bucket_name = opts.bucket.as_deref().unwrap_or(DEFAULT_BUCKET);
        let origin = self.buckets.provision(bucket_name).await?;
        tracing::debug!(
            "origin '{}' provisioned behind identity '{}'",
            origin.name,
            origin.access_identity
        );

        // 5. Delivery configuration with defaults.
        let id = format!("dist-{}", origin.name);
        let endpoint = format!("{}.distribution.local", id);

        let aliases = if certificate.is_some() {
            opts.domains.iter().map(|d| d.hostname().to_string()).collect()
        } else {
            // No certificate: the domain list is still recorded for DNS
            // purposes, but only the generated hostname is servable.
            Vec::new()
        };

        let delivery = DeliveryConfig {
            id: id.clone(),
            endpoint: endpoint.clone(),
            origin: origin.clone(),
            handler_source: source,
            handler_stage: HandlerStage::ViewerRequest,
            certificate,
            aliases,
            price_class: opts.price_class.unwrap_or_default(),
            minimum_tls: opts.minimum_tls.unwrap_or_default(),
            http_version: opts.http_version.unwrap_or_default(),
            ipv6_enabled: true,
            default_root_object: "index.html".to_string(),
            error_mappings: vec![ErrorMapping {
                error_code: 404,
                response_page_path: "/404.html".to_string(),
                response_code: 404,
            }],
        };

        let bindings = zones
            .into_iter()
            .map(|(domain, zone)| AliasRecord {
                record_name: domain.hostname().to_string(),
                zone_id: zone.id,
                record_id: format!("alias-{}", domain.id_token()),
                target: endpoint.clone(),
            })
            .collect::<Vec<_>>();

        let publish_job = PublishJob {
            source_dir: opts.source_dir,
            max_age: opts.max_age.unwrap_or(DEFAULT_MAX_AGE),
            bucket: origin.name.clone(),
            distribution_id: id,
            prune: opts.prune,
        };

        let resolved_url = match handler.apex() {
            Some(apex) => format!("https://{}", apex),
            None => format!("https://{}", endpoint),
        };

        tracing::info!(
            "assembled topology: {} domains, {} bindings, url {}",
            opts.domains.len(),
            bindings.len(),
            resolved_url
        );

        Ok(SiteAssembly {
            delivery,
            bindings,
            publish_job,
            resolved_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Certificate, HostedZone, OriginBucket};
    use crate::domain::value_objects::DomainName;
    use async_trait::async_trait;
    use std::collections::HashMap;

    // ===== Mock Implementations =====

    struct MockZones {
        zones: HashMap<String, HostedZone>,
    }

    impl MockZones {
        fn new() -> Self {
            Self {
                zones: HashMap::new(),
            }
        }

        fn with_zone(mut self, name: &str, id: &str) -> Self {
            self.zones.insert(
                name.to_string(),
                HostedZone {
                    id: id.to_string(),
                    name: name.to_string(),
                },
            );
            self
        }
    }

    #[async_trait]
    impl ZoneLookup for MockZones {
        async fn find_zone(&self, zone_name: &str) -> Option<HostedZone> {
            self.zones.get(zone_name).cloned()
        }
    }

    struct MockCertificates {
        arns: Vec<String>,
    }

    #[async_trait]
    impl CertificateLookup for MockCertificates {
        async fn find(&self, arn: &str) -> Option<Certificate> {
            self.arns.iter().find(|a| *a == arn).map(|a| Certificate {
                arn: a.clone(),
            })
        }
    }

    struct MockBuckets;

    #[async_trait]
    impl BucketProvisioner for MockBuckets {
        async fn provision(&self, name: &str) -> Result<OriginBucket, ProvisionError> {
            Ok(OriginBucket {
                name: name.to_string(),
                access_identity: format!("origin-access-{}", name),
            })
        }
    }

    // ===== Test Helpers =====

    fn assembler(zones: MockZones, cert_arns: Vec<&str>) -> SiteAssembler {
        SiteAssembler::new(
            Arc::new(zones),
            Arc::new(MockCertificates {
                arns: cert_arns.into_iter().map(String::from).collect(),
            }),
            Arc::new(MockBuckets),
        )
    }

    fn domain(hostname: &str, zone: &str) -> DomainName {
        DomainName::new(hostname, zone).unwrap()
    }

    fn options_with_domains(domains: Vec<DomainName>, cert: Option<&str>) -> SiteOptions {
        let mut opts = SiteOptions::new("site");
        opts.domains = DomainSet::new(domains);
        opts.certificate_arn = cert.map(String::from);
        opts
    }

    // ===== Defaulting Tests =====

    #[tokio::test]
    async fn test_assemble_applies_defaults() {
        let assembler = assembler(MockZones::new(), vec![]);
        let assembly = assembler.assemble(SiteOptions::new("site")).await.unwrap();

        let delivery = &assembly.delivery;
        assert_eq!(delivery.price_class, PriceClass::Class100);
        assert_eq!(delivery.minimum_tls, TlsVersion::Tls12_2021);
        assert_eq!(delivery.http_version, HttpVersion::Http1_1);
        assert_eq!(delivery.default_root_object, "index.html");
        assert!(delivery.ipv6_enabled);
        assert_eq!(assembly.publish_job.max_age, Duration::from_secs(3600));
        assert!(!assembly.publish_job.prune);
    }

    #[tokio::test]
    async fn test_assemble_maps_404_without_remapping_status() {
        let assembler = assembler(MockZones::new(), vec![]);
        let assembly = assembler.assemble(SiteOptions::new("site")).await.unwrap();

        let mapping = &assembly.delivery.error_mappings[0];
        assert_eq!(mapping.error_code, 404);
        assert_eq!(mapping.response_page_path, "/404.html");
        assert_eq!(mapping.response_code, 404);
    }

    #[tokio::test]
    async fn test_assemble_respects_supplied_options() {
        let assembler = assembler(MockZones::new(), vec![]);
        let mut opts = SiteOptions::new("site");
        opts.price_class = Some(PriceClass::ClassAll);
        opts.http_version = Some(HttpVersion::Http2);
        opts.max_age = Some(Duration::from_secs(60));
        opts.bucket = Some("my-bucket".to_string());

        let assembly = assembler.assemble(opts).await.unwrap();

        assert_eq!(assembly.delivery.price_class, PriceClass::ClassAll);
        assert_eq!(assembly.delivery.http_version, HttpVersion::Http2);
        assert_eq!(assembly.publish_job.max_age, Duration::from_secs(60));
        assert_eq!(assembly.delivery.origin.name, "my-bucket");
    }

    // ===== Resolved URL Tests =====

    #[tokio::test]
    async fn test_resolved_url_uses_apex() {
        let zones = MockZones::new().with_zone("example.com", "Z1");
        let assembler = assembler(zones, vec!["arn:cert"]);

        let opts = options_with_domains(
            vec![
                domain("www.example.com", "example.com"),
                domain("example.com", "example.com"),
            ],
            Some("arn:cert"),
        );

        let assembly = assembler.assemble(opts).await.unwrap();
        assert_eq!(assembly.resolved_url, "https://www.example.com");
    }

    #[tokio::test]
    async fn test_resolved_url_falls_back_to_endpoint() {
        let assembler = assembler(MockZones::new(), vec![]);
        let assembly = assembler.assemble(SiteOptions::new("site")).await.unwrap();

        assert_eq!(
            assembly.resolved_url,
            format!("https://{}", assembly.delivery.endpoint)
        );
    }

    // ===== Certificate / Configuration Tests =====

    #[tokio::test]
    async fn test_domains_without_certificate_fail_fast() {
        let zones = MockZones::new().with_zone("example.com", "Z1");
        let assembler = assembler(zones, vec![]);

        let opts = options_with_domains(vec![domain("www.example.com", "example.com")], None);

        let err = assembler.assemble(opts).await.unwrap_err();
        assert!(matches!(err, AssemblyError::Configuration));
    }

    #[tokio::test]
    async fn test_dangling_certificate_reference_fails_fast() {
        let zones = MockZones::new().with_zone("example.com", "Z1");
        let assembler = assembler(zones, vec![]);

        let opts = options_with_domains(
            vec![domain("www.example.com", "example.com")],
            Some("arn:missing"),
        );

        let err = assembler.assemble(opts).await.unwrap_err();
        assert!(matches!(err, AssemblyError::Configuration));
    }

    #[tokio::test]
    async fn test_certificate_enables_aliases() {
        let zones = MockZones::new().with_zone("example.com", "Z1");
        let assembler = assembler(zones, vec!["arn:cert"]);

        let opts = options_with_domains(
            vec![
                domain("www.example.com", "example.com"),
                domain("example.com", "example.com"),
            ],
            Some("arn:cert"),
        );

        let assembly = assembler.assemble(opts).await.unwrap();
        assert_eq!(
            assembly.delivery.aliases,
            vec!["www.example.com", "example.com"]
        );
        assert_eq!(assembly.delivery.certificate.as_ref().unwrap().arn, "arn:cert");
    }

    #[tokio::test]
    async fn test_no_domains_no_certificate_is_fine() {
        let assembler = assembler(MockZones::new(), vec![]);
        let assembly = assembler.assemble(SiteOptions::new("site")).await.unwrap();

        assert!(assembly.delivery.aliases.is_empty());
        assert!(assembly.delivery.certificate.is_none());
        assert!(assembly.bindings.is_empty());
    }

    // ===== DNS Binding Tests =====

    #[tokio::test]
    async fn test_one_binding_per_domain() {
        let zones = MockZones::new().with_zone("example.com", "Z1");
        let assembler = assembler(zones, vec!["arn:cert"]);

        let opts = options_with_domains(
            vec![
                domain("www.example.com", "example.com"),
                domain("example.com", "example.com"),
            ],
            Some("arn:cert"),
        );

        let assembly = assembler.assemble(opts).await.unwrap();

        assert_eq!(assembly.bindings.len(), 2);
        for binding in &assembly.bindings {
            assert_eq!(binding.target, assembly.delivery.endpoint);
            assert_eq!(binding.zone_id, "Z1");
        }
        assert_eq!(assembly.bindings[0].record_name, "www.example.com");
        assert_eq!(assembly.bindings[1].record_name, "example.com");
    }

    #[tokio::test]
    async fn test_binding_ids_do_not_collide_within_zone() {
        let zones = MockZones::new().with_zone("example.com", "Z1");
        let assembler = assembler(zones, vec!["arn:cert"]);

        let opts = options_with_domains(
            vec![
                domain("www.example.com", "example.com"),
                domain("example.com", "example.com"),
            ],
            Some("arn:cert"),
        );

        let assembly = assembler.assemble(opts).await.unwrap();
        assert_ne!(
            assembly.bindings[0].record_id,
            assembly.bindings[1].record_id
        );
    }

    #[tokio::test]
    async fn test_missing_zone_names_the_failing_domain() {
        let zones = MockZones::new().with_zone("example.com", "Z1");
        let assembler = assembler(zones, vec!["arn:cert"]);

        let opts = options_with_domains(
            vec![
                domain("www.example.com", "example.com"),
                domain("blog.example.org", "example.org"),
            ],
            Some("arn:cert"),
        );

        let err = assembler.assemble(opts).await.unwrap_err();
        match err {
            AssemblyError::ZoneNotFound { domain, zone } => {
                assert_eq!(domain, "blog.example.org");
                assert_eq!(zone, "example.org");
            }
            other => panic!("expected ZoneNotFound, got {:?}", other),
        }
    }

    // ===== Handler Wiring Tests =====

    #[tokio::test]
    async fn test_handler_source_embeds_apex() {
        let zones = MockZones::new().with_zone("example.com", "Z1");
        let assembler = assembler(zones, vec!["arn:cert"]);

        let opts = options_with_domains(
            vec![domain("www.example.com", "example.com")],
            Some("arn:cert"),
        );

        let assembly = assembler.assemble(opts).await.unwrap();
        assert!(assembly
            .delivery
            .handler_source
            .contains("var apex = 'www.example.com';"));
        assert_eq!(assembly.delivery.handler_stage, HandlerStage::ViewerRequest);
    }

    // ===== Publish Job Tests =====

    #[tokio::test]
    async fn test_publish_job_targets_origin_and_distribution() {
        let assembler = assembler(MockZones::new(), vec![]);
        let assembly = assembler.assemble(SiteOptions::new("my-site")).await.unwrap();

        let job = &assembly.publish_job;
        assert_eq!(job.bucket, assembly.delivery.origin.name);
        assert_eq!(job.distribution_id, assembly.delivery.id);
        assert_eq!(job.source_dir, PathBuf::from("my-site"));
    }
}
