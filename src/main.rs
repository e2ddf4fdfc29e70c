//! siteforge - Static Site Delivery Assembler
//!
//! This is the composition root that wires together all the components.

use siteforge::adapters::outbound::{
    CommandSiteBuilder, DashMapCertificateStore, DashMapZoneRegistry, FsObjectStore,
    RecordingInvalidator,
};
use siteforge::application::{PublishService, SiteAssembler, SiteOptions};
use siteforge::config::load_config;
use siteforge::domain::value_objects::{
    DomainName, DomainSet, HttpVersion, PriceClass, TlsVersion,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting siteforge source={} domains={}",
        cfg.source_dir,
        cfg.domains.len()
    );

    // ===== COMPOSITION ROOT =====
    // Wire up all adapters and services

    // 1. Create outbound adapters

    // Zone registry seeded from configuration
    let zones = Arc::new(DashMapZoneRegistry::new());
    for (name, id) in &cfg.zones {
        zones.insert(name, id);
    }

    // Certificate store; the configured reference is trusted to exist
    let certificates = Arc::new(DashMapCertificateStore::new());
    if let Some(arn) = &cfg.certificate_arn {
        certificates.insert(arn);
    }

    // Object store (filesystem)
    let store = Arc::new(FsObjectStore::new(&cfg.store_root));

    // Site builder (external generator process)
    let builder = Arc::new(CommandSiteBuilder::new(&cfg.builder_cmd, &cfg.output_dir));

    // Invalidator (recording; the filesystem store has no edge cache)
    let invalidator = Arc::new(RecordingInvalidator::new());

    // 2. Build assembly options from configuration

    let mut domains = Vec::with_capacity(cfg.domains.len());
    for (hostname, zone) in &cfg.domains {
        domains.push(DomainName::new(hostname, zone)?);
    }

    let mut opts = SiteOptions::new(&cfg.source_dir);
    opts.bucket = cfg.bucket.clone();
    opts.certificate_arn = cfg.certificate_arn.clone();
    opts.domains = DomainSet::new(domains);
    opts.price_class = cfg.price_class.as_deref().map(PriceClass::from_str);
    opts.minimum_tls = cfg.minimum_tls.as_deref().map(TlsVersion::from_str);
    opts.http_version = cfg.http_version.as_deref().map(HttpVersion::from_str);
    opts.max_age = Some(Duration::from_secs(cfg.max_age_secs));
    opts.prune = cfg.prune;

    // 3. Assemble the topology

    let assembler = SiteAssembler::new(zones, certificates, store.clone());
    let assembly = assembler.assemble(opts).await?;

    tracing::info!("site will be served at {}", assembly.resolved_url);

    // The declarative resource set is the tool's primary output.
    println!("{}", serde_json::to_string_pretty(&assembly)?);

    // 4. Publish content into the origin

    let publisher = PublishService::new(builder, store, invalidator);
    let report = publisher.publish(&assembly.publish_job).await?;

    tracing::info!(
        "published {} objects ({} pruned, {} paths invalidated)",
        report.uploaded,
        report.pruned,
        report.invalidated
    );

    Ok(())
}
