use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Site source and build
    pub source_dir: String,
    pub builder_cmd: String,
    pub output_dir: String,

    // Origin storage
    pub bucket: Option<String>,
    pub store_root: String,

    // Domains and TLS
    pub domains: Vec<(String, String)>,
    pub certificate_arn: Option<String>,
    pub zones: Vec<(String, String)>,

    // Delivery tuning
    pub price_class: Option<String>,
    pub minimum_tls: Option<String>,
    pub http_version: Option<String>,
    pub max_age_secs: u64,

    // Publishing
    pub prune: bool,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: "site".to_string(),
            builder_cmd: "hugo".to_string(),
            output_dir: "dist".to_string(),
            bucket: None,
            store_root: "site-store".to_string(),
            domains: Vec::new(),
            certificate_arn: None,
            zones: Vec::new(),
            price_class: None,
            minimum_tls: None,
            http_version: None,
            max_age_secs: 3600,
            prune: false,
            debug: false,
        }
    }
}

/// Parse a comma-separated list of `left:right` pairs.
///
/// An entry without a colon uses the same value on both sides, so the
/// common apex case `example.com` reads as hostname and zone at once.
fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((left, right)) => (left.trim().to_string(), right.trim().to_string()),
            None => (entry.to_string(), entry.to_string()),
        })
        .collect()
}

pub fn load_config() -> anyhow::Result<Config> {
    let source_dir = match std::env::var("SITEFORGE_SOURCE_DIR") {
        Ok(dir) => dir,
        Err(_) => anyhow::bail!("SITEFORGE_SOURCE_DIR is required"),
    };

    let builder_cmd =
        std::env::var("SITEFORGE_BUILDER").unwrap_or_else(|_| "hugo".to_string());

    let output_dir =
        std::env::var("SITEFORGE_OUTPUT_DIR").unwrap_or_else(|_| "dist".to_string());

    let bucket = std::env::var("SITEFORGE_BUCKET").ok();

    let store_root =
        std::env::var("SITEFORGE_STORE_ROOT").unwrap_or_else(|_| "site-store".to_string());

    let domains = std::env::var("SITEFORGE_DOMAINS")
        .map(|v| parse_pairs(&v))
        .unwrap_or_default();

    let certificate_arn = std::env::var("SITEFORGE_CERT_ARN").ok();

    let zones = std::env::var("SITEFORGE_ZONES")
        .map(|v| parse_pairs(&v))
        .unwrap_or_default();

    let price_class = std::env::var("SITEFORGE_PRICE_CLASS").ok();
    let minimum_tls = std::env::var("SITEFORGE_MIN_TLS").ok();
    let http_version = std::env::var("SITEFORGE_HTTP_VERSION").ok();

    let max_age_secs = std::env::var("SITEFORGE_MAX_AGE_SECS")
        .unwrap_or_else(|_| "3600".to_string())
        .parse()
        .unwrap_or(3600);

    let prune = std::env::var("SITEFORGE_PRUNE")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        source_dir,
        builder_cmd,
        output_dir,
        bucket,
        store_root,
        domains,
        certificate_arn,
        zones,
        price_class,
        minimum_tls,
        http_version,
        max_age_secs,
        prune,
        debug,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== parse_pairs Tests =====

    #[test]
    fn test_parse_pairs_with_colon() {
        let pairs = parse_pairs("www.example.com:example.com,blog.example.org:example.org");
        assert_eq!(
            pairs,
            vec![
                ("www.example.com".to_string(), "example.com".to_string()),
                ("blog.example.org".to_string(), "example.org".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_pairs_bare_entry_duplicates_value() {
        let pairs = parse_pairs("example.com");
        assert_eq!(
            pairs,
            vec![("example.com".to_string(), "example.com".to_string())]
        );
    }

    #[test]
    fn test_parse_pairs_skips_empty_entries() {
        let pairs = parse_pairs(" , a:b ,, ");
        assert_eq!(pairs, vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.builder_cmd, "hugo");
        assert_eq!(cfg.max_age_secs, 3600);
        assert!(!cfg.prune);
    }
}
