//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// Characters permitted in a hostname.
///
/// Deliberately stricter than RFC 1035: the hostname is later embedded
/// into the edge handler's source text, so anything outside this set is
/// rejected at construction time.
fn is_hostname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

/// Error raised when a hostname fails the construction-time character gate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainNameError {
    #[error("hostname must not be empty")]
    Empty,
    #[error("hostname '{0}' contains characters outside [A-Za-z0-9.-]")]
    InvalidCharacter(String),
}

/// One servable hostname plus the DNS zone it belongs to.
///
/// Identity is the `(hostname, zone_name)` pair. Immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainName {
    hostname: String,
    zone_name: String,
}

impl DomainName {
    /// Construct a domain descriptor, validating the hostname charset.
    pub fn new(hostname: &str, zone_name: &str) -> Result<Self, DomainNameError> {
        if hostname.is_empty() {
            return Err(DomainNameError::Empty);
        }
        if !hostname.chars().all(is_hostname_char) {
            return Err(DomainNameError::InvalidCharacter(hostname.to_string()));
        }
        Ok(Self {
            hostname: hostname.to_string(),
            zone_name: zone_name.to_string(),
        })
    }

    /// The canonical textual hostname.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Name of the DNS zone this hostname is created in.
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    /// Derive a resource-name-safe identifier token.
    ///
    /// The token is lowercase and uses only `[a-z0-9-]`. Hyphens in the
    /// hostname are doubled so a dot can map to a single hyphen without
    /// two distinct hostnames colliding on the same token.
    pub fn id_token(&self) -> String {
        let mut token = String::with_capacity(self.hostname.len());
        for c in self.hostname.chars() {
            match c {
                '-' => token.push_str("--"),
                '.' => token.push('-'),
                _ => token.push(c.to_ascii_lowercase()),
            }
        }
        token
    }
}

impl std::fmt::Display for DomainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hostname)
    }
}

/// Ordered set of servable hostnames.
///
/// Order matters: index 0 is the apex domain, the canonical redirect
/// target for every other hostname in the set. May be empty, in which
/// case the delivery endpoint's generated hostname is served directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSet(Vec<DomainName>);

impl DomainSet {
    pub fn new(domains: Vec<DomainName>) -> Self {
        Self(domains)
    }

    /// The apex domain, if any hostname is configured.
    pub fn apex(&self) -> Option<&DomainName> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DomainName> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<DomainName>> for DomainSet {
    fn from(domains: Vec<DomainName>) -> Self {
        Self(domains)
    }
}

/// Edge coverage tier for the delivery topology.
///
/// Controls how many geographic edge locations serve the distribution,
/// trading cost against latency coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceClass {
    /// Lowest-cost tier: North America and Europe only.
    Class100,
    /// Adds most of Asia and South America.
    Class200,
    /// Every edge location.
    ClassAll,
}

impl PriceClass {
    /// Parse a price class from a string, falling back to the
    /// lowest-cost tier for unknown values.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "100" | "priceclass_100" => Self::Class100,
            "200" | "priceclass_200" => Self::Class200,
            "all" | "priceclass_all" => Self::ClassAll,
            _ => Self::Class100, // fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class100 => "PriceClass_100",
            Self::Class200 => "PriceClass_200",
            Self::ClassAll => "PriceClass_All",
        }
    }
}

impl Default for PriceClass {
    fn default() -> Self {
        Self::Class100
    }
}

impl std::fmt::Display for PriceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimum TLS protocol version and cipher policy accepted by viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TlsVersion {
    /// TLS 1.2 minimum with the 2021 cipher policy. Modern baseline.
    Tls12_2021,
    /// TLS 1.2 minimum with the 2019 cipher policy.
    Tls12_2019,
    /// TLS 1.1 minimum. Legacy viewers only.
    Tls11_2016,
}

impl TlsVersion {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "tlsv1.2_2021" | "1.2_2021" => Self::Tls12_2021,
            "tlsv1.2_2019" | "1.2_2019" => Self::Tls12_2019,
            "tlsv1.1_2016" | "1.1_2016" => Self::Tls11_2016,
            _ => Self::Tls12_2021, // fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tls12_2021 => "TLSv1.2_2021",
            Self::Tls12_2019 => "TLSv1.2_2019",
            Self::Tls11_2016 => "TLSv1.1_2016",
        }
    }
}

impl Default for TlsVersion {
    fn default() -> Self {
        Self::Tls12_2021
    }
}

/// Highest HTTP version the delivery endpoint negotiates with viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpVersion {
    Http1_1,
    Http2,
    Http2And3,
}

impl HttpVersion {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "http1.1" | "1.1" => Self::Http1_1,
            "http2" | "2" => Self::Http2,
            "http2and3" | "2and3" => Self::Http2And3,
            _ => Self::Http1_1, // fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http1_1 => "http1.1",
            Self::Http2 => "http2",
            Self::Http2And3 => "http2and3",
        }
    }
}

impl Default for HttpVersion {
    fn default() -> Self {
        Self::Http1_1
    }
}
