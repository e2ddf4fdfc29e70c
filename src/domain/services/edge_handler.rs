//! Edge Request Handler Service
//!
//! Pure domain logic for the per-request transformation executed at the
//! delivery edge. This service has NO external dependencies - it's pure Rust.

use crate::domain::entities::{EdgeOutcome, EdgeRequest, EdgeResponse};
use crate::domain::value_objects::DomainSet;

/// Per-request transformation run before cache lookup, for every viewer
/// request.
///
/// The handler decides, in order:
/// 1. Redirect to the apex domain when the request arrived on any other
///    hostname. The redirect preserves the original path and query.
/// 2. Resolve directory-style URIs by appending `index.html` to any URI
///    ending in `/`.
/// 3. Forward the request toward the origin.
///
/// Output depends only on `(host_header, uri, apex)`. No external state,
/// no randomness, no clock.
#[derive(Debug, Clone)]
pub struct EdgeHandler {
    apex: Option<String>,
}

impl EdgeHandler {
    /// Create a handler with an explicit apex domain.
    ///
    /// An empty apex is normalized to none, so redirection never fires.
    pub fn new(apex: Option<String>) -> Self {
        Self {
            apex: apex.filter(|a| !a.is_empty()),
        }
    }

    /// Create a handler for a domain set; the apex is the first entry.
    pub fn for_domains(domains: &DomainSet) -> Self {
        Self::new(domains.apex().map(|d| d.hostname().to_string()))
    }

    /// The apex this handler redirects to, if one is configured.
    pub fn apex(&self) -> Option<&str> {
        self.apex.as_deref()
    }

    /// Transform one viewer request.
    ///
    /// # Returns
    /// A redirect response, or the request to forward to the origin.
    pub fn handle(&self, request: EdgeRequest) -> EdgeOutcome {
        if let Some(apex) = &self.apex {
            if request.host_header != *apex {
                // The original URI is preserved verbatim: the trailing-slash
                // rewrite must not run before a redirect, otherwise the
                // viewer would land on /dir/index.html instead of /dir/.
                return EdgeOutcome::Redirect(EdgeResponse {
                    status: 301,
                    location: format!("https://{}{}", apex, request.uri),
                });
            }
        }

        let mut request = request;
        if request.uri.ends_with('/') {
            request.uri.push_str("index.html");
        }

        EdgeOutcome::Forward(request)
    }
}
