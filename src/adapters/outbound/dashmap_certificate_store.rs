//! DashMap Certificate Store
//!
//! Implements CertificateLookup against an in-memory set of known
//! certificate references.

use crate::domain::entities::Certificate;
use crate::domain::ports::CertificateLookup;
use async_trait::async_trait;
use dashmap::DashMap;

/// In-memory certificate store keyed by reference.
#[derive(Default)]
pub struct DashMapCertificateStore {
    certificates: DashMap<String, Certificate>,
}

impl DashMapCertificateStore {
    pub fn new() -> Self {
        Self {
            certificates: DashMap::new(),
        }
    }

    /// Register a certificate reference as resolvable.
    pub fn insert(&self, arn: &str) {
        self.certificates.insert(
            arn.to_string(),
            Certificate {
                arn: arn.to_string(),
            },
        );
    }

    /// Builder-style registration for test setup.
    pub fn with_certificate(self, arn: &str) -> Self {
        self.insert(arn);
        self
    }
}

#[async_trait]
impl CertificateLookup for DashMapCertificateStore {
    async fn find(&self, arn: &str) -> Option<Certificate> {
        self.certificates.get(arn).map(|e| e.value().clone())
    }
}
