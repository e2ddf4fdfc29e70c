//! DashMap Object Store
//!
//! Implements BucketProvisioner and ObjectUploader in memory. Used for
//! tests and dry runs where no real storage backend is wanted.

use crate::domain::entities::OriginBucket;
use crate::domain::ports::{BucketProvisioner, ObjectUploader, ProvisionError, StoreError};
use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

/// One stored object with its tagged metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub body: Bytes,
    pub cache_control: String,
    pub content_type: String,
}

/// In-memory object store.
///
/// Objects are keyed `bucket/key`. Uploading into a bucket that was
/// never provisioned is an error, which keeps the assembly-then-publish
/// ordering honest in tests.
#[derive(Default)]
pub struct DashMapObjectStore {
    buckets: DashMap<String, OriginBucket>,
    objects: DashMap<String, StoredObject>,
}

impl DashMapObjectStore {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
            objects: DashMap::new(),
        }
    }

    /// Fetch one object, for assertions.
    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .get(&format!("{}/{}", bucket, key))
            .map(|e| e.value().clone())
    }

    /// Total number of stored objects across buckets.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

#[async_trait]
impl BucketProvisioner for DashMapObjectStore {
    async fn provision(&self, name: &str) -> Result<OriginBucket, ProvisionError> {
        let bucket = self
            .buckets
            .entry(name.to_string())
            .or_insert_with(|| OriginBucket {
                name: name.to_string(),
                access_identity: format!("origin-access-{}", name),
            })
            .value()
            .clone();
        Ok(bucket)
    }
}

#[async_trait]
impl ObjectUploader for DashMapObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        cache_control: &str,
        content_type: &str,
    ) -> Result<(), StoreError> {
        if !self.buckets.contains_key(bucket) {
            return Err(StoreError(format!("bucket '{}' not provisioned", bucket)));
        }
        self.objects.insert(
            format!("{}/{}", bucket, key),
            StoredObject {
                body,
                cache_control: cache_control.to_string(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn list(&self, bucket: &str) -> Result<Vec<String>, StoreError> {
        if !self.buckets.contains_key(bucket) {
            return Err(StoreError(format!("bucket '{}' not provisioned", bucket)));
        }
        let prefix = format!("{}/", bucket);
        let mut keys: Vec<String> = self
            .objects
            .iter()
            .filter_map(|e| e.key().strip_prefix(&prefix).map(String::from))
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        self.objects.remove(&format!("{}/{}", bucket, key));
        Ok(())
    }
}
