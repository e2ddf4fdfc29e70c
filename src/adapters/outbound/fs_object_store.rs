//! Filesystem Object Store
//!
//! Implements BucketProvisioner and ObjectUploader against a local
//! directory tree. Each bucket is a directory under the store root;
//! object metadata lives in a `.meta` sidecar tree so a plain file
//! server can still serve the content directly.

use crate::domain::entities::OriginBucket;
use crate::domain::ports::{BucketProvisioner, ObjectUploader, ProvisionError, StoreError};
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sidecar metadata written next to every object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub cache_control: String,
    pub content_type: String,
}

/// Directory-backed object store.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root.join(bucket)
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.bucket_dir(bucket).join(key)
    }

    fn meta_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.bucket_dir(bucket)
            .join(".meta")
            .join(format!("{}.json", key))
    }

    /// Read back one object's sidecar metadata, for assertions and
    /// inspection tooling.
    pub async fn read_meta(&self, bucket: &str, key: &str) -> Result<ObjectMeta, StoreError> {
        let raw = tokio::fs::read(self.meta_path(bucket, key))
            .await
            .map_err(|e| StoreError(format!("read meta {}: {}", key, e)))?;
        serde_json::from_slice(&raw).map_err(|e| StoreError(format!("decode meta {}: {}", key, e)))
    }
}

fn walk_keys(root: &Path, dir: &Path, out: &mut Vec<String>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // The sidecar tree is bookkeeping, not content.
        if entry.file_name() == ".meta" {
            continue;
        }
        if entry.file_type()?.is_dir() {
            walk_keys(root, &path, out)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            let key = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push(key);
        }
    }
    Ok(())
}

#[async_trait]
impl BucketProvisioner for FsObjectStore {
    async fn provision(&self, name: &str) -> Result<OriginBucket, ProvisionError> {
        let dir = self.bucket_dir(name);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ProvisionError(format!("{}: {}", dir.display(), e)))?;
        Ok(OriginBucket {
            name: name.to_string(),
            access_identity: format!("origin-access-{}", name),
        })
    }
}

#[async_trait]
impl ObjectUploader for FsObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        cache_control: &str,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let path = self.object_path(bucket, key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError(format!("mkdir {}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| StoreError(format!("write {}: {}", key, e)))?;

        let meta_path = self.meta_path(bucket, key);
        if let Some(parent) = meta_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError(format!("mkdir {}: {}", parent.display(), e)))?;
        }
        let meta = ObjectMeta {
            cache_control: cache_control.to_string(),
            content_type: content_type.to_string(),
        };
        let encoded = serde_json::to_vec(&meta)
            .map_err(|e| StoreError(format!("encode meta {}: {}", key, e)))?;
        tokio::fs::write(&meta_path, encoded)
            .await
            .map_err(|e| StoreError(format!("write meta {}: {}", key, e)))?;
        Ok(())
    }

    async fn list(&self, bucket: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.bucket_dir(bucket);
        let mut keys = Vec::new();
        walk_keys(&dir, &dir, &mut keys)
            .map_err(|e| StoreError(format!("list {}: {}", bucket, e)))?;
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        tokio::fs::remove_file(self.object_path(bucket, key))
            .await
            .map_err(|e| StoreError(format!("delete {}: {}", key, e)))?;
        // Sidecar may legitimately be missing for objects written by
        // other tools.
        let _ = tokio::fs::remove_file(self.meta_path(bucket, key)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Provisioning Tests =====

    #[tokio::test]
    async fn test_provision_creates_bucket_directory() {
        let root = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(root.path());

        let bucket = store.provision("site-content").await.unwrap();

        assert!(root.path().join("site-content").is_dir());
        assert_eq!(bucket.access_identity, "origin-access-site-content");
    }

    // ===== Upload Tests =====

    #[tokio::test]
    async fn test_put_writes_body_and_sidecar_meta() {
        let root = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(root.path());
        store.provision("b").await.unwrap();

        store
            .put(
                "b",
                "blog/index.html",
                Bytes::from("<html></html>"),
                "max-age=3600",
                "text/html",
            )
            .await
            .unwrap();

        let body = std::fs::read(root.path().join("b/blog/index.html")).unwrap();
        assert_eq!(body, b"<html></html>");

        let meta = store.read_meta("b", "blog/index.html").await.unwrap();
        assert_eq!(meta.cache_control, "max-age=3600");
        assert_eq!(meta.content_type, "text/html");
    }

    // ===== List Tests =====

    #[tokio::test]
    async fn test_list_skips_sidecar_tree() {
        let root = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(root.path());
        store.provision("b").await.unwrap();

        store
            .put("b", "index.html", Bytes::from("x"), "max-age=1", "text/html")
            .await
            .unwrap();
        store
            .put("b", "css/site.css", Bytes::from("y"), "max-age=1", "text/css")
            .await
            .unwrap();

        let keys = store.list("b").await.unwrap();
        assert_eq!(keys, vec!["css/site.css", "index.html"]);
    }

    // ===== Delete Tests =====

    #[tokio::test]
    async fn test_delete_removes_body_and_meta() {
        let root = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(root.path());
        store.provision("b").await.unwrap();

        store
            .put("b", "index.html", Bytes::from("x"), "max-age=1", "text/html")
            .await
            .unwrap();
        store.delete("b", "index.html").await.unwrap();

        assert!(!root.path().join("b/index.html").exists());
        assert!(store.list("b").await.unwrap().is_empty());
    }
}
