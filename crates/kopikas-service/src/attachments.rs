//! # Attachment Manager
//!
//! Maps uploaded receipt images to durable, retrievable references and
//! reclaims storage when a reference is superseded or orphaned.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Attachment Lifecycle                                 │
//! │                                                                         │
//! │  CREATE   store(bytes, name) ──► "/uploads/1755789000123-<uuid>.jpg"   │
//! │                                                                         │
//! │  REPLACE  store(new) first ──► record updated ──► remove(old)          │
//! │           (old-file removal is advisory; the record is already         │
//! │            consistent when it runs)                                    │
//! │                                                                         │
//! │  DELETE   record removed ──► remove(reference)                         │
//! │                                                                         │
//! │  remove() NEVER propagates errors:                                     │
//! │    missing file  → success (idempotent; a concurrent replace may       │
//! │                    have raced the delete)                              │
//! │    I/O error     → logged at warn, swallowed                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Naming
//! Generated names are `{millis}-{uuid}.{ext}`. Uniqueness is the
//! requirement, not unpredictability: concurrent uploads must never collide,
//! and the millisecond prefix keeps directory listings chronological.

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

// =============================================================================
// Errors
// =============================================================================

/// Attachment store failures.
///
/// Only `store` returns these; `remove` is advisory and logs instead.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// Underlying filesystem operation failed.
    #[error("attachment I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Storage Seam
// =============================================================================

/// Durable storage for uploaded attachment bytes.
///
/// ## Why a trait?
/// The payment lifecycle only needs "give me a reference" and "this
/// reference is garbage now". Tests swap in a recording store; production
/// uses [`LocalAttachmentStore`]; an object store could slot in later.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Persists `bytes` under a fresh collision-resistant name and returns
    /// the public reference to hand out (and later pass to [`remove`]).
    ///
    /// [`remove`]: AttachmentStore::remove
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, AttachmentError>;

    /// Best-effort deletion of a previously returned reference.
    ///
    /// Idempotent: a missing file is success. I/O failures are logged and
    /// swallowed - cleanup must never decide a request's outcome.
    async fn remove(&self, reference: &str);
}

// =============================================================================
// Local Filesystem Store
// =============================================================================

/// Attachment store backed by a local directory served at a public prefix.
///
/// ## Example
/// ```rust,ignore
/// let store = LocalAttachmentStore::new("./public/uploads", "/uploads").await?;
/// let reference = store.store(&bytes, "receipt.jpg").await?;
/// // reference == "/uploads/1755789000123-<uuid>.jpg"
/// ```
pub struct LocalAttachmentStore {
    /// Directory the files live in.
    base_dir: PathBuf,

    /// Public path prefix baked into returned references, no trailing slash.
    public_prefix: String,
}

impl LocalAttachmentStore {
    /// Creates the store, making sure the directory exists.
    pub async fn new(
        base_dir: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> Result<Self, AttachmentError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await?;

        Ok(LocalAttachmentStore {
            base_dir,
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    /// Generates a fresh file name, keeping the upload's extension.
    ///
    /// Extension-less or oddly named uploads fall back to `.bin`.
    fn generate_name(original_name: &str) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or("bin");

        format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            extension.to_ascii_lowercase()
        )
    }

    /// Translates a public reference back to the stored file name.
    ///
    /// Returns `None` for references this store never issued: wrong prefix,
    /// empty remainder, or anything resembling a path traversal.
    fn file_name_of(&self, reference: &str) -> Option<String> {
        let name = reference.strip_prefix(&self.public_prefix)?.strip_prefix('/')?;

        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }

        Some(name.to_string())
    }
}

#[async_trait]
impl AttachmentStore for LocalAttachmentStore {
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, AttachmentError> {
        let name = Self::generate_name(original_name);
        let path = self.base_dir.join(&name);

        fs::write(&path, bytes).await?;

        debug!(file = %name, size = bytes.len(), "Attachment stored");

        Ok(format!("{}/{}", self.public_prefix, name))
    }

    async fn remove(&self, reference: &str) {
        let Some(name) = self.file_name_of(reference) else {
            warn!(reference, "Refusing to remove unrecognized attachment reference");
            return;
        };

        match fs::remove_file(self.base_dir.join(&name)).await {
            Ok(()) => debug!(file = %name, "Attachment removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Already gone - a concurrent replace or repeated delete
                debug!(file = %name, "Attachment already absent");
            }
            Err(e) => {
                warn!(file = %name, error = %e, "Attachment cleanup failed, leaving file behind");
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (tempfile::TempDir, LocalAttachmentStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAttachmentStore::new(dir.path(), "/uploads")
            .await
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_reference() {
        let (dir, store) = test_store().await;

        let reference = store.store(b"jpeg bytes", "receipt.jpg").await.unwrap();

        assert!(reference.starts_with("/uploads/"));
        assert!(reference.ends_with(".jpg"));

        let name = reference.strip_prefix("/uploads/").unwrap();
        let written = std::fs::read(dir.path().join(name)).unwrap();
        assert_eq!(written, b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_store_generates_unique_names() {
        let (_dir, store) = test_store().await;

        let a = store.store(b"a", "receipt.jpg").await.unwrap();
        let b = store.store(b"b", "receipt.jpg").await.unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_store_falls_back_to_bin_extension() {
        let (_dir, store) = test_store().await;

        let no_ext = store.store(b"x", "receipt").await.unwrap();
        assert!(no_ext.ends_with(".bin"));

        let sneaky = store.store(b"x", "receipt.j/pg").await.unwrap();
        assert!(sneaky.ends_with(".bin"));
    }

    #[tokio::test]
    async fn test_remove_deletes_and_is_idempotent() {
        let (dir, store) = test_store().await;

        let reference = store.store(b"bytes", "receipt.png").await.unwrap();
        let name = reference.strip_prefix("/uploads/").unwrap().to_string();
        assert!(dir.path().join(&name).exists());

        store.remove(&reference).await;
        assert!(!dir.path().join(&name).exists());

        // Second remove of the same reference is silently fine
        store.remove(&reference).await;
    }

    #[tokio::test]
    async fn test_remove_rejects_foreign_references() {
        let (dir, store) = test_store().await;

        let reference = store.store(b"bytes", "receipt.png").await.unwrap();
        let name = reference.strip_prefix("/uploads/").unwrap().to_string();

        // Wrong prefix, traversal attempts: none may touch stored files
        store.remove("/elsewhere/file.png").await;
        store.remove("/uploads/../secrets.txt").await;
        store.remove("/uploads/nested/file.png").await;
        store.remove("/uploads/").await;

        assert!(dir.path().join(&name).exists());
    }
}
