//! # Payment Lifecycle Service
//!
//! Validates and applies create/read/update/delete operations on payment
//! records, coordinating with the attachment store for file side effects
//! and enforcing ownership on every path.
//!
//! ## Update-with-Replacement Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              update(owner, id, form, Some(upload))                      │
//! │                                                                         │
//! │  1. Load existing record (ownership-checked, NotFound if foreign)      │
//! │  2. Validate the form                                                  │
//! │  3. store(new upload) ──► new reference      ← can fail, surfaces      │
//! │  4. UPDATE record with new reference         ← can fail, surfaces      │
//! │       │                                        (new file cleaned up)   │
//! │       ▼ success                                                        │
//! │  5. remove(old reference)                    ← advisory, logged only   │
//! │                                                                         │
//! │  The record is already consistent when step 5 runs, so a failed        │
//! │  cleanup leaves an orphan file, never a broken record.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! No locking across edits of the same id: the record store's native update
//! semantics apply and a lost update is last-write-wins, by design.
//! Attachment names are always freshly generated, so concurrent uploads
//! cannot collide; removes are idempotent for the same reason.

use std::sync::Arc;
use tracing::info;

use crate::attachments::AttachmentStore;
use crate::error::{ServiceError, ServiceResult};
use kopikas_core::validation::validate_payment_form;
use kopikas_core::{Payment, PaymentForm};
use kopikas_db::{Database, PaymentRepository};

// =============================================================================
// Upload Input
// =============================================================================

/// An uploaded attachment as handed over by the transport layer.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    /// Raw file bytes.
    pub bytes: Vec<u8>,

    /// Client-supplied file name; only its extension is kept.
    pub original_name: String,
}

// =============================================================================
// Payment Service
// =============================================================================

/// The payment lifecycle service.
///
/// Every operation takes the resolved `owner_id` as its first argument;
/// identity resolution happens in the transport layer before this service
/// is ever reached.
pub struct PaymentService {
    repo: PaymentRepository,
    attachments: Arc<dyn AttachmentStore>,
}

impl PaymentService {
    /// Creates the service on top of an open database handle.
    pub fn new(db: &Database, attachments: Arc<dyn AttachmentStore>) -> Self {
        PaymentService {
            repo: db.payments(),
            attachments,
        }
    }

    /// Gets a single payment by id.
    ///
    /// ## Errors
    /// `NotFound` when the id is absent *or* owned by someone else - the
    /// two cases are deliberately indistinguishable.
    pub async fn get(&self, owner_id: i64, id: i64) -> ServiceResult<Payment> {
        self.repo
            .find_one(owner_id, id)
            .await?
            .ok_or(ServiceError::NotFound { id })
    }

    /// Lists all of the caller's payments, newest transaction date first.
    pub async fn list(&self, owner_id: i64) -> ServiceResult<Vec<Payment>> {
        Ok(self.repo.find_all(owner_id).await?)
    }

    /// Creates a payment, optionally with an attached receipt image.
    ///
    /// ## What This Does
    /// 1. Validates the form (date, label, non-negative weight and price)
    /// 2. Stores the upload, if any (failure surfaces; nothing persisted yet)
    /// 3. Persists the record with the returned reference
    pub async fn create(
        &self,
        owner_id: i64,
        form: &PaymentForm,
        upload: Option<AttachmentUpload>,
    ) -> ServiceResult<Payment> {
        let fields = validate_payment_form(form)?;

        let image = match upload {
            Some(upload) => Some(
                self.attachments
                    .store(&upload.bytes, &upload.original_name)
                    .await?,
            ),
            None => None,
        };

        let created = match self.repo.insert(owner_id, &fields, image.as_deref()).await {
            Ok(payment) => payment,
            Err(e) => {
                // The record never existed, so the file is a pure orphan
                if let Some(reference) = &image {
                    self.attachments.remove(reference).await;
                }
                return Err(e.into());
            }
        };

        info!(
            owner_id,
            id = created.id,
            date = %created.date,
            has_image = created.image.is_some(),
            "Payment created"
        );

        Ok(created)
    }

    /// Updates a payment's fields, optionally replacing its attachment.
    ///
    /// The previous attachment (if replaced) is removed best-effort only
    /// after the record update succeeds; a failed cleanup is logged inside
    /// the store and never surfaces here.
    pub async fn update(
        &self,
        owner_id: i64,
        id: i64,
        form: &PaymentForm,
        upload: Option<AttachmentUpload>,
    ) -> ServiceResult<Payment> {
        let existing = self.get(owner_id, id).await?;
        let fields = validate_payment_form(form)?;

        let new_image = match upload {
            Some(upload) => Some(
                self.attachments
                    .store(&upload.bytes, &upload.original_name)
                    .await?,
            ),
            None => None,
        };

        if let Err(e) = self
            .repo
            .update(owner_id, id, &fields, new_image.as_deref())
            .await
        {
            // Record untouched; don't leak the freshly stored file
            if let Some(reference) = &new_image {
                self.attachments.remove(reference).await;
            }
            return Err(e.into());
        }

        // Record is consistent now; reclaiming the replaced file is advisory
        if new_image.is_some() {
            if let Some(old_reference) = &existing.image {
                self.attachments.remove(old_reference).await;
            }
        }

        info!(
            owner_id,
            id,
            replaced_image = new_image.is_some(),
            "Payment updated"
        );

        self.get(owner_id, id).await
    }

    /// Deletes a payment and reclaims its attachment.
    ///
    /// Deletion is final - no soft delete. Attachment cleanup runs after
    /// the record is gone and can never block or fail the deletion.
    pub async fn delete(&self, owner_id: i64, id: i64) -> ServiceResult<()> {
        let existing = self.get(owner_id, id).await?;

        self.repo.delete(owner_id, id).await?;

        if let Some(reference) = &existing.image {
            self.attachments.remove(reference).await;
        }

        info!(owner_id, id, "Payment deleted");

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachments::AttachmentError;
    use async_trait::async_trait;
    use kopikas_core::Rupiah;
    use kopikas_db::DbConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory store that records every call, for asserting side effects.
    #[derive(Default)]
    struct RecordingStore {
        stored: AtomicUsize,
        removed: Mutex<Vec<String>>,
        fail_store: bool,
    }

    impl RecordingStore {
        fn failing() -> Self {
            RecordingStore {
                fail_store: true,
                ..Default::default()
            }
        }

        fn removed(&self) -> Vec<String> {
            self.removed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AttachmentStore for RecordingStore {
        async fn store(&self, _bytes: &[u8], _name: &str) -> Result<String, AttachmentError> {
            if self.fail_store {
                return Err(AttachmentError::Io(std::io::Error::other("disk full")));
            }
            let n = self.stored.fetch_add(1, Ordering::SeqCst);
            Ok(format!("/uploads/mock-{n}.jpg"))
        }

        async fn remove(&self, reference: &str) {
            self.removed.lock().unwrap().push(reference.to_string());
        }
    }

    async fn service_with(store: Arc<RecordingStore>) -> (Database, PaymentService) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let service = PaymentService::new(&db, store);
        (db, service)
    }

    fn form(date: &str, coffee_type: &str, weight_kg: &str, price: &str) -> PaymentForm {
        PaymentForm {
            date: date.to_string(),
            coffee_type: coffee_type.to_string(),
            weight_kg: weight_kg.to_string(),
            total_price: price.to_string(),
        }
    }

    fn upload() -> Option<AttachmentUpload> {
        Some(AttachmentUpload {
            bytes: b"jpeg".to_vec(),
            original_name: "receipt.jpg".to_string(),
        })
    }

    #[tokio::test]
    async fn test_create_without_attachment() {
        let store = Arc::new(RecordingStore::default());
        let (_db, service) = service_with(store.clone()).await;

        let created = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "1.5", "199000"), None)
            .await
            .unwrap();

        assert_eq!(created.owner_id, 7);
        assert_eq!(created.total_price, Rupiah::new(199_000));
        assert_eq!(created.image, None);
        assert_eq!(store.stored.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_with_attachment_stores_reference() {
        let store = Arc::new(RecordingStore::default());
        let (_db, service) = service_with(store.clone()).await;

        let created = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "1.5", "199000"), upload())
            .await
            .unwrap();

        assert_eq!(created.image.as_deref(), Some("/uploads/mock-0.jpg"));
        assert_eq!(store.stored.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_negative_weight_persists_nothing() {
        let store = Arc::new(RecordingStore::default());
        let (db, service) = service_with(store.clone()).await;

        let err = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "-1", "199000"), upload())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        // Validation runs before any side effect: no file, no record
        assert_eq!(store.stored.load(Ordering::SeqCst), 0);
        assert_eq!(db.payments().count(7).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_surfaces_upload_store_failure() {
        let store = Arc::new(RecordingStore::failing());
        let (db, service) = service_with(store.clone()).await;

        let err = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "1", "100000"), upload())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Attachment(_)));
        assert_eq!(db.payments().count(7).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_and_list_are_owner_scoped() {
        let store = Arc::new(RecordingStore::default());
        let (_db, service) = service_with(store).await;

        let created = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "1", "100000"), None)
            .await
            .unwrap();
        service
            .create(8, &form("2026-04-01", "Kopi Bijian", "2", "200000"), None)
            .await
            .unwrap();

        assert_eq!(service.get(7, created.id).await.unwrap(), created);
        assert!(service.get(8, created.id).await.unwrap_err().is_not_found());

        let mine = service.list(7).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, created.id);
    }

    #[tokio::test]
    async fn test_list_orders_by_date_descending() {
        let store = Arc::new(RecordingStore::default());
        let (_db, service) = service_with(store).await;

        service
            .create(7, &form("2026-01-05", "Kopi Bubuk", "1", "100000"), None)
            .await
            .unwrap();
        service
            .create(7, &form("2026-03-20", "Kopi Bijian", "1", "100000"), None)
            .await
            .unwrap();
        service
            .create(7, &form("2026-02-11", "Kopi Bubuk", "1", "100000"), None)
            .await
            .unwrap();

        let dates: Vec<String> = service
            .list(7)
            .await
            .unwrap()
            .iter()
            .map(|p| p.date.to_string())
            .collect();
        assert_eq!(dates, ["2026-03-20", "2026-02-11", "2026-01-05"]);
    }

    #[tokio::test]
    async fn test_update_replacing_attachment_removes_old_exactly_once() {
        let store = Arc::new(RecordingStore::default());
        let (_db, service) = service_with(store.clone()).await;

        let created = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "1", "100000"), upload())
            .await
            .unwrap();
        let old_reference = created.image.clone().unwrap();

        let updated = service
            .update(
                7,
                created.id,
                &form("2026-03-15", "Kopi Bijian", "2", "250000"),
                upload(),
            )
            .await
            .unwrap();

        // Exactly one reference reachable from the record afterwards
        assert_eq!(updated.image.as_deref(), Some("/uploads/mock-1.jpg"));
        assert_eq!(updated.coffee_type, "Kopi Bijian");

        // The prior file's removal was attempted exactly once
        assert_eq!(store.removed(), vec![old_reference]);
    }

    #[tokio::test]
    async fn test_update_without_upload_keeps_attachment() {
        let store = Arc::new(RecordingStore::default());
        let (_db, service) = service_with(store.clone()).await;

        let created = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "1", "100000"), upload())
            .await
            .unwrap();

        let updated = service
            .update(
                7,
                created.id,
                &form("2026-03-15", "Kopi Bubuk", "1.5", "150000"),
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.image, created.image);
        assert!(store.removed().is_empty());
    }

    #[tokio::test]
    async fn test_update_foreign_id_is_not_found_with_no_side_effects() {
        let store = Arc::new(RecordingStore::default());
        let (_db, service) = service_with(store.clone()).await;

        let created = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "1", "100000"), None)
            .await
            .unwrap();

        let err = service
            .update(
                8,
                created.id,
                &form("2026-03-15", "Kopi Bijian", "2", "250000"),
                upload(),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        // Ownership check precedes the upload: nothing stored, nothing removed
        assert_eq!(store.stored.load(Ordering::SeqCst), 0);
        assert!(store.removed().is_empty());

        let unchanged = service.get(7, created.id).await.unwrap();
        assert_eq!(unchanged, created);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_attachment() {
        let store = Arc::new(RecordingStore::default());
        let (db, service) = service_with(store.clone()).await;

        let created = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "1", "100000"), upload())
            .await
            .unwrap();
        let reference = created.image.clone().unwrap();

        service.delete(7, created.id).await.unwrap();

        assert_eq!(db.payments().count(7).await.unwrap(), 0);
        assert_eq!(store.removed(), vec![reference]);
    }

    #[tokio::test]
    async fn test_delete_missing_or_foreign_touches_nothing() {
        let store = Arc::new(RecordingStore::default());
        let (db, service) = service_with(store.clone()).await;

        let created = service
            .create(7, &form("2026-03-14", "Kopi Bubuk", "1", "100000"), upload())
            .await
            .unwrap();

        assert!(service.delete(7, 9999).await.unwrap_err().is_not_found());
        assert!(service.delete(8, created.id).await.unwrap_err().is_not_found());

        // No store-level delete and no attachment removal happened
        assert_eq!(db.payments().count(7).await.unwrap(), 1);
        assert!(store.removed().is_empty());
    }
}
