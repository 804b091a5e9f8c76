//! # Service Error Type
//!
//! Unified error taxonomy presented to the transport layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kopikas                                │
//! │                                                                         │
//! │  ValidationError ──────────────► ServiceError::Validation   (400)      │
//! │                                                                         │
//! │  DbError::NotFound ────────────► ServiceError::NotFound     (404)      │
//! │  (missing id and foreign owner are identical on purpose:               │
//! │   a caller must not learn that someone else's record exists)           │
//! │                                                                         │
//! │  other DbError ────────────────► ServiceError::Storage      (500)      │
//! │                                                                         │
//! │  AttachmentError (on upload) ──► ServiceError::Attachment   (500)      │
//! │                                                                         │
//! │  Attachment CLEANUP failures never reach this enum at all:             │
//! │  the store logs and swallows them, the record operation's outcome      │
//! │  is decided solely by the record store.                                │
//! │                                                                         │
//! │  Unauthorized is minted by the transport layer when no identity        │
//! │  resolves; it lives here so every outward status has one variant.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::attachments::AttachmentError;
use kopikas_core::ValidationError;
use kopikas_db::DbError;

/// Errors surfaced by the payment lifecycle and report services.
///
/// Every variant maps to one distinct, stable outward status.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed boundary validation (bad date, negative amounts, ...).
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No record with this id is visible to the caller.
    ///
    /// Covers both "id doesn't exist" and "id belongs to someone else".
    #[error("Payment not found: {id}")]
    NotFound { id: i64 },

    /// No caller identity resolved.
    ///
    /// Produced by the transport layer before any service call is made;
    /// the services themselves only ever see a resolved owner id.
    #[error("Unauthorized")]
    Unauthorized,

    /// Storing a newly uploaded attachment failed.
    ///
    /// Only the *upload* path surfaces attachment errors. Cleanup of
    /// replaced or orphaned files is advisory and never fails a request.
    #[error("Attachment storage failed: {0}")]
    Attachment(#[from] AttachmentError),

    /// The record store failed for a reason other than a missing row.
    #[error("Storage failure: {0}")]
    Storage(DbError),
}

/// Folds database errors into the service taxonomy.
///
/// `DbError::NotFound` becomes the service's own NotFound (carrying the id);
/// everything else is an opaque storage failure with no retry at this layer.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { id, .. } => ServiceError::NotFound { id },
            other => ServiceError::Storage(other),
        }
    }
}

impl ServiceError {
    /// True when this error means "no record visible to this caller".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_folds_into_service_not_found() {
        let err: ServiceError = DbError::not_found("Payment", 42).into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Payment not found: 42");
    }

    #[test]
    fn test_other_db_errors_become_storage() {
        let err: ServiceError = DbError::PoolExhausted.into();
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[test]
    fn test_validation_error_message_passthrough() {
        let err: ServiceError = ValidationError::negative("weight_kg").into();
        assert_eq!(
            err.to_string(),
            "Validation failed: weight_kg must not be negative"
        );
    }
}
