//! # Error Types
//!
//! Domain-specific error types for kopikas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kopikas-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kopikas-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  kopikas-service errors (separate crate)                               │
//! │  ├── AttachmentError  - Attachment store failures                      │
//! │  └── ServiceError     - What the transport layer sees                  │
//! │                                                                         │
//! │  Flow: ValidationError → ServiceError → Transport → Client             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message
//!
//! Note the reporting engine has no error type at all: it never fails on a
//! well-formed record slice. An empty slice produces all-zero output.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a payment form doesn't meet requirements.
/// Used for early validation before any record is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    ///
    /// ## When This Occurs
    /// - `weight_kg` below zero
    /// - `total_price` below zero
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., unparsable date or number).
    ///
    /// ## When This Occurs
    /// - `date` does not parse as `YYYY-MM-DD` or names an impossible day
    /// - `weight_kg` / `total_price` are not numeric
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a Negative error for the given field.
    pub fn negative(field: impl Into<String>) -> Self {
        ValidationError::Negative {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error with a reason.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
