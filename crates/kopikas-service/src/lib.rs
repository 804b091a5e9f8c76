//! # Kopikas Service Layer
//!
//! Orchestrates the payment lifecycle and reporting on top of the pure
//! domain crate and the SQLite persistence crate.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       kopikas-service                       │
//! │                                                             │
//! │   PaymentService ──► kopikas-db ──► SQLite                  │
//! │        │                                                    │
//! │        └──► AttachmentStore ──► local filesystem            │
//! │                                                             │
//! │   ReportService ──► kopikas-db ──► kopikas-core::report     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transport concerns (HTTP, sessions, multipart parsing) live above this
//! crate; every entry point here already receives a resolved `owner_id`.

pub mod attachments;
pub mod config;
pub mod error;
pub mod payments;
pub mod reports;

pub use attachments::{AttachmentError, AttachmentStore, LocalAttachmentStore};
pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use payments::{AttachmentUpload, PaymentService};
pub use reports::ReportService;
