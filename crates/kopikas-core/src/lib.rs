//! # kopikas-core: Pure Business Logic for Kopikas
//!
//! This crate is the **heart** of Kopikas, a ledger for a coffee-trading
//! business. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kopikas Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Transport Layer (outside workspace)               │   │
//! │  │    Login ──► Record CRUD ──► Dashboard ──► Report Export        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kopikas-service                              │   │
//! │  │    PaymentService, AttachmentStore, ReportService               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kopikas-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  report   │  │ validation│  │   │
//! │  │   │  Payment  │  │  Rupiah   │  │ Summary   │  │   rules   │  │   │
//! │  │   │  Summary  │  │ grouping  │  │ Growth    │  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kopikas-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Payment, report outputs, form inputs)
//! - [`money`] - Rupiah type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation for payment forms
//! - [`report`] - The reporting engine (summary, breakdown, series, growth)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole rupiah (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Explicit Clock**: The growth calculation takes "now" as a parameter,
//!    never reads the system clock
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kopikas_core::money::Rupiah;
//! use kopikas_core::report;
//! use kopikas_core::types::{Payment, CANONICAL_COFFEE_TYPES};
//!
//! let records = vec![Payment {
//!     id: 1,
//!     owner_id: 7,
//!     date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
//!     coffee_type: "Kopi Bubuk".to_string(),
//!     weight_kg: 1.5,
//!     total_price: Rupiah::new(199_000),
//!     image: None,
//! }];
//!
//! let summary = report::summarize(&records);
//! assert_eq!(summary.total, Rupiah::new(199_000));
//!
//! let slices = report::category_breakdown(&records, &CANONICAL_COFFEE_TYPES);
//! assert_eq!(slices[0].total, Rupiah::new(199_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kopikas_core::Rupiah` instead of
// `use kopikas_core::money::Rupiah`

pub use error::ValidationError;
pub use money::Rupiah;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of the growth comparison window, in days.
///
/// ## Why a constant?
/// The dashboard compares the trailing 30 days against the 30 days before
/// that. Both windows are this long; changing the dashboard period means
/// changing exactly one number.
pub const GROWTH_WINDOW_DAYS: i64 = 30;

/// Maximum length of a coffee type label.
///
/// ## Business Reason
/// The label is free-form (breakdown filtering happens downstream), but an
/// unbounded label is always a paste accident, never a product name.
pub const MAX_COFFEE_TYPE_LEN: usize = 100;
