//! # Domain Types
//!
//! Core domain types used throughout Kopikas.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Payment      │   │  PaymentForm    │   │ PaymentFields   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  raw strings    │   │  typed, valid   │       │
//! │  │  owner_id       │   │  from request   │──►│  date/kg/price  │       │
//! │  │  date, type     │   │  boundary       │   │  ready to store │       │
//! │  │  weight, price  │   └─────────────────┘   └─────────────────┘       │
//! │  │  image?         │                                                   │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  Report outputs (passive data, no behavior):                           │
//! │  Summary • CategorySlice • MonthlyBucket • GrowthMetrics               │
//! │  DashboardStats • ReportRow                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! - `id`: store-assigned integer - immutable, used for lookups
//! - `owner_id`: the user the record belongs to - set at creation, never
//!   reassigned; every read and write is filtered by it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Rupiah;

// =============================================================================
// Canonical Labels
// =============================================================================

/// The coffee type labels recognized by the category breakdown.
///
/// ## Why a fixed list?
/// The `coffee_type` field itself is free-form; only the dashboard pie view
/// filters to these two canonical products. Matching is case-insensitive,
/// and anything else still counts toward the overall totals.
pub const CANONICAL_COFFEE_TYPES: [&str; 2] = ["Kopi Bubuk", "Kopi Bijian"];

/// Fixed month labels for the dashboard bar series, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// =============================================================================
// Payment
// =============================================================================

/// One recorded coffee-purchase transaction.
///
/// ## Invariants
/// - `owner_id` is set at creation and never reassigned
/// - `weight_kg` and `total_price` are non-negative (enforced at the
///   validation boundary and by database CHECK constraints)
/// - A non-`None` `image` references a file the attachment store holds;
///   replacement cleanup of the old file is best-effort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Store-assigned identifier, immutable.
    pub id: i64,

    /// Identity of the owning user. All access is scoped by this field.
    pub owner_id: i64,

    /// Calendar date of the transaction (day granularity, no time-of-day).
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Free-form category label, e.g. "Kopi Bubuk".
    pub coffee_type: String,

    /// Weight in kilograms, non-negative.
    pub weight_kg: f64,

    /// Amount paid in whole rupiah, non-negative.
    pub total_price: Rupiah,

    /// Optional reference to an attached receipt image (public path).
    pub image: Option<String>,
}

impl Payment {
    /// Checks whether this payment's type matches a label, case-insensitively.
    #[inline]
    pub fn matches_type(&self, label: &str) -> bool {
        self.coffee_type.eq_ignore_ascii_case(label)
    }
}

// =============================================================================
// Boundary Inputs
// =============================================================================

/// Raw payment fields as received from the transport layer.
///
/// ## Why strings?
/// Form submissions and query payloads arrive untyped. Instead of poking at
/// a loosely-typed payload inside the core, the transport hands over this
/// explicit struct and [`crate::validation::validate_payment_form`] turns it
/// into typed [`PaymentFields`] - or a precise `ValidationError`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    /// Transaction date, expected as `YYYY-MM-DD`.
    pub date: String,

    /// Coffee type label.
    pub coffee_type: String,

    /// Weight in kilograms, decimal string.
    pub weight_kg: String,

    /// Total price in whole rupiah, integer string.
    pub total_price: String,
}

/// Validated, typed payment fields ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFields {
    pub date: NaiveDate,
    pub coffee_type: String,
    pub weight_kg: f64,
    pub total_price: Rupiah,
}

// =============================================================================
// Report Outputs
// =============================================================================

/// Aggregate totals over a record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Total revenue in whole rupiah.
    pub total: Rupiah,

    /// Total weight sold, in kilograms.
    pub total_kg: f64,

    /// Average transaction value (`total / count`), 0.0 when empty.
    /// Fractional because an integer total rarely divides evenly.
    pub avg: f64,
}

impl Summary {
    /// An all-zero summary (empty record set).
    pub fn zero() -> Self {
        Summary {
            total: Rupiah::zero(),
            total_kg: 0.0,
            avg: 0.0,
        }
    }
}

/// Revenue total for one canonical coffee type (dashboard pie slice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub coffee_type: String,
    pub total: Rupiah,
}

/// Revenue total for one calendar month (dashboard bar).
///
/// Year is deliberately discarded: all records landing in the same month
/// name are summed together regardless of year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub month: String,
    pub total: Rupiah,
}

/// Period-over-period growth, in whole percentage points.
///
/// Compares the trailing 30-day window against the 30 days before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMetrics {
    /// Growth of total revenue.
    pub total: i64,

    /// Growth of total weight.
    pub kg: i64,

    /// Growth of average transaction value.
    pub avg: i64,
}

impl GrowthMetrics {
    /// All-zero growth (no activity in either window).
    pub fn zero() -> Self {
        GrowthMetrics {
            total: 0,
            kg: 0,
            avg: 0,
        }
    }
}

/// Everything the dashboard view needs, in one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub summary: Summary,
    pub growth: GrowthMetrics,
    pub categories: Vec<CategorySlice>,
    pub monthly: Vec<MonthlyBucket>,
}

/// One flat row of the exportable report.
///
/// This is the data shape handed to the spreadsheet writer (which lives
/// outside this workspace); the binary encoding is not our concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Date formatted `DD-MM-YYYY` for display.
    pub date: String,
    pub coffee_type: String,
    pub weight_kg: f64,
    pub total_price: Rupiah,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_type_case_insensitive() {
        let payment = Payment {
            id: 1,
            owner_id: 1,
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            coffee_type: "kopi bubuk".to_string(),
            weight_kg: 1.0,
            total_price: Rupiah::new(100_000),
            image: None,
        };

        assert!(payment.matches_type("Kopi Bubuk"));
        assert!(payment.matches_type("KOPI BUBUK"));
        assert!(!payment.matches_type("Kopi Bijian"));
    }

    #[test]
    fn test_payment_serializes_camel_case() {
        let payment = Payment {
            id: 1,
            owner_id: 7,
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            coffee_type: "Kopi Bubuk".to_string(),
            weight_kg: 1.5,
            total_price: Rupiah::new(199_000),
            image: Some("/uploads/receipt.jpg".to_string()),
        };

        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["ownerId"], 7);
        assert_eq!(json["coffeeType"], "Kopi Bubuk");
        assert_eq!(json["weightKg"], 1.5);
        assert_eq!(json["totalPrice"], 199_000);
        assert_eq!(json["image"], "/uploads/receipt.jpg");
    }

    #[test]
    fn test_month_names_fixed_order() {
        assert_eq!(MONTH_NAMES.len(), 12);
        assert_eq!(MONTH_NAMES[0], "Jan");
        assert_eq!(MONTH_NAMES[11], "Dec");
    }
}
