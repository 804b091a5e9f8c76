//! # Reporting Engine
//!
//! Pure aggregation over a set of [`Payment`] records: summary totals, the
//! category breakdown, the month-bucketed series, and period-over-period
//! growth.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dashboard Computation                              │
//! │                                                                         │
//! │  Vec<Payment> (one owner, already fetched)                             │
//! │       │                                                                 │
//! │       ├── summarize() ──────────► Summary { total, total_kg, avg }     │
//! │       │                                                                 │
//! │       ├── category_breakdown() ─► [CategorySlice] (pie chart)          │
//! │       │                                                                 │
//! │       ├── monthly_series() ─────► [MonthlyBucket; 12] (bar chart)      │
//! │       │                                                                 │
//! │       └── growth(now) ──────────► GrowthMetrics (trend arrows)         │
//! │                                                                         │
//! │  STATELESS • DETERMINISTIC • NEVER ERRORS ON WELL-FORMED INPUT         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. **Explicit clock**: `growth` takes `now` as a parameter; nothing in
//!    this module reads the system clock, so every function is testable
//!    without wall-clock mocking
//! 2. **Empty is zero, not error**: an empty record set produces all-zero
//!    structures
//! 3. **Integer money in, integer money out**: only averages and growth
//!    ratios pass through f64

use chrono::{Datelike, Days, NaiveDate};

use crate::money::Rupiah;
use crate::types::{
    CategorySlice, DashboardStats, GrowthMetrics, MonthlyBucket, Payment, ReportRow, Summary,
    CANONICAL_COFFEE_TYPES, MONTH_NAMES,
};
use crate::GROWTH_WINDOW_DAYS;

// =============================================================================
// Summary
// =============================================================================

/// Computes aggregate totals over a record set.
///
/// ## Definition
/// - `total` = Σ total_price
/// - `total_kg` = Σ weight_kg
/// - `avg` = total / count, or 0 when the set is empty
///
/// ## Example
/// ```rust
/// use kopikas_core::report::summarize;
///
/// let summary = summarize(&[]);
/// assert!(summary.total.is_zero());
/// assert_eq!(summary.avg, 0.0);
/// ```
pub fn summarize(records: &[Payment]) -> Summary {
    let total: Rupiah = records.iter().map(|p| p.total_price).sum();
    let total_kg: f64 = records.iter().map(|p| p.weight_kg).sum();

    let avg = if records.is_empty() {
        0.0
    } else {
        total.as_f64() / records.len() as f64
    };

    Summary {
        total,
        total_kg,
        avg,
    }
}

// =============================================================================
// Category Breakdown
// =============================================================================

/// Sums revenue per canonical coffee type, preserving label order.
///
/// ## Matching Rules
/// - Labels match case-insensitively (`"kopi bubuk"` counts as "Kopi Bubuk")
/// - Records whose type is not in `labels` are excluded from this view but
///   still count toward [`summarize`] totals
/// - Every label produces a slice, even at zero revenue, so the pie chart
///   legend stays stable
pub fn category_breakdown(records: &[Payment], labels: &[&str]) -> Vec<CategorySlice> {
    labels
        .iter()
        .map(|label| CategorySlice {
            coffee_type: (*label).to_string(),
            total: records
                .iter()
                .filter(|p| p.matches_type(label))
                .map(|p| p.total_price)
                .sum(),
        })
        .collect()
}

// =============================================================================
// Monthly Series
// =============================================================================

/// Buckets revenue by calendar month, January through December.
///
/// ## Shape Guarantee
/// Always returns exactly 12 buckets in fixed Jan→Dec order, zero-filled
/// for quiet months. The year component is discarded: March 2025 and
/// March 2026 land in the same bucket.
pub fn monthly_series(records: &[Payment]) -> Vec<MonthlyBucket> {
    let mut totals = [Rupiah::zero(); 12];

    for payment in records {
        // month0() is 0-based (Jan = 0), matching the array index
        totals[payment.date.month0() as usize] += payment.total_price;
    }

    MONTH_NAMES
        .iter()
        .zip(totals)
        .map(|(month, total)| MonthlyBucket {
            month: (*month).to_string(),
            total,
        })
        .collect()
}

// =============================================================================
// Growth
// =============================================================================

/// Computes period-over-period growth against a caller-supplied reference day.
///
/// ## Windows
/// ```text
/// now-60d          now-30d            now
///    │   prior window │  current window │
///    ├─────────────────┼─────────────────┤
///    [ now-60, now-30 )  [ now-30, now ]
/// ```
/// Records dated after `now` fall in neither window.
///
/// ## Per-Metric Rule
/// Total revenue, total weight, and average transaction value each go
/// through [`growth_pct`] independently.
pub fn growth(records: &[Payment], now: NaiveDate) -> GrowthMetrics {
    let window = Days::new(GROWTH_WINDOW_DAYS as u64);
    let split = now.checked_sub_days(window).unwrap_or(NaiveDate::MIN);
    let start = split.checked_sub_days(window).unwrap_or(NaiveDate::MIN);

    let current: Vec<Payment> = records
        .iter()
        .filter(|p| p.date >= split && p.date <= now)
        .cloned()
        .collect();
    let prior: Vec<Payment> = records
        .iter()
        .filter(|p| p.date >= start && p.date < split)
        .cloned()
        .collect();

    let cur = summarize(&current);
    let prev = summarize(&prior);

    GrowthMetrics {
        total: growth_pct(cur.total.as_f64(), prev.total.as_f64()),
        kg: growth_pct(cur.total_kg, prev.total_kg),
        avg: growth_pct(cur.avg, prev.avg),
    }
}

/// Percentage change between two values, in whole percentage points.
///
/// ## Rules
/// - both zero → 0 (no activity, no movement)
/// - only previous zero → 100 (anything from nothing reads as +100%)
/// - otherwise → `round((cur - prev) / prev * 100)`
///
/// Rounding is to the nearest whole point with ties away from zero
/// (`f64::round` semantics), so +12.5% reports as +13 and -12.5% as -13.
///
/// ## Example
/// ```rust
/// use kopikas_core::report::growth_pct;
///
/// assert_eq!(growth_pct(0.0, 0.0), 0);
/// assert_eq!(growth_pct(5.0, 0.0), 100);
/// assert_eq!(growth_pct(10.0, 5.0), 100);
/// assert_eq!(growth_pct(5.0, 10.0), -50);
/// ```
pub fn growth_pct(cur: f64, prev: f64) -> i64 {
    if prev == 0.0 && cur == 0.0 {
        return 0;
    }
    if prev == 0.0 {
        return 100;
    }
    ((cur - prev) / prev * 100.0).round() as i64
}

// =============================================================================
// Dashboard Assembly
// =============================================================================

/// Runs the full dashboard computation in one call.
pub fn dashboard(records: &[Payment], now: NaiveDate) -> DashboardStats {
    DashboardStats {
        summary: summarize(records),
        growth: growth(records, now),
        categories: category_breakdown(records, &CANONICAL_COFFEE_TYPES),
        monthly: monthly_series(records),
    }
}

// =============================================================================
// Report Export
// =============================================================================

/// Flattens records into spreadsheet-ready rows.
///
/// Dates are rendered `DD-MM-YYYY` for display; the input ordering is kept
/// (the repository already returns date-descending).
pub fn report_rows(records: &[Payment]) -> Vec<ReportRow> {
    records
        .iter()
        .map(|p| ReportRow {
            date: p.date.format("%d-%m-%Y").to_string(),
            coffee_type: p.coffee_type.clone(),
            weight_kg: p.weight_kg,
            total_price: p.total_price,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
