//! # Money Module
//!
//! Provides the `Rupiah` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Rupiah                                           │
//! │    The rupiah amounts in this ledger carry no fractional subunit,       │
//! │    so every total is an exact i64. Sums over thousands of payments      │
//! │    never drift.                                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kopikas_core::money::Rupiah;
//!
//! // Create from whole rupiah
//! let price = Rupiah::new(199_000);
//!
//! // Arithmetic operations
//! let total = price + Rupiah::new(398_000);
//! assert_eq!(total.amount(), 597_000);
//!
//! // Display uses Indonesian dot grouping
//! assert_eq!(total.to_string(), "Rp597.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Rupiah Type
// =============================================================================

/// Represents a monetary value in whole rupiah (the smallest unit used here).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values (growth deltas);
///   persisted payment amounts are validated non-negative at the boundary
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization; transparent
///   sqlx Type (behind the `sqlx` feature) so it maps straight to INTEGER
///
/// ## Where Rupiah Flows
/// ```text
/// Payment.total_price ──► summarize() ──► Summary.total
///                     ──► category_breakdown() ──► CategorySlice.total
///                     ──► monthly_series() ──► MonthlyBucket.total
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Rupiah(i64);

impl Rupiah {
    /// Creates a Rupiah value from a whole-rupiah amount.
    ///
    /// ## Example
    /// ```rust
    /// use kopikas_core::money::Rupiah;
    ///
    /// let price = Rupiah::new(199_000);
    /// assert_eq!(price.amount(), 199_000);
    /// ```
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Rupiah(amount)
    }

    /// Returns the amount in whole rupiah.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero rupiah.
    #[inline]
    pub const fn zero() -> Self {
        Rupiah(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Rupiah(self.0.abs())
    }

    /// Returns the amount as f64, for average/ratio math only.
    ///
    /// ## Note
    /// Persisted amounts and sums stay integer; only derived statistics
    /// (average transaction value, growth percentages) go through floats.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows rupiah with Indonesian dot grouping.
///
/// ## Note
/// This is for logs and the seed tool. Use frontend formatting for actual
/// UI display to handle localization properly.
impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();

        // Group digits in threes from the right: 1234567 -> 1.234.567
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - offset) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        write!(f, "{}Rp{}", sign, grouped)
    }
}

/// Default rupiah is zero.
impl Default for Rupiah {
    fn default() -> Self {
        Rupiah::zero()
    }
}

/// Addition of two Rupiah values.
impl Add for Rupiah {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Rupiah(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Rupiah {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Rupiah values.
impl Sub for Rupiah {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Rupiah(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Rupiah {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summation over an iterator of Rupiah (used by the reporting engine).
impl Sum for Rupiah {
    fn sum<I: Iterator<Item = Rupiah>>(iter: I) -> Self {
        iter.fold(Rupiah::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_amount() {
        let money = Rupiah::new(199_000);
        assert_eq!(money.amount(), 199_000);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(format!("{}", Rupiah::new(0)), "Rp0");
        assert_eq!(format!("{}", Rupiah::new(500)), "Rp500");
        assert_eq!(format!("{}", Rupiah::new(1_500)), "Rp1.500");
        assert_eq!(format!("{}", Rupiah::new(199_000)), "Rp199.000");
        assert_eq!(format!("{}", Rupiah::new(1_234_567)), "Rp1.234.567");
        assert_eq!(format!("{}", Rupiah::new(-597_000)), "-Rp597.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Rupiah::new(199_000);
        let b = Rupiah::new(398_000);

        assert_eq!((a + b).amount(), 597_000);
        assert_eq!((b - a).amount(), 199_000);

        let mut acc = Rupiah::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.amount(), 597_000);
    }

    #[test]
    fn test_sum() {
        let total: Rupiah = [100, 200, 300].into_iter().map(Rupiah::new).sum();
        assert_eq!(total.amount(), 600);

        let empty: Rupiah = std::iter::empty::<Rupiah>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Rupiah::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Rupiah::new(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().amount(), 100);
    }
}
