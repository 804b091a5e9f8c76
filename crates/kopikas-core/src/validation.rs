//! # Validation Module
//!
//! Boundary validation for payment input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service Boundary (Rust)                                      │
//! │  ├── Type validation (deserialization into PaymentForm)                │
//! │  └── THIS MODULE: parse and range-check every field                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (weight_kg >= 0), CHECK (total_price >= 0)                  │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kopikas_core::types::PaymentForm;
//! use kopikas_core::validation::validate_payment_form;
//!
//! let form = PaymentForm {
//!     date: "2026-03-14".to_string(),
//!     coffee_type: "Kopi Bubuk".to_string(),
//!     weight_kg: "1.5".to_string(),
//!     total_price: "199000".to_string(),
//! };
//!
//! let fields = validate_payment_form(&form).unwrap();
//! assert_eq!(fields.weight_kg, 1.5);
//! ```

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Rupiah;
use crate::types::{PaymentFields, PaymentForm};
use crate::MAX_COFFEE_TYPE_LEN;

/// Date format accepted at the boundary (ISO calendar date).
const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Field Validators
// =============================================================================

/// Parses and validates a transaction date.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as `YYYY-MM-DD` to a real calendar date
///   (so `2026-02-30` is rejected, not silently shifted)
///
/// ## Example
/// ```rust
/// use kopikas_core::validation::parse_date;
///
/// assert!(parse_date("2026-03-14").is_ok());
/// assert!(parse_date("2026-02-30").is_err());
/// assert!(parse_date("next tuesday").is_err());
/// ```
pub fn parse_date(raw: &str) -> ValidationResult<NaiveDate> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::required("date"));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ValidationError::invalid_format("date", "expected YYYY-MM-DD"))
}

/// Validates a coffee type label.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 100 characters
///
/// The label stays free-form on purpose: the category breakdown filters to
/// the canonical types downstream, but any label is a valid record.
pub fn validate_coffee_type(raw: &str) -> ValidationResult<String> {
    let label = raw.trim();

    if label.is_empty() {
        return Err(ValidationError::required("coffee_type"));
    }

    if label.len() > MAX_COFFEE_TYPE_LEN {
        return Err(ValidationError::TooLong {
            field: "coffee_type".to_string(),
            max: MAX_COFFEE_TYPE_LEN,
        });
    }

    Ok(label.to_string())
}

/// Parses and validates a weight in kilograms.
///
/// ## Rules
/// - Must parse as a decimal number
/// - Must be finite (no NaN/inf sneaking in through "inf" strings)
/// - Must not be negative
///
/// ## Example
/// ```rust
/// use kopikas_core::validation::parse_weight_kg;
///
/// assert_eq!(parse_weight_kg("2.5").unwrap(), 2.5);
/// assert!(parse_weight_kg("-1").is_err());
/// assert!(parse_weight_kg("abc").is_err());
/// ```
pub fn parse_weight_kg(raw: &str) -> ValidationResult<f64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::required("weight_kg"));
    }

    let weight: f64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid_format("weight_kg", "expected a decimal number"))?;

    if !weight.is_finite() {
        return Err(ValidationError::invalid_format(
            "weight_kg",
            "expected a finite number",
        ));
    }

    if weight < 0.0 {
        return Err(ValidationError::negative("weight_kg"));
    }

    Ok(weight)
}

/// Parses and validates a total price in whole rupiah.
///
/// ## Rules
/// - Must parse as an integer (the currency has no fractional subunit)
/// - Must not be negative
pub fn parse_total_price(raw: &str) -> ValidationResult<Rupiah> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::required("total_price"));
    }

    let amount: i64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid_format("total_price", "expected a whole number"))?;

    if amount < 0 {
        return Err(ValidationError::negative("total_price"));
    }

    Ok(Rupiah::new(amount))
}

// =============================================================================
// Form Validation
// =============================================================================

/// Validates a complete payment form into typed fields.
///
/// ## What This Does
/// Runs every field validator and returns the first failure, or the fully
/// typed [`PaymentFields`] ready for persistence. This is the single entry
/// point the lifecycle service uses for both create and update.
pub fn validate_payment_form(form: &PaymentForm) -> ValidationResult<PaymentFields> {
    Ok(PaymentFields {
        date: parse_date(&form.date)?,
        coffee_type: validate_coffee_type(&form.coffee_type)?,
        weight_kg: parse_weight_kg(&form.weight_kg)?,
        total_price: parse_total_price(&form.total_price)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PaymentForm {
        PaymentForm {
            date: "2026-03-14".to_string(),
            coffee_type: "Kopi Bubuk".to_string(),
            weight_kg: "1.5".to_string(),
            total_price: "199000".to_string(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let fields = validate_payment_form(&valid_form()).unwrap();
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
        assert_eq!(fields.coffee_type, "Kopi Bubuk");
        assert_eq!(fields.weight_kg, 1.5);
        assert_eq!(fields.total_price, Rupiah::new(199_000));
    }

    #[test]
    fn test_date_rejects_garbage_and_impossible_days() {
        assert!(parse_date("").is_err());
        assert!(parse_date("14-03-2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_date("2026-02-30").is_err());
    }

    #[test]
    fn test_date_accepts_leap_day() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2026-02-29").is_err());
    }

    #[test]
    fn test_weight_rejects_negative() {
        let err = parse_weight_kg("-1").unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
    }

    #[test]
    fn test_weight_rejects_non_numeric_and_non_finite() {
        assert!(parse_weight_kg("abc").is_err());
        assert!(parse_weight_kg("NaN").is_err());
        assert!(parse_weight_kg("inf").is_err());
    }

    #[test]
    fn test_weight_accepts_zero() {
        assert_eq!(parse_weight_kg("0").unwrap(), 0.0);
    }

    #[test]
    fn test_price_rejects_negative_and_fractions() {
        assert!(matches!(
            parse_total_price("-500").unwrap_err(),
            ValidationError::Negative { .. }
        ));
        assert!(parse_total_price("19.99").is_err());
        assert!(parse_total_price("abc").is_err());
    }

    #[test]
    fn test_coffee_type_trimmed_and_bounded() {
        assert_eq!(validate_coffee_type("  Kopi Bijian  ").unwrap(), "Kopi Bijian");
        assert!(validate_coffee_type("").is_err());
        assert!(validate_coffee_type(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_form_fails_on_first_bad_field() {
        let mut form = valid_form();
        form.weight_kg = "-1".to_string();

        let err = validate_payment_form(&form).unwrap_err();
        assert!(matches!(err, ValidationError::Negative { .. }));
    }
}
