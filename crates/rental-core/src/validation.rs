//! # Validation Module
//!
//! Key-presence and date-format checks applied to request payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: axum Json extractor                                          │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required keys present and non-null                                │
//! │  └── Dates parse as YYYY-MM-DD                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (customer email)                               │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::DATE_FORMAT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Unwraps a required payload value.
///
/// ## Example
/// ```rust
/// use rental_core::validation::require;
///
/// assert_eq!(require(Some(3), "year").unwrap(), 3);
/// assert!(require::<i32>(None, "year").is_err());
/// ```
pub fn require<T>(value: Option<T>, field: &str) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::required(field))
}

/// Parses a rental date in `YYYY-MM-DD` form.
///
/// ## Example
/// ```rust
/// use rental_core::validation::parse_date;
///
/// assert!(parse_date("2024-06-01", "start_date").is_ok());
/// assert!(parse_date("06/01/2024", "start_date").is_err());
/// ```
pub fn parse_date(value: &str, field: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::invalid_format(field, "expected a date formatted as YYYY-MM-DD"))
}

/// Requires a date key and parses it.
pub fn require_date(value: Option<String>, field: &str) -> ValidationResult<NaiveDate> {
    let raw = require(value, field)?;
    parse_date(&raw, field)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require(Some("x"), "name").unwrap(), "x");
        assert_eq!(
            require::<String>(None, "name").unwrap_err(),
            ValidationError::required("name")
        );
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-02-29", "start_date").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        // Surrounding whitespace is tolerated
        assert!(parse_date(" 2024-01-15 ", "start_date").is_ok());

        assert!(parse_date("", "start_date").is_err());
        assert!(parse_date("2023-02-29", "start_date").is_err());
        assert!(parse_date("tomorrow", "end_date").is_err());
    }

    #[test]
    fn test_require_date_reports_field() {
        let err = require_date(None, "end_date").unwrap_err();
        assert_eq!(err, ValidationError::required("end_date"));

        let err = require_date(Some("2024/01/01".to_string()), "end_date").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "end_date"));
    }
}
