//! # Validation Module
//!
//! Input validation for the workshop forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console command (taller-console)                              │
//! │  ├── key=value parsing, numeric/date parsing                            │
//! │  └── Admin gate                                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Required fields, numeric ranges                                    │
//! │  └── Booking date not in the past                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store (taller-store)                                          │
//! │  ├── Unique service / item names                                        │
//! │  └── Client / vehicle references                                        │
//! │                                                                         │
//! │  A form that fails any layer leaves the store unchanged                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use taller_core::validation::{validate_year, require_non_empty};
//!
//! assert!(validate_year(2020).is_ok());
//! assert!(require_non_empty("plate", "  ").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewClient, NewInventoryItem, NewService};
use crate::{MAX_PRICE_MAJOR, MAX_STOCK, MAX_VEHICLE_YEAR, MIN_VEHICLE_YEAR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Fails with `Required` when `value` is empty after trimming.
pub fn require_non_empty(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Vehicle model year, 1990 through 2024 inclusive.
///
/// ```rust
/// use taller_core::validation::validate_year;
///
/// assert!(validate_year(1990).is_ok());
/// assert!(validate_year(2024).is_ok());
/// assert!(validate_year(1989).is_err());
/// assert!(validate_year(2025).is_err());
/// ```
pub fn validate_year(year: i32) -> ValidationResult<()> {
    if !(MIN_VEHICLE_YEAR..=MAX_VEHICLE_YEAR).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
            min: MIN_VEHICLE_YEAR as i64,
            max: MAX_VEHICLE_YEAR as i64,
        });
    }
    Ok(())
}

/// Units on hand, 0 through [`MAX_STOCK`].
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::TooSmall {
            field: "stock".to_string(),
            min: 0,
        });
    }
    check_max("stock", stock, MAX_STOCK)
}

/// Reorder threshold, at least 1.
pub fn validate_stock_min(stock_min: i64) -> ValidationResult<()> {
    if stock_min < 1 {
        return Err(ValidationError::TooSmall {
            field: "stock_min".to_string(),
            min: 1,
        });
    }
    check_max("stock_min", stock_min, MAX_STOCK)
}

/// Non-negative price (parts may be free), at most [`MAX_PRICE_MAJOR`].
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::TooSmall {
            field: field.to_string(),
            min: 0,
        });
    }
    check_price_ceiling(field, price)
}

/// Strictly positive price (catalog services).
pub fn validate_positive_price(field: &str, price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    check_price_ceiling(field, price)
}

fn check_max(field: &str, value: i64, max: i64) -> ValidationResult<()> {
    if value > max {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

fn check_price_ceiling(field: &str, price: Money) -> ValidationResult<()> {
    if price > Money::from_major(MAX_PRICE_MAJOR) {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_PRICE_MAJOR,
        });
    }
    Ok(())
}

/// Booking date must be today or later.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use taller_core::validation::validate_booking_date;
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
/// assert!(validate_booking_date(today, today).is_ok());
/// assert!(validate_booking_date(today.pred_opt().unwrap(), today).is_err());
/// ```
pub fn validate_booking_date(date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if date < today {
        return Err(ValidationError::DateInPast {
            field: "date".to_string(),
            earliest: today.to_string(),
        });
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

/// Parses an amount typed in whole units with up to two decimals
/// (`50000`, `18000.5`, `18000.50`). Thousands separators are not accepted.
///
/// ```rust
/// use taller_core::validation::parse_money;
///
/// assert_eq!(parse_money("price", "50000").unwrap().cents(), 5_000_000);
/// assert_eq!(parse_money("price", "18000.5").unwrap().cents(), 1_800_050);
/// assert!(parse_money("price", "12.345").is_err());
/// ```
pub fn parse_money(field: &str, value: &str) -> ValidationResult<Money> {
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected an amount like 50000 or 18000.50".to_string(),
    };

    let value = value.trim();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (digits, ""),
    };

    if whole.is_empty()
        || frac.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let major: i64 = whole.parse().map_err(|_| invalid())?;
    let minor: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    let cents = major
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or_else(invalid)?;
    Ok(Money::from_cents(if negative { -cents } else { cents }))
}

// =============================================================================
// Form Validators
// =============================================================================

/// Validates the client intake form.
///
/// ## Rules
/// - name, phone, make, model, plate are required
/// - email is optional
/// - year within 1990–2024
///
/// Fields are checked in form order so the first problem reported is the
/// first one the user sees.
pub fn validate_new_client(form: &NewClient) -> ValidationResult<()> {
    require_non_empty("name", &form.name)?;
    require_non_empty("phone", &form.phone)?;
    require_non_empty("make", &form.make)?;
    require_non_empty("model", &form.model)?;
    validate_year(form.year)?;
    require_non_empty("plate", &form.plate)?;
    Ok(())
}

/// Validates the inventory item form.
pub fn validate_new_item(form: &NewInventoryItem) -> ValidationResult<()> {
    require_non_empty("name", &form.name)?;
    validate_stock(form.stock)?;
    validate_stock_min(form.stock_min)?;
    validate_price("unit_price", form.unit_price)?;
    require_non_empty("supplier", &form.supplier)?;
    Ok(())
}

/// Validates the catalog service form.
pub fn validate_new_service(form: &NewService) -> ValidationResult<()> {
    require_non_empty("name", &form.name)?;
    validate_positive_price("price", form.price)?;
    require_non_empty("duration", &form.duration)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
