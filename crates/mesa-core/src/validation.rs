//! # Validation Module
//!
//! Input validation for the add/edit forms (tables, products, users,
//! reservations) and for order lines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View form                                                    │
//! │  └── Disables "save" while required fields are empty                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Runs before any store is touched, so a rejected form             │
//! │      leaves the state exactly as it was                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mesa_core::validation::{validate_quantity, validate_required};
//!
//! assert!(validate_required("zone", "Terraza").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use chrono::NaiveTime;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::OrderItem;
use crate::{
    MAX_ITEM_QUANTITY, MAX_ORDER_LINES, MAX_ORDER_TOTAL_CENTS, MAX_PARTY_SIZE, MAX_PAYMENT_CENTS,
    MAX_PRICE_CENTS,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest free-text name accepted anywhere (customer, product, user).
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty or whitespace-only values.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a display name: required and at most [`MAX_NAME_LEN`] characters.
///
/// ```rust
/// use mesa_core::validation::validate_name;
///
/// assert!(validate_name("name", "Pizza Margherita").is_ok());
/// assert!(validate_name("name", "  ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;

    if value.trim().chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Parses a reservation time in 24h `HH:MM` form.
///
/// ```rust
/// use mesa_core::validation::validate_time_of_day;
///
/// assert!(validate_time_of_day("19:30").is_ok());
/// assert!(validate_time_of_day("7pm").is_err());
/// ```
pub fn validate_time_of_day(value: &str) -> ValidationResult<NaiveTime> {
    validate_required("time", value)?;

    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "time".to_string(),
            reason: "expected HH:MM".to_string(),
        }
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a menu price in cents. Zero is allowed (complimentary items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a modifier delta. Substitutions may be negative.
pub fn validate_modifier_cents(cents: i64) -> ValidationResult<()> {
    if !(-MAX_PRICE_CENTS..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "modifier price".to_string(),
            min: -MAX_PRICE_CENTS,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a strictly positive count (table number, capacity).
pub fn validate_positive(field: &str, value: u32) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

pub fn validate_party_size(size: u32) -> ValidationResult<()> {
    if size == 0 || size > MAX_PARTY_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "party size".to_string(),
            min: 1,
            max: MAX_PARTY_SIZE as i64,
        });
    }
    Ok(())
}

/// Validates a tender amount; each payment must move money.
pub fn validate_payment_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }
    if cents > MAX_PAYMENT_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "payment amount".to_string(),
            min: 1,
            max: MAX_PAYMENT_CENTS,
        });
    }
    Ok(())
}

/// Cash handed over must cover the amount it pays for.
pub fn validate_tendered(amount_cents: i64, tendered_cents: i64) -> ValidationResult<()> {
    if tendered_cents < amount_cents {
        return Err(ValidationError::InvalidFormat {
            field: "tendered".to_string(),
            reason: "less than the amount it covers".to_string(),
        });
    }
    if tendered_cents > MAX_PAYMENT_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "tendered".to_string(),
            min: amount_cents,
            max: MAX_PAYMENT_CENTS,
        });
    }
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits on an order.
pub fn validate_order_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "order lines".to_string(),
            min: 0,
            max: MAX_ORDER_LINES as i64,
        });
    }
    Ok(())
}

/// Total the given lines come to, as long as it stays within
/// [`MAX_ORDER_TOTAL_CENTS`].
///
/// Run on the lines an order *would* have, before changing it.
pub fn validate_order_total<'a, I>(items: I) -> ValidationResult<Money>
where
    I: IntoIterator<Item = &'a OrderItem>,
{
    let out_of_range = || ValidationError::OutOfRange {
        field: "order total".to_string(),
        min: 0,
        max: MAX_ORDER_TOTAL_CENTS,
    };

    let mut total = Money::zero();
    for item in items {
        let line = item.checked_line_total().ok_or_else(out_of_range)?;
        total = total.checked_add(line).ok_or_else(out_of_range)?;
    }
    if total.cents() > MAX_ORDER_TOTAL_CENTS {
        return Err(out_of_range());
    }
    Ok(total)
}

// =============================================================================
// Unit Tests
// =============================================================================
