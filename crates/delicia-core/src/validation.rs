//! # Validation Module
//!
//! Input validation rules for the storefront.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend forms                                               │
//! │  ├── Required markers, input masks                                     │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: storefront command (deserialization)                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE, called from the reducer and request types       │
//! │  ├── Quantities and cart size                                          │
//! │  └── Reservation contact details, party size, date                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use delicia_core::validation::{validate_guests, validate_quantity};
//!
//! validate_quantity(3).unwrap();
//! assert!(validate_guests(21).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_RESERVATION_GUESTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted customer name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Longest accepted email address.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Accepted digit count for Brazilian phone numbers (DDD + number, with or
/// without the 55 country code).
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=13;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person's name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `MAX_NAME_LENGTH` characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// Formatting characters are ignored; only the digit count matters, so
/// `(11) 99999-9999` and `11999999999` are both accepted.
///
/// ## Example
/// ```rust
/// use delicia_core::validation::validate_phone;
///
/// assert!(validate_phone("(11) 99999-9999").is_ok());
/// assert!(validate_phone("99999").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if phone.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone
        .chars()
        .any(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '(' | ')' | '-' | '+')))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "may only contain digits, spaces, parentheses, + and -".to_string(),
        });
    }

    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !PHONE_DIGITS.contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!(
                "must have between {} and {} digits",
                PHONE_DIGITS.start(),
                PHONE_DIGITS.end()
            ),
        });
    }

    Ok(())
}

/// Validates an email address shape (`local@domain.tld`).
///
/// This is a shape check, not deliverability.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@domain.com".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_ITEM_QUANTITY`
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

/// Validates the party size of a reservation.
pub fn validate_guests(guests: u32) -> ValidationResult<()> {
    if guests == 0 || guests > MAX_RESERVATION_GUESTS {
        return Err(ValidationError::OutOfRange {
            field: "guests".to_string(),
            min: 1,
            max: MAX_RESERVATION_GUESTS as i64,
        });
    }

    Ok(())
}

/// Validates a payment amount in centavos.
///
/// Nothing is charged for an empty or negative total.
pub fn validate_payment_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits in the cart.
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates that a reservation date is today or later.
pub fn validate_reservation_date(date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if date < today {
        return Err(ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: format!("must not be before {}", today.format("%Y-%m-%d")),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
