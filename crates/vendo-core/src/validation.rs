//! # Validation Module
//!
//! Input validation for catalog data and raw customer selections.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal driver                                              │
//! │  └── Parses numbers, splits commands                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Item code normalization (" a01 " → "A01")                         │
//! │  └── Item name / price / stock and coin quantity rules                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Types                                                        │
//! │  └── Denomination can only hold a recognized coin                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::validation::{normalize_item_code, validate_price};
//! use vendo_core::Money;
//!
//! assert_eq!(normalize_item_code(" b07 ").unwrap(), "B07");
//! assert!(validate_price(Money::from_pence(0)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Item;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted item code.
pub const MAX_ITEM_CODE_LEN: usize = 16;

/// Longest accepted item name.
pub const MAX_ITEM_NAME_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Normalizes an item code: trimmed and upper-cased.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_ITEM_CODE_LEN`] characters
/// - Letters, digits, hyphens and underscores only
///
/// ## Example
/// ```rust
/// use vendo_core::validation::normalize_item_code;
///
/// assert_eq!(normalize_item_code("c02").unwrap(), "C02");
/// assert!(normalize_item_code("   ").is_err());
/// assert!(normalize_item_code("A 01").is_err());
/// ```
pub fn normalize_item_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_ITEM_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_ITEM_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(code.to_uppercase())
}

/// Validates an item name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item price. Free items are not sold by this machine.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a slot stock level. Zero is allowed (empty slot).
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a coin count being added or removed. Must be at least one.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates an item and returns it with a normalized code.
pub fn validate_item(item: &Item) -> ValidationResult<Item> {
    let code = normalize_item_code(&item.code)?;
    validate_item_name(&item.name)?;
    validate_price(item.price)?;
    validate_stock(item.quantity)?;

    Ok(Item {
        code,
        name: item.name.trim().to_string(),
        quantity: item.quantity,
        price: item.price,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
