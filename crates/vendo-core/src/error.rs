//! # Error Types
//!
//! Domain-specific error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vendo-core errors (this file)                                         │
//! │  ├── CoreError        - Coin and purchase outcomes                     │
//! │  └── ValidationError  - Item input validation failures                 │
//! │                                                                         │
//! │  vendo-cli errors (app)                                                │
//! │  └── CliError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → Terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (denomination, item name, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The purchase-flow variants (`NoCoinsInserted` through `InsufficientFunds`)
/// are ordinary business outcomes. None of them leave any state changed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Denomination is not one of the recognized coin values.
    #[error("Coin invalid: {0}")]
    InvalidCoin(i64),

    /// Coin quantity must be strictly positive.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// Adding the coins would push the inventory's total value past what a
    /// `Money` can hold.
    #[error("Cannot hold {quantity} x {denomination}p: coin capacity exceeded")]
    CapacityExceeded { denomination: u32, quantity: i64 },

    /// More coins were asked for than the inventory holds.
    ///
    /// ## When This Occurs
    /// Never through the purchase flow: change selection only returns coins
    /// the reserve holds. Seeing it means a caller broke the removal contract.
    #[error("Only {available} x {denomination}p available, cannot remove {requested}")]
    InsufficientCoins {
        denomination: u32,
        available: i64,
        requested: i64,
    },

    /// Purchase attempted before any coin was inserted.
    #[error("Please insert coins")]
    NoCoinsInserted,

    /// No catalog item has the requested code.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Item exists but has no stock left.
    #[error("{name}: Out of stock!")]
    OutOfStock { code: String, name: String },

    /// Inserted coins do not cover the item price.
    ///
    /// ## User Workflow
    /// ```text
    /// Insert 50p ──► Buy A01 (60p)
    ///      │
    ///      ▼
    /// InsufficientFunds { price: £0.60, inserted: £0.50 }
    ///      │
    ///      ▼
    /// Coins stay inserted, customer may add 10p and retry
    /// ```
    #[error("Not enough money! Price {price}, inserted {inserted}")]
    InsufficientFunds { price: Money, inserted: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Machine-readable classification of a [`CoreError`].
///
/// Presentation layers switch on this instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad coin or coin quantity supplied by the caller.
    InvalidInput,
    /// Internal contract violation.
    Contract,
    /// Recoverable purchase outcome (retry or choose again).
    Purchase,
    /// Item data rejected by validation.
    Validation,
}

impl CoreError {
    /// Classifies the error for presentation layers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidCoin(_)
            | CoreError::InvalidQuantity(_)
            | CoreError::CapacityExceeded { .. } => ErrorKind::InvalidInput,
            CoreError::InsufficientCoins { .. } => ErrorKind::Contract,
            CoreError::NoCoinsInserted
            | CoreError::InvalidSelection(_)
            | CoreError::OutOfStock { .. }
            | CoreError::InsufficientFunds { .. } => ErrorKind::Purchase,
            CoreError::Validation(_) => ErrorKind::Validation,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when item data doesn't meet requirements.
/// Used for early validation before the catalog is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is beyond what the machine can count.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. unexpected characters in an item code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
