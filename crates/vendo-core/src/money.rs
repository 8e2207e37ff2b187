//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A change algorithm working in floats can owe a customer 0.999999p.    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pence                                            │
//! │    Every price, coin and total is a whole number of pence.             │
//! │    Only Display converts to pounds.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::money::Money;
//!
//! let price = Money::from_pence(65); // £0.65
//! let paid = Money::from_pence(100);
//!
//! assert_eq!((paid - price).pence(), 35);
//! assert_eq!(price.to_string(), "£0.65");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in pence (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences such as `inserted - price` may be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support, serializes as a bare number
///
/// ## Where Money is Used
/// ```text
/// Item.price ──────────────┐
///                          ├──► change owed ──► change selection
/// inserted coins total ────┘
///
/// CoinInventory.total_value() ──► reserve display, funds check
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pence.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let price = Money::from_pence(199); // £1.99
    /// assert_eq!(price.pence(), 199);
    /// ```
    #[inline]
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Returns the value in pence.
    #[inline]
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Returns the whole pounds portion.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// assert_eq!(Money::from_pence(427).pounds(), 4);
    /// assert_eq!(Money::from_pence(-150).pounds(), -1);
    /// ```
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the pence portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a coin or item count, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::money::Money;
    ///
    /// let twenty = Money::from_pence(20);
    /// assert_eq!(twenty.checked_mul(6), Some(Money::from_pence(120)));
    /// assert_eq!(twenty.checked_mul(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(pence) => Some(Money(pence)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(pence) => Some(Money(pence)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows sterling with two decimal places, e.g. `£1.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}£{}.{:02}", sign, self.pounds().abs(), self.pence_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pence() {
        let money = Money::from_pence(1099);
        assert_eq!(money.pence(), 1099);
        assert_eq!(money.pounds(), 10);
        assert_eq!(money.pence_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_pence(150)), "£1.50");
        assert_eq!(format!("{}", Money::from_pence(5)), "£0.05");
        assert_eq!(format!("{}", Money::from_pence(-20)), "-£0.20");
        assert_eq!(format!("{}", Money::zero()), "£0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pence(200);
        let b = Money::from_pence(65);

        assert_eq!((a + b).pence(), 265);
        assert_eq!((a - b).pence(), 135);
        assert_eq!((b * 3).pence(), 195);

        let mut c = a;
        c -= b;
        c += Money::from_pence(1);
        assert_eq!(c.pence(), 136);
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_pence(i64::MAX / 100);

        assert_eq!(big.checked_mul(100), Some(Money::from_pence(i64::MAX / 100 * 100)));
        assert_eq!(big.checked_mul(200), None);
        assert_eq!(
            Money::from_pence(i64::MAX).checked_add(Money::from_pence(1)),
            None
        );
        assert_eq!(
            Money::from_pence(5).checked_add(Money::from_pence(7)),
            Some(Money::from_pence(12))
        );
    }

    #[test]
    fn test_sum() {
        let total: Money = [50, 20, 20, 10]
            .into_iter()
            .map(Money::from_pence)
            .sum();
        assert_eq!(total.pence(), 100);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_pence(1).is_positive());
        assert!(Money::from_pence(-1).is_negative());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Money::from_pence(75)).unwrap();
        assert_eq!(json, "75");
    }
}
