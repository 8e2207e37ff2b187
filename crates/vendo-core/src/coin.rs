//! # Coin Denominations
//!
//! The closed set of coin values the machine recognizes, and the
//! [`Denomination`] newtype that can only hold one of them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   1p   2p   5p   10p   20p   50p   £1   £2                              │
//! │                                                                         │
//! │   Anything else (7p, 15p, notes, foreign coins) is rejected at the     │
//! │   slot with CoreError::InvalidCoin.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Recognized coin values in pence, smallest first.
pub const VALID_DENOMINATIONS: [u32; 8] = [1, 2, 5, 10, 20, 50, 100, 200];

/// A coin face value in pence, guaranteed to be in [`VALID_DENOMINATIONS`].
///
/// Ordered by value, so a `BTreeMap<Denomination, _>` iterates smallest
/// first and `.rev()` gives the largest-first order change selection needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Denomination(u32);

impl Denomination {
    /// Validates a raw value.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::coin::Denomination;
    ///
    /// assert_eq!(Denomination::new(50).unwrap().value(), 50);
    /// assert!(Denomination::new(7).is_err());
    /// assert!(Denomination::new(-1).is_err());
    /// ```
    pub fn new(value: i64) -> CoreResult<Self> {
        u32::try_from(value)
            .ok()
            .filter(|v| VALID_DENOMINATIONS.contains(v))
            .map(Denomination)
            .ok_or(CoreError::InvalidCoin(value))
    }

    /// Returns true if `value` is a recognized coin.
    #[inline]
    pub fn is_valid(value: i64) -> bool {
        Self::new(value).is_ok()
    }

    /// Returns the face value in pence.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Face value as money.
    #[inline]
    pub fn as_money(&self) -> Money {
        Money::from_pence(i64::from(self.0))
    }

    /// Every recognized denomination, smallest first.
    pub fn all() -> impl DoubleEndedIterator<Item = Denomination> {
        VALID_DENOMINATIONS.into_iter().map(Denomination)
    }
}

/// `50p` below a pound, `£1` / `£2` from a pound up.
impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 100 {
            write!(f, "£{}", self.0 / 100)
        } else {
            write!(f, "{}p", self.0)
        }
    }
}

impl TryFrom<i64> for Denomination {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Denomination::new(value)
    }
}

impl From<Denomination> for u32 {
    fn from(d: Denomination) -> Self {
        d.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
