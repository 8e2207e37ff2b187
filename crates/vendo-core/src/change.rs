//! # Change Selection
//!
//! Chooses which coins to hand back as change, using only coins the reserve
//! actually holds.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Candidates: denomination ≤ target, quantity > 0                    │
//! │  2. Sort candidates largest denomination first                         │
//! │  3. For each candidate:                                                │
//! │       take = min(remaining / denomination, available)                  │
//! │       remaining -= take × denomination                                 │
//! │  4. Keep the accumulated set whenever remaining hits a new low         │
//! │  5. Stop as soon as remaining == 0                                     │
//! │                                                                         │
//! │  Example: reserve {£2:2, 5p:11, 2p:5, 1p:5}, owe £2.36                 │
//! │     £2 ×1  → 36p left                                                  │
//! │     5p ×7  →  1p left                                                  │
//! │     2p ×0  →  skipped                                                  │
//! │     1p ×1  →  0p left ✓                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With limited coin quantities greedy descent may never reach zero. The
//! best partial set found is returned and the difference is reported as
//! [`Change::shortfall`]. This is a linear heuristic, not an exhaustive
//! subset-sum search.

use crate::coin::Denomination;
use crate::inventory::CoinInventory;
use crate::money::Money;

/// Result of change selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    coins: CoinInventory,
    target: Money,
}

impl Change {
    /// Coins to dispense.
    pub fn coins(&self) -> &CoinInventory {
        &self.coins
    }

    /// Amount that was owed.
    pub fn target(&self) -> Money {
        self.target
    }

    /// Value of the selected coins.
    pub fn dispensed(&self) -> Money {
        self.coins.total_value()
    }

    /// Owed amount the reserve could not cover.
    pub fn shortfall(&self) -> Money {
        self.target - self.dispensed()
    }

    /// True when the selected coins add up to exactly the target.
    pub fn is_exact(&self) -> bool {
        self.shortfall().is_zero()
    }
}

/// Selects change for `target` from `entries` (denomination, available).
///
/// Has no side effects. A non-positive target yields an empty, exact result.
///
/// ## Example
/// ```rust
/// use vendo_core::change::compute_change;
/// use vendo_core::{CoinInventory, Money};
///
/// // 10p would overshoot 9p, so nine 1p coins are used.
/// let reserve = CoinInventory::from_seed([(10u32, 1), (1, 10)]);
/// let change = compute_change(reserve.iter(), Money::from_pence(9));
///
/// assert!(change.is_exact());
/// assert_eq!(change.coins().coin_count(), 9);
/// ```
pub fn compute_change<I>(entries: I, target: Money) -> Change
where
    I: IntoIterator<Item = (Denomination, i64)>,
{
    let target = target.max(Money::zero());
    let owed = target.pence();

    let mut candidates: Vec<(Denomination, i64)> = entries
        .into_iter()
        .filter(|(denomination, available)| {
            *available > 0 && i64::from(denomination.value()) <= owed
        })
        .collect();
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    let mut accumulated = CoinInventory::new();
    let mut best = CoinInventory::new();
    let mut remaining = owed;
    let mut best_remaining = owed;

    for (denomination, available) in candidates {
        if remaining == 0 {
            break;
        }

        let value = i64::from(denomination.value());
        let take = (remaining / value).min(available);
        if take == 0 {
            continue;
        }

        remaining -= take * value;
        accumulated.deposit(denomination, take);

        if remaining < best_remaining {
            best = accumulated.clone();
            best_remaining = remaining;
        }
    }

    Change {
        coins: best,
        target,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
