//! # Coin Inventory
//!
//! A bag of coins keyed by denomination. The machine owns two of these: the
//! **reserve** (its own money, used for change) and the **inserted** coins of
//! the transaction in progress.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  • Every key is a valid Denomination (enforced by the type)            │
//! │  • One entry per denomination (BTreeMap key)                           │
//! │  • Every stored quantity is > 0 (zero entries are compacted away)      │
//! │  • total_value() = Σ denomination × quantity, never negative           │
//! │  • total_value() always fits in Money: coins that would overflow it    │
//! │    are rejected with CapacityExceeded before anything changes          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::change::{compute_change, Change};
use crate::coin::Denomination;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_quantity;

/// Coins held by the machine or inserted by a customer.
///
/// Serializes as a `{ "denomination": quantity }` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CoinInventory {
    coins: BTreeMap<Denomination, i64>,
}

impl CoinInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from a denomination → quantity mapping.
    ///
    /// Entries that [`CoinInventory::add`] would reject (unrecognized
    /// denominations, non-positive quantities, overflowing totals) are
    /// dropped without error, so a seed file with a stray `7 => 3` still
    /// loads.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::CoinInventory;
    ///
    /// let reserve = CoinInventory::from_seed([(10u32, 1), (1, 10), (7, 3)]);
    /// assert_eq!(reserve.total_value().pence(), 20);
    /// ```
    pub fn from_seed<I, D>(seed: I) -> Self
    where
        I: IntoIterator<Item = (D, i64)>,
        D: Into<i64>,
    {
        let mut inventory = Self::new();
        for (value, quantity) in seed {
            let value: i64 = value.into();
            if let Err(e) = inventory.add(value, quantity) {
                debug!(value, quantity, error = %e, "Skipping seed entry");
            }
        }
        inventory
    }

    /// Adds `quantity` coins of `denomination`.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity <= 0` (checked first)
    /// - `InvalidCoin` if the value is not a recognized coin
    /// - `CapacityExceeded` if the total value would overflow
    ///
    /// Nothing changes when an error is returned.
    pub fn add(&mut self, denomination: i64, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity).map_err(|_| CoreError::InvalidQuantity(quantity))?;
        let denomination = Denomination::new(denomination)?;
        Self::total_after(self.total_value(), denomination, quantity)?;
        self.deposit(denomination, quantity);
        Ok(())
    }

    /// Adds a single coin.
    pub fn add_one(&mut self, denomination: i64) -> CoreResult<()> {
        self.add(denomination, 1)
    }

    /// Adds already-validated coins.
    ///
    /// `quantity` must be positive and the caller must know the total stays
    /// in range, e.g. because the coins were taken from another inventory.
    pub(crate) fn deposit(&mut self, denomination: Denomination, quantity: i64) {
        debug_assert!(quantity > 0);
        *self.coins.entry(denomination).or_insert(0) += quantity;
    }

    /// `total + denomination × quantity`, or `CapacityExceeded`.
    fn total_after(
        total: Money,
        denomination: Denomination,
        quantity: i64,
    ) -> CoreResult<Money> {
        denomination
            .as_money()
            .checked_mul(quantity)
            .and_then(|added| total.checked_add(added))
            .ok_or(CoreError::CapacityExceeded {
                denomination: denomination.value(),
                quantity,
            })
    }

    /// Removes `quantity` coins of `denomination`.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `InsufficientCoins` if fewer than `quantity` coins are held
    pub fn remove(&mut self, denomination: Denomination, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity).map_err(|_| CoreError::InvalidQuantity(quantity))?;
        let available = self.quantity_of(denomination);
        if available < quantity {
            return Err(CoreError::InsufficientCoins {
                denomination: denomination.value(),
                available,
                requested: quantity,
            });
        }
        self.store(denomination, available - quantity);
        Ok(())
    }

    /// Removes every coin in `coins` (typically a change set).
    ///
    /// All denominations are checked before anything is removed, so on
    /// `InsufficientCoins` the inventory is unchanged.
    pub fn remove_all(&mut self, coins: &CoinInventory) -> CoreResult<()> {
        for (denomination, requested) in coins.iter() {
            let available = self.quantity_of(denomination);
            if available < requested {
                return Err(CoreError::InsufficientCoins {
                    denomination: denomination.value(),
                    available,
                    requested,
                });
            }
        }
        for (denomination, requested) in coins.iter() {
            let left = self.quantity_of(denomination) - requested;
            self.store(denomination, left);
        }
        Ok(())
    }

    /// Adds every coin of `other` into `self`. `other` is left as it was.
    ///
    /// On `CapacityExceeded` neither inventory changes.
    pub fn merge(&mut self, other: &CoinInventory) -> CoreResult<()> {
        let mut total = self.total_value();
        for (denomination, quantity) in other.iter() {
            total = Self::total_after(total, denomination, quantity)?;
        }
        for (denomination, quantity) in other.iter() {
            self.deposit(denomination, quantity);
        }
        Ok(())
    }

    /// Sets the count for a denomination outright. Zero removes the entry.
    pub fn set_quantity(&mut self, denomination: Denomination, quantity: i64) -> CoreResult<()> {
        if quantity < 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        let others = self.total_value() - denomination.as_money() * self.quantity_of(denomination);
        Self::total_after(others, denomination, quantity)?;
        self.store(denomination, quantity);
        Ok(())
    }

    fn store(&mut self, denomination: Denomination, quantity: i64) {
        if quantity == 0 {
            self.coins.remove(&denomination);
        } else {
            self.coins.insert(denomination, quantity);
        }
    }

    /// Number of coins held for `denomination` (0 if none).
    pub fn quantity_of(&self, denomination: Denomination) -> i64 {
        self.coins.get(&denomination).copied().unwrap_or(0)
    }

    /// Σ denomination × quantity. Cannot overflow: every way of adding coins
    /// checks the new total first.
    pub fn total_value(&self) -> Money {
        self.iter()
            .map(|(denomination, quantity)| denomination.as_money() * quantity)
            .sum()
    }

    /// Orders two inventories by what they are worth, not by their coins.
    pub fn compare_worth(&self, other: &CoinInventory) -> Ordering {
        self.total_value().cmp(&other.total_value())
    }

    /// Total number of physical coins.
    pub fn coin_count(&self) -> i64 {
        self.coins.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Drops every coin.
    pub fn clear(&mut self) {
        self.coins.clear();
    }

    /// Moves every coin out, leaving this inventory empty.
    pub fn take(&mut self) -> CoinInventory {
        std::mem::take(self)
    }

    /// Entries, smallest denomination first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Denomination, i64)> + '_ {
        self.coins.iter().map(|(d, q)| (*d, *q))
    }

    /// Entries, largest denomination first.
    pub fn iter_desc(&self) -> impl Iterator<Item = (Denomination, i64)> + '_ {
        self.iter().rev()
    }

    /// Plain denomination → quantity view for display and comparisons.
    pub fn to_map(&self) -> BTreeMap<u32, i64> {
        self.iter().map(|(d, q)| (d.value(), q)).collect()
    }

    /// Picks coins from this inventory to pay out `target` as change.
    ///
    /// Pure: the inventory is not touched. Callers that accept the result
    /// remove it with [`CoinInventory::remove_all`].
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::{CoinInventory, Money};
    ///
    /// let reserve = CoinInventory::from_seed([(5u32, 3), (2, 10), (1, 5)]);
    /// let change = reserve.select_change_for(Money::from_pence(13));
    ///
    /// assert!(change.is_exact());
    /// assert_eq!(change.coins().coin_count(), 4); // 5p + 5p + 2p + 1p
    /// ```
    pub fn select_change_for(&self, target: Money) -> Change {
        compute_change(self.iter(), target)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
