//! # Vending Session
//!
//! The machine itself: coin reserve, inserted coins, item catalog and the
//! journal of completed sales, all owned by one value.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         purchase("A01")                                 │
//! │                                                                         │
//! │  inserted empty? ───────────────► NoCoinsInserted                      │
//! │        │                                                                │
//! │  code unknown? ─────────────────► InvalidSelection                     │
//! │        │                                                                │
//! │  stock == 0? ───────────────────► OutOfStock                           │
//! │        │                                                                │
//! │  inserted < price? ─────────────► InsufficientFunds (coins kept)       │
//! │        │                                                                │
//! │  ──────┼──────── nothing has changed above this line ────────────────  │
//! │        ▼                                                                │
//! │  bank inserted coins into reserve                                      │
//! │  select change from the reserve (pure)                                 │
//! │  remove change coins from the reserve                                  │
//! │  stock -= 1, journal the Sale                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inserted coins are banked before change is selected, so a customer's own
//! £1 can come straight back as change. The banking step is not undone.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::inventory::CoinInventory;
use crate::money::Money;
use crate::types::{Item, Sale};
use crate::validation::{normalize_item_code, validate_item};

/// A vending machine and its in-progress transaction.
///
/// Not internally synchronized. Drivers that share one machine between
/// threads wrap it in a mutex and hold the lock for a whole purchase.
#[derive(Debug, Clone, Default)]
pub struct VendingSession {
    reserve: CoinInventory,
    inserted: CoinInventory,
    items: Vec<Item>,
    sales: Vec<Sale>,
}

impl VendingSession {
    /// Creates a machine stocked with `items` and a coin float of `money`.
    ///
    /// Unrecognized denominations in `money` are skipped. Items go through
    /// the same validation and merge rules as [`VendingSession::add_items`].
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::{Item, VendingSession};
    ///
    /// let mut machine = VendingSession::new(
    ///     vec![Item::new("A01", "Smarties", 10, 60)],
    ///     [(50u32, 2), (10, 5)],
    /// )
    /// .unwrap();
    ///
    /// machine.insert_coin(100).unwrap();
    /// let sale = machine.purchase("a01").unwrap();
    /// assert_eq!(sale.to_string(), "Please take your: Smarties and 4 x 10p change.");
    /// ```
    pub fn new<I, D>(items: Vec<Item>, money: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (D, i64)>,
        D: Into<i64>,
    {
        let mut session = VendingSession::default();
        session.add_items(items)?;
        session.add_money(money);
        Ok(session)
    }

    // =========================================================================
    // Customer operations
    // =========================================================================

    /// Accepts one coin into the current transaction.
    ///
    /// Returns the new inserted total.
    pub fn insert_coin(&mut self, denomination: i64) -> CoreResult<Money> {
        self.inserted.add_one(denomination)?;
        let total = self.inserted.total_value();
        debug!(denomination, inserted = %total, "Coin inserted");
        Ok(total)
    }

    /// Sells one unit of the item with `code`.
    ///
    /// ## Errors
    /// `NoCoinsInserted`, `InvalidSelection`, `OutOfStock` and
    /// `InsufficientFunds`, checked in that order, then `CapacityExceeded`
    /// if banking the inserted coins would overflow the reserve. None of
    /// them change anything; in particular inserted coins stay inserted.
    ///
    /// Being unable to pay out full change is not an error: the item is
    /// dispensed with whatever change the reserve can cover.
    pub fn purchase(&mut self, code: &str) -> CoreResult<Sale> {
        if self.inserted.is_empty() {
            return Err(CoreError::NoCoinsInserted);
        }

        let code = normalize_item_code(code)
            .map_err(|_| CoreError::InvalidSelection(code.trim().to_string()))?;
        let index = self
            .items
            .iter()
            .position(|item| item.code == code)
            .ok_or_else(|| CoreError::InvalidSelection(code.clone()))?;

        let item = &self.items[index];
        if !item.in_stock() {
            return Err(CoreError::OutOfStock {
                code,
                name: item.name.clone(),
            });
        }

        let inserted = self.inserted.total_value();
        if inserted < item.price {
            return Err(CoreError::InsufficientFunds {
                price: item.price,
                inserted,
            });
        }
        let change_owed = inserted - item.price;

        self.reserve.merge(&self.inserted)?;
        // Committed from here on.
        self.inserted.clear();

        let change = self.reserve.select_change_for(change_owed);
        self.reserve.remove_all(change.coins())?;

        let item = &mut self.items[index];
        item.quantity -= 1;

        if !change.is_exact() {
            warn!(
                code = %item.code,
                owed = %change_owed,
                shortfall = %change.shortfall(),
                "Reserve could not cover full change"
            );
        }

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            item_code: item.code.clone(),
            item_name: item.name.clone(),
            price: item.price,
            inserted,
            change_owed,
            change: change.coins().to_map(),
            completed_at: Utc::now(),
        };

        info!(
            sale_id = %sale.id,
            code = %sale.item_code,
            price = %sale.price,
            change = %change.dispensed(),
            "Item dispensed"
        );

        self.sales.push(sale.clone());
        Ok(sale)
    }

    /// Coin return: hands back every inserted coin.
    pub fn cancel(&mut self) -> CoinInventory {
        let returned = self.inserted.take();
        if !returned.is_empty() {
            debug!(returned = %returned.total_value(), "Inserted coins returned");
        }
        returned
    }

    // =========================================================================
    // Operator operations
    // =========================================================================

    /// Tops up the coin reserve.
    ///
    /// Entries that [`CoinInventory::add`] rejects (unrecognized
    /// denomination, non-positive quantity, overflowing total) are skipped;
    /// the rest of the batch still goes in.
    pub fn add_money<I, D>(&mut self, coins: I)
    where
        I: IntoIterator<Item = (D, i64)>,
        D: Into<i64>,
    {
        for (denomination, quantity) in coins {
            let denomination: i64 = denomination.into();
            if let Err(e) = self.reserve.add(denomination, quantity) {
                debug!(denomination, quantity, error = %e, "Skipping coins");
            }
        }
    }

    /// Restocks the catalog.
    ///
    /// Every item is validated before any is applied. An item whose code is
    /// already in the catalog adds to that slot's quantity; a new code is
    /// appended. A restock that would overflow a slot's quantity fails with
    /// `ValidationError::TooLarge` and leaves the catalog as it was.
    pub fn add_items<I>(&mut self, items: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = Item>,
    {
        let items = items
            .into_iter()
            .map(|item| validate_item(&item))
            .collect::<Result<Vec<_>, _>>()?;

        let mut catalog = self.items.clone();
        for new_item in items {
            match catalog.iter_mut().find(|i| i.code == new_item.code) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(new_item.quantity)
                        .ok_or_else(|| ValidationError::TooLarge {
                            field: "quantity".to_string(),
                        })?;
                    debug!(code = %existing.code, quantity = existing.quantity, "Item restocked");
                }
                None => {
                    debug!(code = %new_item.code, "Item added");
                    catalog.push(new_item);
                }
            }
        }
        self.items = catalog;
        Ok(())
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    /// The machine's own coins.
    pub fn reserve(&self) -> &CoinInventory {
        &self.reserve
    }

    /// Coins inserted for the current transaction.
    /// Reserve as denomination in pence -> coin count, smallest first.
    pub fn money(&self) -> BTreeMap<u32, i64> {
        self.reserve.to_map()
    }

    pub fn inserted(&self) -> &CoinInventory {
        &self.inserted
    }

    pub fn inserted_total(&self) -> Money {
        self.inserted.total_value()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Looks up an item by (un-normalized) code.
    pub fn item(&self, code: &str) -> Option<&Item> {
        let code = normalize_item_code(code).ok()?;
        self.items.iter().find(|item| item.code == code)
    }

    /// Completed sales, oldest first.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(u32, i64)]) -> BTreeMap<u32, i64> {
        pairs.iter().copied().collect()
    }

    /// One 100p item over a small float of `{1: 2, 2: 3, 5: 5}`.
    fn machine() -> VendingSession {
        VendingSession::new(
            vec![Item::new("1", "Snacks", 5, 100)],
            [(1u32, 2), (2, 3), (5, 5)],
        )
        .unwrap()
    }

    fn insert_all(machine: &mut VendingSession, coins: &[i64]) {
        for coin in coins {
            machine.insert_coin(*coin).unwrap();
        }
    }

    #[test]
    fn test_insert_coin() {
        let mut machine = machine();
        assert_eq!(machine.insert_coin(1).unwrap().pence(), 1);
        assert_eq!(machine.insert_coin(50).unwrap().pence(), 51);
        assert_eq!(machine.inserted().to_map(), map(&[(1, 1), (50, 1)]));
    }

    #[test]
    fn test_insert_invalid_coin() {
        let mut machine = machine();
        assert!(matches!(
            machine.insert_coin(7),
            Err(CoreError::InvalidCoin(7))
        ));
        assert!(machine.inserted().is_empty());
    }

    #[test]
    fn test_purchase_without_coins() {
        let mut machine = machine();
        assert!(matches!(
            machine.purchase("1"),
            Err(CoreError::NoCoinsInserted)
        ));
    }

    #[test]
    fn test_purchase_invalid_selection() {
        let mut machine = machine();
        machine.insert_coin(50).unwrap();

        assert!(matches!(
            machine.purchase("bad_code"),
            Err(CoreError::InvalidSelection(code)) if code == "BAD_CODE"
        ));
        assert!(matches!(
            machine.purchase("   "),
            Err(CoreError::InvalidSelection(_))
        ));
        assert_eq!(machine.inserted_total().pence(), 50);
    }

    #[test]
    fn test_purchase_not_enough_money_keeps_coins() {
        let mut machine = machine();
        machine.insert_coin(50).unwrap();
        let reserve_before = machine.reserve().clone();

        let err = machine.purchase("1").unwrap_err();
        assert_eq!(err.to_string(), "Not enough money! Price £1.00, inserted £0.50");
        assert_eq!(machine.inserted_total().pence(), 50);
        assert_eq!(machine.reserve(), &reserve_before);
        assert_eq!(machine.item("1").unwrap().quantity, 5);

        machine.insert_coin(50).unwrap();
        let sale = machine.purchase("1").unwrap();
        assert_eq!(sale.to_string(), "Please take your: Snacks");
    }

    #[test]
    fn test_purchase_out_of_stock() {
        let mut machine =
            VendingSession::new(vec![Item::new("1", "Snacks", 0, 100)], [(1u32, 2)]).unwrap();
        machine.insert_coin(100).unwrap();

        let err = machine.purchase("1").unwrap_err();
        assert_eq!(err.to_string(), "Snacks: Out of stock!");
        assert_eq!(machine.inserted_total().pence(), 100);
        assert_eq!(machine.reserve().to_map(), map(&[(1, 2)]));
    }

    #[test]
    fn test_purchase_with_change() {
        let mut machine = machine();
        insert_all(&mut machine, &[50, 50, 10, 2, 1]);

        let sale = machine.purchase("1").unwrap();
        assert_eq!(
            sale.to_string(),
            "Please take your: Snacks and 1 x 10p + 1 x 2p + 1 x 1p change."
        );
        assert_eq!(sale.change_owed.pence(), 13);
        assert_eq!(sale.shortfall(), Money::zero());
    }

    #[test]
    fn test_purchase_banks_inserted_coins() {
        let mut machine = machine();
        insert_all(&mut machine, &[50, 100]);

        machine.purchase("1").unwrap();

        assert_eq!(machine.reserve().to_map(), map(&[(1, 2), (2, 3), (5, 5), (100, 1)]));
        assert!(machine.inserted().is_empty());
        assert_eq!(machine.item("1").unwrap().quantity, 4);
    }

    #[test]
    fn test_purchase_resets_inserted_coins() {
        let mut machine = machine();
        insert_all(&mut machine, &[50, 20, 20, 10]);
        assert_eq!(machine.inserted().to_map(), map(&[(10, 1), (20, 2), (50, 1)]));

        machine.purchase("1").unwrap();
        assert!(machine.inserted().to_map().is_empty());
    }

    #[test]
    fn test_purchase_change_from_post_merge_reserve() {
        let mut machine = machine();
        machine.insert_coin(200).unwrap();

        let sale = machine.purchase("1").unwrap();

        // 100p owed; the banked £2 is too large, the float covers 33p.
        assert_eq!(sale.change, map(&[(1, 2), (2, 3), (5, 5)]));
        assert_eq!(sale.shortfall().pence(), 67);
        assert_eq!(machine.reserve().to_map(), map(&[(200, 1)]));
    }

    #[test]
    fn test_purchase_not_enough_coins_in_machine() {
        let mut machine = machine();
        machine
            .add_items([Item::new("2", "Cookies", 5, 1)])
            .unwrap();
        machine.insert_coin(200).unwrap();

        let sale = machine.purchase("2").unwrap();
        assert_eq!(
            sale.to_string(),
            "Please take your: Cookies and 5 x 5p + 3 x 2p + 2 x 1p change."
        );
        assert_eq!(machine.reserve().to_map(), map(&[(200, 1)]));
    }

    #[test]
    fn test_purchase_change_scenarios() {
        let cases: &[(i64, &[i64], &[(u32, i64)], &[(u32, i64)])] = &[
            (8, &[20], &[(5, 3), (2, 10), (1, 5)], &[(5, 2), (2, 1)]),
            (11, &[20], &[(10, 1), (1, 10)], &[(1, 9)]),
            (65, &[200], &[(20, 10), (10, 5), (5, 5)], &[(20, 6), (10, 1), (5, 1)]),
            (80, &[100, 100], &[(20, 1)], &[(100, 1), (20, 1)]),
            (90, &[100], &[(5, 2)], &[(5, 2)]),
            (
                164,
                &[200, 100, 50, 50],
                &[(5, 10), (2, 5), (1, 5)],
                &[(200, 1), (5, 7), (1, 1)],
            ),
            (
                181,
                &[200, 200],
                &[(5, 10), (2, 1), (1, 5)],
                &[(200, 1), (5, 3), (2, 1), (1, 2)],
            ),
        ];

        for (price, inserted, float, expected) in cases {
            let name = format!("Item_{}", price);
            let mut machine = VendingSession::new(
                vec![Item::new("2", name.as_str(), 5, *price)],
                float.iter().copied(),
            )
            .unwrap();
            insert_all(&mut machine, inserted);

            let sale = machine.purchase("2").unwrap();
            assert_eq!(sale.change, map(expected), "price {}p", price);
            assert!(sale.shortfall().is_zero(), "price {}p", price);
        }
    }

    #[test]
    fn test_purchase_records_sale() {
        let mut machine = machine();
        machine.insert_coin(100).unwrap();
        machine.insert_coin(5).unwrap();

        let sale = machine.purchase("1").unwrap();

        assert_eq!(machine.sales().len(), 1);
        assert_eq!(machine.sales()[0], sale);
        assert_eq!(sale.item_code, "1");
        assert_eq!(sale.inserted.pence(), 105);
        assert_eq!(sale.change, map(&[(5, 1)]));
        assert!(uuid::Uuid::parse_str(&sale.id).is_ok());
    }

    #[test]
    fn test_cancel_returns_coins() {
        let mut machine = machine();
        insert_all(&mut machine, &[20, 20, 5]);

        let returned = machine.cancel();
        assert_eq!(returned.total_value().pence(), 45);
        assert!(machine.inserted().is_empty());
        assert_eq!(machine.reserve().to_map(), map(&[(1, 2), (2, 3), (5, 5)]));
        assert!(machine.cancel().is_empty());
    }

    #[test]
    fn test_add_money() {
        let mut machine = machine();
        machine.add_money([(1u32, 5), (5, 5), (10, 3), (200, 1)]);
        assert_eq!(
            machine.reserve().to_map(),
            map(&[(1, 7), (2, 3), (5, 10), (10, 3), (200, 1)])
        );
    }

    #[test]
    fn test_add_money_skips_invalid() {
        let mut machine = machine();
        machine.add_money([(7u32, 3), (15, 1), (10, 0), (10, -2)]);
        assert_eq!(machine.reserve().to_map(), map(&[(1, 2), (2, 3), (5, 5)]));
    }

    #[test]
    fn test_add_money_skips_overflowing_entries() {
        let mut machine = machine();
        machine.add_money([(200u32, i64::MAX / 100), (10, 1)]);

        assert_eq!(
            machine.reserve().to_map(),
            map(&[(1, 2), (2, 3), (5, 5), (10, 1)])
        );
        assert_eq!(machine.reserve().total_value(), Money::from_pence(43));
    }

    #[test]
    fn test_purchase_refused_when_reserve_would_overflow() {
        let mut machine = machine();
        machine.add_money([(1u32, i64::MAX - 100)]);
        insert_all(&mut machine, &[200]);
        let reserve = machine.reserve().clone();

        let err = machine.purchase("1").unwrap_err();

        assert!(matches!(err, CoreError::CapacityExceeded { .. }));
        assert_eq!(machine.inserted_total(), Money::from_pence(200));
        assert_eq!(machine.reserve(), &reserve);
        assert_eq!(machine.item("1").unwrap().quantity, 5);
        assert!(machine.sales().is_empty());
    }

    #[test]
    fn test_money_view_follows_purchases() {
        let mut machine = machine();
        assert_eq!(machine.money(), map(&[(1, 2), (2, 3), (5, 5)]));

        insert_all(&mut machine, &[100, 5]);
        machine.purchase("1").unwrap();

        assert_eq!(machine.money(), map(&[(1, 2), (2, 3), (5, 5), (100, 1)]));
    }

    #[test]
    fn test_add_money_nothing() {
        let mut machine = machine();
        machine.add_money(Vec::<(u32, i64)>::new());
        assert_eq!(machine.reserve().to_map(), map(&[(1, 2), (2, 3), (5, 5)]));
    }

    #[test]
    fn test_add_new_item() {
        let mut machine = machine();
        machine
            .add_items([Item::new("new", "New", 1, 50)])
            .unwrap();
        assert_eq!(machine.items().last().unwrap().code, "NEW");
    }

    #[test]
    fn test_add_items_accumulates() {
        let mut machine = machine();
        machine.add_items([Item::new("1", "Snacks", 5, 100)]).unwrap();
        assert_eq!(machine.item("1").unwrap().quantity, 10);

        machine.add_items([Item::new("1", "Snacks", 5, 100)]).unwrap();
        assert_eq!(machine.item("1").unwrap().quantity, 15);
        assert_eq!(machine.items().len(), 1);
    }

    #[test]
    fn test_add_items_rejects_batch_atomically() {
        let mut machine = machine();
        let result = machine.add_items([
            Item::new("A01", "Fine", 1, 50),
            Item::new("A02", "", 1, 50),
        ]);

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(machine.items().len(), 1);
    }

    #[test]
    fn test_restock_overflow_rejected() {
        let mut machine = machine();
        let result = machine.add_items([
            Item::new("A01", "Fine", 1, 50),
            Item::new("1", "Snacks", i64::MAX, 100),
        ]);

        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::TooLarge { .. }))
        ));
        assert_eq!(machine.items().len(), 1);
        assert_eq!(machine.item("1").unwrap().quantity, 5);
    }

    #[test]
    fn test_item_lookup_normalizes() {
        let machine = VendingSession::new(
            vec![Item::new("a01", "Smarties", 10, 60)],
            Vec::<(u32, i64)>::new(),
        )
        .unwrap();

        assert_eq!(machine.item(" A01 ").unwrap().name, "Smarties");
        assert!(machine.item("A02").is_none());
    }
}
