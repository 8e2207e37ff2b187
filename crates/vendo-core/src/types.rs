//! # Domain Types
//!
//! Catalog and journal types used by the vending session.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐               ┌──────────────────────┐            │
//! │  │      Item       │   purchase    │        Sale          │            │
//! │  │  ─────────────  │  ──────────►  │  ──────────────────  │            │
//! │  │  code (A01)     │               │  id (UUID)           │            │
//! │  │  name           │               │  item code / name    │            │
//! │  │  quantity       │               │  price, inserted     │            │
//! │  │  price          │               │  change coins        │            │
//! │  └─────────────────┘               │  completed_at        │            │
//! │                                    └──────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::coin::Denomination;
use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// A product slot in the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Selection code typed by the customer, e.g. `A01`.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Units left in the slot.
    pub quantity: i64,

    /// Price in pence.
    pub price: Money,
}

impl Item {
    pub fn new(code: impl Into<String>, name: impl Into<String>, quantity: i64, price: i64) -> Self {
        Item {
            code: code.into(),
            name: name.into(),
            quantity,
            price: Money::from_pence(price),
        }
    }

    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Sale
// =============================================================================

/// Journal record of a completed purchase.
///
/// Uses the snapshot pattern: code, name and price are copied at the moment
/// of sale so restocking or renaming a slot later does not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Item code at time of sale (frozen).
    pub item_code: String,

    /// Item name at time of sale (frozen).
    pub item_name: String,

    /// Price at time of sale (frozen).
    pub price: Money,

    /// Total value of the coins the customer inserted.
    pub inserted: Money,

    /// Change owed (`inserted - price`).
    pub change_owed: Money,

    /// Coins dispensed as change, denomination → count.
    pub change: BTreeMap<u32, i64>,

    /// When the item was dispensed.
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

impl Sale {
    /// Total value of the coins dispensed.
    pub fn change_given(&self) -> Money {
        self.change
            .iter()
            .map(|(value, count)| Money::from_pence(i64::from(*value)) * *count)
            .sum()
    }

    /// Change owed that the reserve could not pay out.
    pub fn shortfall(&self) -> Money {
        self.change_owed - self.change_given()
    }

    /// Change as `1 x 10p + 1 x 2p`, largest coin first.
    pub fn change_text(&self) -> String {
        self.change
            .iter()
            .rev()
            .map(|(value, count)| match Denomination::new(i64::from(*value)) {
                Ok(denomination) => format!("{} x {}", count, denomination),
                Err(_) => format!("{} x {}p", count, value),
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// The message shown at the delivery slot.
impl fmt::Display for Sale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.change.is_empty() {
            write!(f, "Please take your: {}", self.item_name)
        } else {
            write!(
                f,
                "Please take your: {} and {} change.",
                self.item_name,
                self.change_text()
            )
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(change: &[(u32, i64)], owed: i64) -> Sale {
        Sale {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            item_code: "A01".to_string(),
            item_name: "Snacks".to_string(),
            price: Money::from_pence(100),
            inserted: Money::from_pence(100 + owed),
            change_owed: Money::from_pence(owed),
            change: change.iter().copied().collect(),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_item_stock() {
        let mut item = Item::new("A01", "Smarties", 1, 60);
        assert!(item.in_stock());
        item.quantity -= 1;
        assert!(!item.in_stock());
    }

    #[test]
    fn test_sale_message_without_change() {
        assert_eq!(sale(&[], 0).to_string(), "Please take your: Snacks");
    }

    #[test]
    fn test_sale_message_with_change() {
        let s = sale(&[(10, 1), (2, 1), (1, 1)], 13);
        assert_eq!(
            s.to_string(),
            "Please take your: Snacks and 1 x 10p + 1 x 2p + 1 x 1p change."
        );

        let s = sale(&[(200, 1), (5, 7), (1, 1)], 236);
        assert_eq!(s.change_text(), "1 x £2 + 7 x 5p + 1 x 1p");
    }

    #[test]
    fn test_sale_shortfall() {
        let s = sale(&[(5, 5), (2, 3), (1, 2)], 199);
        assert_eq!(s.change_given().pence(), 33);
        assert_eq!(s.shortfall().pence(), 166);
    }

    #[test]
    fn test_item_json_shape() {
        let item = Item::new("C02", "Coke", 50, 75);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "C02", "name": "Coke", "quantity": 50, "price": 75 })
        );
    }
}
