//! # vendo-core: Pure Business Logic for a Coin-Operated Vending Machine
//!
//! This crate is the **heart** of Vendo. It holds the coin reserve, the
//! change-making algorithm and the purchase rules as plain values with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Vendo Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vendo-cli (Terminal)                         │   │
//! │  │    i 50 ──► b A01 ──► "Please take your: ... change."          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vendo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   coin    │  │ inventory │  │  change   │  │  session  │  │   │
//! │  │   │Denominat. │  │CoinInvent.│  │ greedy +  │  │ purchase  │  │   │
//! │  │   │  Money    │  │ add/remove│  │ best-left │  │ catalog   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO TERMINAL                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer pence arithmetic
//! - [`coin`] - Recognized denominations
//! - [`inventory`] - Coin inventory (reserve and inserted coins)
//! - [`change`] - Change selection
//! - [`types`] - Items and sale records
//! - [`session`] - The vending machine
//! - [`validation`] - Item input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use vendo_core::{CoinInventory, Money};
//!
//! // Reserve with plenty of 5p but only a few 2p and 1p coins
//! let reserve = CoinInventory::from_seed([(200u32, 2), (5, 11), (2, 5), (1, 5)]);
//!
//! let change = reserve.select_change_for(Money::from_pence(236));
//! assert!(change.is_exact());
//! assert_eq!(change.coins().to_map(), BTreeMap::from([(1, 1), (5, 7), (200, 1)]));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod change;
pub mod coin;
pub mod error;
pub mod inventory;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use change::Change;
pub use coin::{Denomination, VALID_DENOMINATIONS};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use inventory::CoinInventory;
pub use money::Money;
pub use session::VendingSession;
pub use types::*;
