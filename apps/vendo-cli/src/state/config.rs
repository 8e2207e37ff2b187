//! # Machine Configuration
//!
//! What the machine is stocked with when the terminal starts.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variable `VENDO_SEED`: path to a JSON seed file
//! 2. Built-in catalog and coin float (this file)
//!
//! ## Seed File Format
//! ```json
//! {
//!   "items": [
//!     { "code": "A01", "name": "Smarties", "quantity": 10, "price": 60 }
//!   ],
//!   "money": { "200": 5, "100": 10, "5": 20, "1": 50 }
//! }
//! ```
//! Prices and denominations are in pence. Either key may be left out.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;
use vendo_core::{CoreResult, Item, VendingSession};

/// Environment variable naming the seed file.
pub const SEED_ENV_VAR: &str = "VENDO_SEED";

/// Initial stock: catalog plus coin float.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineSeed {
    #[serde(default)]
    pub items: Vec<Item>,

    /// Denomination in pence -> number of coins.
    #[serde(default)]
    pub money: BTreeMap<u32, i64>,
}

impl MachineSeed {
    /// Parses a seed from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidSeed(e.to_string()))
    }

    /// Reads and parses a seed file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// The stock a freshly installed machine ships with.
    pub fn builtin() -> Self {
        let items = [
            ("A01", "Smarties", 10, 60),
            ("A02", "Caramac Bar", 5, 60),
            ("A03", "Dairy Milk", 1, 65),
            ("A04", "Freddo", 1, 25),
            ("A05", "Crunchie", 10, 70),
            ("A06", "Starbar", 1, 99),
            ("A07", "Snickers", 7, 89),
            ("A08", "Yorkie", 20, 87),
            ("A09", "Toblerone", 1, 199),
            ("A10", "Flake", 10, 27),
            ("B01", "Ready Salted Crisps", 7, 55),
            ("B02", "Sweet Chilli Crisps", 12, 120),
            ("B03", "Smoky Barbecue Crisps", 10, 65),
            ("B04", "Salt and Vinegar Crisps", 5, 60),
            ("B05", "Roast Chicken Crisps", 10, 59),
            ("B06", "Cheese and Onion Crisps", 0, 67),
            ("B07", "Prawn Cocktail Crisps", 10, 77),
            ("B08", "Thai Sweet Chicken Crisps", 10, 88),
            ("B09", "Flamed Steak Crisps", 10, 43),
            ("C02", "Coke", 50, 75),
            ("C03", "Diet Coke", 50, 75),
            ("C04", "Coke Zero", 0, 75),
            ("C05", "Dandelion and Burdock", 10, 68),
            ("C06", "Cream Soda", 5, 69),
            ("C07", "Irn Bru", 3, 79),
            ("C08", "Cherry Coke", 1, 75),
            ("C09", "Orange Soda", 10, 79),
            ("D01", "Parma Violets", 10, 127),
            ("D02", "Refresher Chews", 10, 427),
        ]
        .into_iter()
        .map(|(code, name, quantity, price)| Item::new(code, name, quantity, price))
        .collect();

        let money = BTreeMap::from([
            (1, 50),
            (2, 20),
            (5, 20),
            (10, 10),
            (20, 10),
            (50, 10),
            (100, 10),
            (200, 5),
        ]);

        MachineSeed { items, money }
    }
}

/// Startup configuration for the terminal.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Seed file, if one was configured.
    pub seed_path: Option<PathBuf>,

    pub seed: MachineSeed,
}

impl MachineConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let seed_path = match env::var(SEED_ENV_VAR) {
            Ok(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(SEED_ENV_VAR.to_string()))
            }
            Ok(path) => Some(PathBuf::from(path)),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidValue(SEED_ENV_VAR.to_string()))
            }
        };
        Self::from_seed_path(seed_path)
    }

    /// Builds the configuration from an optional seed file.
    pub fn from_seed_path(seed_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let seed = match &seed_path {
            Some(path) => MachineSeed::from_file(path)?,
            None => MachineSeed::builtin(),
        };

        info!(
            seed = ?seed_path,
            items = seed.items.len(),
            denominations = seed.money.len(),
            "Machine configuration loaded"
        );

        Ok(MachineConfig { seed_path, seed })
    }

    /// Creates a vending session stocked from the seed.
    ///
    /// Invalid items fail the whole seed; unrecognized coins are skipped.
    pub fn build_session(&self) -> CoreResult<VendingSession> {
        VendingSession::new(self.seed.items.clone(), self.seed.money.clone())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            seed_path: None,
            seed: MachineSeed::builtin(),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Cannot read seed file {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),
}
