//! # State Module
//!
//! Holds what the terminal driver keeps between input lines.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │     MachineConfig        │        │       MachineState           │  │
//! │  │                          │ build  │                              │  │
//! │  │  VENDO_SEED ──► seed     │───────►│  Arc<Mutex<VendingSession>>  │  │
//! │  │  (or built-in catalog)   │        │                              │  │
//! │  └──────────────────────────┘        └──────────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • MachineConfig: read-only after load                                 │
//! │  • MachineState: one lock per command, held for the whole purchase     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod machine;

pub use config::{ConfigError, MachineConfig, MachineSeed, SEED_ENV_VAR};
pub use machine::MachineState;
