//! # CLI Error Type
//!
//! Unified error type for terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vendo                                  │
//! │                                                                         │
//! │  "b Z99" ──► Command::Buy ──► session.purchase()                       │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                      CoreError::InvalidSelection                        │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                      CliError::Core ──► "[PURCHASE] Invalid ..."       │
//! │                                                                         │
//! │  Every error is printed and the loop continues. Only startup errors    │
//! │  (config, terminal I/O) end the process.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::io;

use thiserror::Error;
use vendo_core::{CoreError, ErrorKind};

use crate::state::ConfigError;

/// Errors surfaced by the terminal driver.
#[derive(Debug, Error)]
pub enum CliError {
    /// Business outcome or input error from the machine.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Seed file or environment problem.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input line is not a known command.
    #[error("Unknown command '{0}' (h for help)")]
    UnknownCommand(String),

    /// A command was given a missing or malformed argument.
    #[error("{0}")]
    BadArgument(String),

    /// Terminal read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Error codes printed in front of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Coin or argument rejected (bad coin, bad number, unknown command)
    InvalidInput,

    /// Purchase refused (no coins, bad selection, out of stock, funds)
    Purchase,

    /// Item data rejected
    ValidationError,

    /// Configuration could not be loaded
    Config,

    /// Contract violation or I/O failure
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::Purchase => "PURCHASE",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
}

impl CliError {
    /// Machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Core(e) => match e.kind() {
                ErrorKind::InvalidInput => ErrorCode::InvalidInput,
                ErrorKind::Purchase => ErrorCode::Purchase,
                ErrorKind::Validation => ErrorCode::ValidationError,
                ErrorKind::Contract => ErrorCode::Internal,
            },
            CliError::Config(_) => ErrorCode::Config,
            CliError::UnknownCommand(_) | CliError::BadArgument(_) => ErrorCode::InvalidInput,
            CliError::Io(_) => ErrorCode::Internal,
        }
    }

    /// The line shown to the customer, e.g. `[PURCHASE] Please insert coins`.
    pub fn user_message(&self) -> String {
        if let CliError::Core(CoreError::InsufficientCoins { .. }) = self {
            // Log the actual error but show a generic message
            tracing::error!(error = %self, "Coin reserve contract violated");
            return format!("[{}] Machine error, please call an operator", self.code());
        }
        format!("[{}] {}", self.code(), self)
    }
}

/// Convenience type alias for Results with CliError.
pub type CliResult<T> = Result<T, CliError>;
