//! # Terminal Commands
//!
//! One input line is one command.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  "i 50" ──► Command::from_str ──► Command::Insert(50)                  │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                         execute(&state, command)                        │
//! │                                          │                              │
//! │                     state.with_machine_mut(|m| m.insert_coin(50))       │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                  Outcome::Message("Inserted 50p, total £0.50")          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use tracing::debug;
use vendo_core::{CoinInventory, Denomination, Item, VendingSession};

use crate::error::{CliError, CliResult};
use crate::state::MachineState;

/// Help text printed on startup and for `h`.
pub const HELP: &str = "\
Commands:
  i <pence>   insert a coin (1, 2, 5, 10, 20, 50, 100, 200)
  b <code>    buy the item with that code
  c           cancel and return inserted coins
  s           show machine status
  h           show this help
  q           quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(i64),
    Buy(String),
    Cancel,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        if parts.next().is_some() {
            return Err(CliError::BadArgument(format!("Too many arguments: {}", line.trim())));
        }

        let no_arg = |command: Command| match arg {
            None => Ok(command),
            Some(extra) => Err(CliError::BadArgument(format!(
                "'{}' takes no argument, got '{}'",
                verb, extra
            ))),
        };

        match verb.as_str() {
            "i" | "insert" => {
                let value = arg.ok_or_else(|| {
                    CliError::BadArgument("Usage: i <pence>".to_string())
                })?;
                value
                    .parse()
                    .map(Command::Insert)
                    .map_err(|_| CliError::BadArgument(format!("Not a number: {}", value)))
            }
            "b" | "buy" => arg
                .map(|code| Command::Buy(code.to_string()))
                .ok_or_else(|| CliError::BadArgument("Usage: b <code>".to_string())),
            "c" | "cancel" => no_arg(Command::Cancel),
            "s" | "status" => no_arg(Command::Status),
            "h" | "help" | "?" => no_arg(Command::Help),
            "q" | "quit" | "exit" => no_arg(Command::Quit),
            other => Err(CliError::UnknownCommand(other.to_string())),
        }
    }
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to show the customer.
    Message(String),
    /// Leave the command loop.
    Quit,
}

/// Runs one command against the machine.
pub fn execute(state: &MachineState, command: Command) -> CliResult<Outcome> {
    debug!(?command, "execute");

    let message = match command {
        Command::Insert(pence) => {
            let total = state.with_machine_mut(|m| m.insert_coin(pence))?;
            let coin = Denomination::new(pence)?;
            format!("Inserted {}, total {}", coin, total)
        }
        Command::Buy(code) => {
            let sale = state.with_machine_mut(|m| m.purchase(&code))?;
            sale.to_string()
        }
        Command::Cancel => {
            let returned = state.with_machine_mut(|m| m.cancel());
            if returned.is_empty() {
                "Nothing to return".to_string()
            } else {
                format!("Returned: {}", coins_text(&returned))
            }
        }
        Command::Status => state.with_machine(render_status),
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Message(message))
}

/// Coins largest first, e.g. `1 x £2 + 3 x 5p`.
pub fn coins_text(coins: &CoinInventory) -> String {
    coins
        .iter_desc()
        .map(|(denomination, quantity)| format!("{} x {}", quantity, denomination))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Machine status screen.
///
/// ```text
/// Inserted: £0.70 (1 x 50p + 1 x 20p)
/// Reserve:  £29.90 (5 x £2 + ...)
/// Items:
///   A01  Smarties                    £0.60   10 left
///   B06  Cheese and Onion Crisps     £0.67   SOLD OUT
/// ```
pub fn render_status(machine: &VendingSession) -> String {
    let mut lines = vec![
        format!(
            "Inserted: {}{}",
            machine.inserted_total(),
            bracketed(machine.inserted())
        ),
        format!(
            "Reserve:  {}{}",
            machine.reserve().total_value(),
            bracketed(machine.reserve())
        ),
        "Items:".to_string(),
    ];
    lines.extend(machine.items().iter().map(item_line));
    lines.join("\n")
}

fn bracketed(coins: &CoinInventory) -> String {
    if coins.is_empty() {
        String::new()
    } else {
        format!(" ({})", coins_text(coins))
    }
}

fn item_line(item: &Item) -> String {
    let stock = if item.in_stock() {
        format!("{} left", item.quantity)
    } else {
        "SOLD OUT".to_string()
    };
    format!(
        "  {:<4} {:<27} {:>6}   {}",
        item.code,
        item.name,
        item.price.to_string(),
        stock
    )
}
