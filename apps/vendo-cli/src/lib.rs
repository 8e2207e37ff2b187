//! # Vendo Terminal Driver
//!
//! Drives one vending machine from a line-oriented terminal.
//!
//! ## Module Structure
//! ```text
//! src/
//! ├── main.rs           ◄─── Binary entry (calls run())
//! ├── lib.rs            ◄─── You are here (startup + command loop)
//! ├── error.rs          ◄─── CliError, ErrorCode
//! ├── commands/
//! │   └── mod.rs        ◄─── Command parsing and execution
//! └── state/
//!     ├── mod.rs        ◄─── State exports
//!     ├── machine.rs    ◄─── MachineState (Arc<Mutex<VendingSession>>)
//!     └── config.rs     ◄─── MachineConfig, seed file
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Startup Sequence                                     │
//! │                                                                         │
//! │  1. init_tracing()          ── RUST_LOG or "info,vendo=debug"          │
//! │  2. MachineConfig::load()   ── VENDO_SEED or built-in catalog          │
//! │  3. config.build_session()  ── items validated, coin float loaded      │
//! │  4. run_loop(stdin, stdout) ── until `q` or end of input               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::{execute, Command, Outcome, HELP};
use error::CliResult;
use state::{MachineConfig, MachineState};

/// Starts the terminal on stdin/stdout.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Vendo v{}", env!("CARGO_PKG_VERSION"));

    let config = MachineConfig::load()?;
    let session = config.build_session()?;
    let state = MachineState::new(session);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(&state, stdin.lock(), stdout.lock())?;

    let returned = state.with_machine_mut(|m| m.cancel());
    if !returned.is_empty() {
        info!(coins = %commands::coins_text(&returned), "Inserted coins returned on exit");
    }

    Ok(())
}

/// Reads commands from `input` until `q` or end of input.
///
/// Command errors are printed and the loop continues; only I/O errors
/// end it early.
pub fn run_loop<R, W>(state: &MachineState, input: R, mut output: W) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", HELP)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = line
            .parse::<Command>()
            .and_then(|command| execute(state, command));

        match result {
            Ok(Outcome::Message(text)) => writeln!(output, "{}", text)?,
            Ok(Outcome::Quit) => {
                writeln!(output, "Goodbye")?;
                break;
            }
            Err(e) => {
                warn!(input = %line.trim(), error = %e, "Command failed");
                writeln!(output, "{}", e.user_message())?;
            }
        }
        output.flush()?;
    }

    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` for development
/// - `RUST_LOG=info` for production
///
/// Logs go to stderr so they never mix with the customer-facing output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vendo=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vendo_core::{Item, VendingSession};

    fn state() -> MachineState {
        let session = VendingSession::new(
            vec![Item::new("A01", "Smarties", 10, 60), Item::new("C02", "Coke", 50, 75)],
            [(10u32, 5), (2, 3), (1, 1)],
        )
        .unwrap();
        MachineState::new(session)
    }

    fn session_output(state: &MachineState, script: &str) -> String {
        let mut output = Vec::new();
        run_loop(state, Cursor::new(script), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_loop_runs_purchase() {
        let state = state();
        let out = session_output(&state, "i 50\ni 20\ni 20\nb C02\nq\n");

        assert!(out.starts_with(HELP));
        assert!(out.contains("Inserted 20p, total £0.90"));
        assert!(out.contains("Please take your: Coke and 1 x 10p + 2 x 2p + 1 x 1p change."));
        assert!(out.ends_with("Goodbye\n"));
    }

    #[test]
    fn test_loop_reports_errors_and_continues() {
        let state = state();
        let out = session_output(&state, "b A01\n\nzap\ni 3\ni 100\nb A01\n");

        assert!(out.contains("[PURCHASE] Please insert coins"));
        assert!(out.contains("[INVALID_INPUT] Unknown command 'zap' (h for help)"));
        assert!(out.contains("[INVALID_INPUT] Coin invalid: 3"));
        assert!(out.contains("Please take your: Smarties and 4 x 10p change."));
        assert!(!out.contains("Goodbye"));
    }

    #[test]
    fn test_loop_stops_at_quit() {
        let state = state();
        session_output(&state, "q\ni 50\n");
        assert!(state.with_machine(|m| m.inserted().is_empty()));
    }
}
