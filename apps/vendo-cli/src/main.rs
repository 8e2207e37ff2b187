//! # Vendo Terminal
//!
//! ## Usage
//! ```bash
//! # Built-in catalog and coin float
//! cargo run -p vendo-cli
//!
//! # Custom seed file
//! VENDO_SEED=./machine.json cargo run -p vendo-cli
//!
//! # Verbose logging
//! RUST_LOG=debug cargo run -p vendo-cli
//! ```

fn main() -> Result<(), Box<dyn std::error::Error>> {
    vendo_cli::run()
}
