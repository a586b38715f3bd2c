//! # Seed Data Printer
//!
//! Prints the rows a fresh session starts with as JSON, for fixtures and
//! for checking what the console will show.
//!
//! ## Usage
//! ```bash
//! # Seed relative to today
//! cargo run -p taller-store --bin seed
//!
//! # Pin "today" (appointments land on the next two days)
//! cargo run -p taller-store --bin seed -- --date 2024-05-10
//!
//! # Single-line output
//! cargo run -p taller-store --bin seed -- --compact
//! ```

use std::env;

use taller_core::validation::parse_date;
use taller_store::{Store, StoreConfig};

/// What to print, parsed from the command line.
#[derive(Debug)]
enum Command {
    Print { config: StoreConfig, compact: bool },
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, Box<dyn std::error::Error>> {
    let mut config = StoreConfig::new();
    let mut compact = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--date" | "-d" => {
                let value = args.get(i + 1).ok_or("--date needs a value YYYY-MM-DD")?;
                config = config.fixed_date(parse_date("--date", value)?);
                i += 1;
            }
            "--compact" => compact = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => {
                return Err(format!("Unknown argument: {}", other).into());
            }
        }
        i += 1;
    }

    Ok(Command::Print { config, compact })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let (config, compact) = match parse_args(&args)? {
        Command::Help => {
            println!("Usage: seed [--date YYYY-MM-DD] [--compact]");
            return Ok(());
        }
        Command::Print { config, compact } => (config, compact),
    };

    let store = Store::seeded(config);
    let snapshot = store.snapshot();
    let json = if compact {
        serde_json::to_string(&snapshot)?
    } else {
        serde_json::to_string_pretty(&snapshot)?
    };
    println!("{}", json);
    Ok(())
}
