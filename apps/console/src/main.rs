//! # AutoTaller Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AutoTaller Console                               │
//! │                                                                         │
//! │  main.rs ────► Parses --config, hands off to taller_console::run        │
//! │                                                                         │
//! │  lib.rs ─────► Logging, config, session, REPL                           │
//! │                                                                         │
//! │  commands/ ──► book, cancel, stock, report, ...                         │
//! │                                                                         │
//! │  taller-store ► In-memory session store (seeded on start)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```text
//! taller-console [--config <path>]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut config_path: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("--config needs a path");
                    return ExitCode::from(2);
                }
            },
            "--help" | "-h" => {
                println!("Usage: taller-console [--config <path>]");
                println!("Reads commands from stdin; type 'help' for the list.");
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                return ExitCode::from(2);
            }
        }
    }

    match taller_console::run(config_path) {
        0 => ExitCode::SUCCESS,
        code => ExitCode::from(u8::try_from(code).unwrap_or(1)),
    }
}
