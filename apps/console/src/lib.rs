//! # AutoTaller Console Library
//!
//! Session state, command layer and line-oriented front end for the
//! workshop dashboard.
//!
//! ## Module Organization
//! ```text
//! taller_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Session: store + gate + config
//! │   ├── auth.rs     ◄─── Admin gate
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── clients.rs  ◄─── Registration and search
//! │   ├── appointments.rs
//! │   ├── inventory.rs
//! │   ├── catalog.rs
//! │   ├── reports.rs
//! │   └── session.rs  ◄─── Login, home, settings, reset
//! ├── repl.rs         ◄─── Tokenizer, dispatch, loop
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Output Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout ──► one JSON response per command line                          │
//! │  stderr ──► tracing events (RUST_LOG, default info,taller=debug)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod repl;
pub mod state;

use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use state::{ConfigState, Session};
use taller_store::Clock;

/// Runs the console application and returns the process exit code.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config path, else <config dir>/taller.toml, else defaults       │
/// │     • TALLER_* environment overrides                                    │
/// │                                                                         │
/// │  3. Start Session ────────────────────────────────────────────────────► │
/// │     • Seeded store, admin logged out, system clock                      │
/// │                                                                         │
/// │  4. Run REPL on stdin/stdout until quit or EOF ───────────────────────► │
/// │                                                                         │
/// │  5. End Session ──────────────────────────────────────────────────────► │
/// │     • All data is dropped                                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(config_path: Option<PathBuf>) -> i32 {
    init_tracing();

    info!("Starting AutoTaller console");

    let config = ConfigState::load_or_default(config_path);
    let mut session = Session::new(config, Clock::System);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = repl::run(&mut session, stdin.lock(), stdout.lock());
    session.end();

    match result {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "Console I/O failed");
            1
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=taller_store=trace` - Show trace for the store only
/// - Default: INFO, DEBUG for taller crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,taller=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
