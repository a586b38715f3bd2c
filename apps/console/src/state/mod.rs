//! # State Module
//!
//! Session state for the console app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                          Session                                │    │
//! │  │  Session::new(config, clock)   reset()   end()                  │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                              │                                          │
//! │          ┌───────────────────┼──────────────────┐                       │
//! │          ▼                   ▼                  ▼                       │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐               │
//! │  │    Store     │  │  AdminGate   │  │   ConfigState    │               │
//! │  │              │  │              │  │                  │               │
//! │  │  clients     │  │  bool flag   │  │  profile         │               │
//! │  │  vehicles    │  │  admin/      │  │  currency format │               │
//! │  │  appts, ...  │  │  admin123    │  │  strict flag     │               │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘               │
//! │                                                                         │
//! │  OWNERSHIP:                                                             │
//! │  • One session, one thread; commands take &Session or &mut Session      │
//! │  • No locks: nothing is shared                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod config;
mod session;

pub use auth::{AdminGate, ADMIN_PASSWORD, ADMIN_USER};
pub use config::{ConfigError, ConfigState, CurrencyFormat, WorkshopProfile};
pub use session::Session;
