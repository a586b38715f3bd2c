//! # Commands Module
//!
//! One function per dashboard action.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (exports)
//! ├── clients.rs       ◄─── Registration, client/vehicle tables, search
//! ├── appointments.rs  ◄─── Booking, status changes, upcoming, calendar
//! ├── inventory.rs     ◄─── Stock table, stock edits, alerts
//! ├── catalog.rs       ◄─── Service cards, new services
//! ├── reports.rs       ◄─── Report selector, dashboard figures
//! └── session.rs       ◄─── Login, home view, settings, reset
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Console line                                                           │
//! │  ────────────                                                           │
//! │  stock name="Pastillas freno" value=5                                   │
//! │         │                                                               │
//! │         │ (repl: tokenize + parse args)                                 │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  fn update_stock(                                                       │
//! │      session: &mut Session,   ◄── Owned by the REPL loop                │
//! │      key: ItemKey,            ◄── From the line arguments               │
//! │      stock: i64,                                                        │
//! │  ) -> Result<InventoryItem, ApiError>                                   │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"ok":true,"data":{"id":"INV003","stock":5,...}}                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read-only commands take `&Session`; commands that change data take
//! `&mut Session`. Admin-only commands check the gate before anything else.

pub mod appointments;
pub mod catalog;
pub mod clients;
pub mod inventory;
pub mod reports;
pub mod session;
