//! # taller-store: Session Store for AutoTaller
//!
//! This crate owns the in-memory tables of one workshop session and the
//! operations over them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AutoTaller Data Flow                             │
//! │                                                                         │
//! │  Console command (book_appointment)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                   taller-store (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │    Store      │    │  Operations   │    │    Seed      │    │    │
//! │  │   │  (store.rs)   │    │ registrar.rs  │    │  (seed.rs)   │    │    │
//! │  │   │               │◄───│ scheduler.rs  │    │              │    │    │
//! │  │   │ 5 collections │    │ inventory.rs  │    │ CLI001 …     │    │    │
//! │  │   │ clock, policy │    │ catalog.rs    │    │ INV004       │    │    │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘    │    │
//! │  │           │                                                     │    │
//! │  │           └──────► Reports (reports.rs, read only)              │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store`, its configuration and id allocation
//! - [`seed`] - Fixed rows every session starts with
//! - [`registrar`] - Clients and vehicles
//! - [`scheduler`] - Appointments
//! - [`inventory`] - Stock and alerts
//! - [`catalog`] - Services
//! - [`reports`] - Aggregations
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use taller_store::{Store, StoreConfig};
//!
//! let mut store = Store::seeded(StoreConfig::new());
//! store.update_stock("INV003", 5)?;
//! assert_eq!(store.low_stock_items().len(), 1);
//! # Ok::<(), taller_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod inventory;
pub mod registrar;
pub mod reports;
pub mod scheduler;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use inventory::{StockLevel, StockStatus};
pub use registrar::{Registration, VehicleWithOwner};
pub use reports::{
    ClientVisits, DashboardMetrics, MonthRevenue, Reports, ServiceCount, ServiceRevenue,
    StatusCount, StatusTotals, SummaryTotals,
};
pub use scheduler::{
    AppointmentFilter, AppointmentView, BookingReceipt, BookingRequest, CalendarDay, ClientRef,
};
pub use store::{Clock, Snapshot, Store, StoreConfig};
