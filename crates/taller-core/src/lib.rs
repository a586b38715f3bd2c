//! # taller-core: Pure Domain Logic for AutoTaller
//!
//! This crate holds the workshop's domain model and rules as plain data and
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AutoTaller Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 Console front end (taller-console)              │    │
//! │  │   register ──► book ──► complete ──► reports                    │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ taller-core (THIS CRATE) ★                      │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐    │    │
//! │  │   │   types   │  │   money   │  │    id     │  │ validation│    │    │
//! │  │   │  Client   │  │   Money   │  │ CLI/VEH/  │  │   forms   │    │    │
//! │  │   │Appointment│  │   mean    │  │ CIT/INV   │  │  ranges   │    │    │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘    │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO STORAGE • NO NETWORK                              │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                 taller-store (session store)                    │    │
//! │  │        collections, seed data, operations, reports              │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Client, Vehicle, Appointment, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`id`] - Prefixed record identifiers
//! - [`error`] - Domain error types
//! - [`validation`] - Form validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use taller_core::validation::validate_new_client;
//! use taller_core::NewClient;
//!
//! let form = NewClient {
//!     name: "Juan Pérez".into(),
//!     phone: "123456789".into(),
//!     email: "juan@email.com".into(),
//!     make: "Toyota".into(),
//!     model: "Corolla".into(),
//!     year: 2020,
//!     plate: "ABC123".into(),
//! };
//! assert!(validate_new_client(&form).is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod id;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use id::{generate_id, IdPrefix};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Oldest vehicle model year the intake form accepts.
pub const MIN_VEHICLE_YEAR: i32 = 1990;

/// Newest vehicle model year the intake form accepts.
pub const MAX_VEHICLE_YEAR: i32 = 2024;

/// Largest stock count or reorder threshold an item may carry.
pub const MAX_STOCK: i64 = 1_000_000;

/// Largest price accepted for a service or item, in whole units.
///
/// With [`MAX_STOCK`] this keeps `price * stock` inside the cent range.
pub const MAX_PRICE_MAJOR: i64 = 10_000_000_000;

/// Number of rows in the dashboard's upcoming-appointments list.
pub const UPCOMING_LIMIT: usize = 5;

/// Number of rows in the most-frequent-clients report.
pub const TOP_CLIENTS_LIMIT: usize = 10;
