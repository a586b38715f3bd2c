//! # Domain Types
//!
//! Core domain types used throughout AutoTaller.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │     Client      │◄──│     Vehicle     │   │   Appointment   │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id  CLI…       │   │  id  VEH…       │   │  id  CIT…       │        │
//! │  │  name, phone    │   │  client_id (FK) │   │  client_id (FK) │        │
//! │  │  email          │   │  make, model    │   │  vehicle_id(FK) │        │
//! │  │  registered_on  │   │  year, plate    │   │  service, date  │        │
//! │  └─────────────────┘   └─────────────────┘   │  time, status   │        │
//! │                                              │  price (frozen) │        │
//! │  ┌─────────────────┐   ┌─────────────────┐   └─────────────────┘        │
//! │  │  InventoryItem  │   │     Service     │                              │
//! │  │  ─────────────  │   │  ─────────────  │   AppointmentStatus          │
//! │  │  id  INV…       │   │  name (unique)  │   Confirmed │ Pending        │
//! │  │  name (unique)  │   │  price          │   Completed │ Cancelled      │
//! │  │  stock/min      │   │  duration label │                              │
//! │  └─────────────────┘   └─────────────────┘   TimeSlot 08:00 … 17:00     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pricing
//! An appointment copies the catalog price when it is booked. Later catalog
//! changes never touch existing appointments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Client
// =============================================================================

/// A workshop customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    /// Record id (`CLI` + 6 hex chars, or a fixed seed id).
    pub id: String,

    pub name: String,

    pub phone: String,

    /// May be empty, the intake form leaves it optional.
    pub email: String,

    /// Date the client was registered.
    #[ts(as = "String")]
    pub registered_on: NaiveDate,
}

// =============================================================================
// Vehicle
// =============================================================================

/// A vehicle owned by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Vehicle {
    pub id: String,

    /// Owning client; always references an existing client.
    pub client_id: String,

    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
}

// =============================================================================
// Appointment Status
// =============================================================================

/// Lifecycle state of an appointment.
///
/// Serialized with the workshop's own labels (`Confirmada`, `Pendiente`,
/// `Completada`, `Cancelada`). Parsing also accepts the English names.
///
/// The declaration order is significant: reports break count ties in this
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AppointmentStatus {
    #[serde(rename = "Confirmada")]
    Confirmed,
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Completada")]
    Completed,
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl AppointmentStatus {
    /// Every status in declaration order.
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Confirmed,
        AppointmentStatus::Pending,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    /// Display label used in views and JSON.
    pub const fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmada",
            AppointmentStatus::Pending => "Pendiente",
            AppointmentStatus::Completed => "Completada",
            AppointmentStatus::Cancelled => "Cancelada",
        }
    }

    /// Whether the appointment still occupies the agenda
    /// (shown in the upcoming list).
    pub const fn is_open(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Confirmed | AppointmentStatus::Pending
        )
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Confirmed
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| {
                status.label().to_lowercase() == wanted
                    || format!("{:?}", status).to_lowercase() == wanted
            })
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: AppointmentStatus::ALL
                    .iter()
                    .map(|status| status.label().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Transition Policy
// =============================================================================

/// How strictly `cancel` / `complete` guard the current status.
///
/// ## Policies
/// ```text
/// ┌──────────────┬──────────────────────────────────────────────────────────┐
/// │ Lenient      │ Any status may be overwritten (a cancelled appointment   │
/// │ (default)    │ can be completed, a completed one cancelled).            │
/// ├──────────────┼──────────────────────────────────────────────────────────┤
/// │ Strict       │ Only Confirmed → Completed and Confirmed → Cancelled.    │
/// └──────────────┴──────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    Lenient,
    Strict,
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        TransitionPolicy::Lenient
    }
}

impl TransitionPolicy {
    /// Checks whether appointment `id` may move from `from` to `to`.
    ///
    /// ## Example
    /// ```rust
    /// use taller_core::types::{AppointmentStatus, TransitionPolicy};
    ///
    /// let strict = TransitionPolicy::Strict;
    /// assert!(strict
    ///     .check("CIT001", AppointmentStatus::Confirmed, AppointmentStatus::Completed)
    ///     .is_ok());
    /// assert!(strict
    ///     .check("CIT002", AppointmentStatus::Pending, AppointmentStatus::Completed)
    ///     .is_err());
    /// ```
    pub fn check(
        &self,
        id: &str,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> CoreResult<()> {
        match self {
            TransitionPolicy::Lenient => Ok(()),
            TransitionPolicy::Strict => {
                let allowed = from == AppointmentStatus::Confirmed
                    && matches!(
                        to,
                        AppointmentStatus::Completed | AppointmentStatus::Cancelled
                    );
                if allowed {
                    Ok(())
                } else {
                    Err(CoreError::InvalidTransition {
                        id: id.to_string(),
                        from,
                        to,
                    })
                }
            }
        }
    }
}

// =============================================================================
// Time Slot
// =============================================================================

/// Bookable hour of the workshop day.
///
/// Mornings 08:00–11:00, afternoons 14:00–17:00. Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TimeSlot {
    #[serde(rename = "08:00")]
    H0800,
    #[serde(rename = "09:00")]
    H0900,
    #[serde(rename = "10:00")]
    H1000,
    #[serde(rename = "11:00")]
    H1100,
    #[serde(rename = "14:00")]
    H1400,
    #[serde(rename = "15:00")]
    H1500,
    #[serde(rename = "16:00")]
    H1600,
    #[serde(rename = "17:00")]
    H1700,
}

impl TimeSlot {
    /// Every slot in chronological order.
    pub const ALL: [TimeSlot; 8] = [
        TimeSlot::H0800,
        TimeSlot::H0900,
        TimeSlot::H1000,
        TimeSlot::H1100,
        TimeSlot::H1400,
        TimeSlot::H1500,
        TimeSlot::H1600,
        TimeSlot::H1700,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::H0800 => "08:00",
            TimeSlot::H0900 => "09:00",
            TimeSlot::H1000 => "10:00",
            TimeSlot::H1100 => "11:00",
            TimeSlot::H1400 => "14:00",
            TimeSlot::H1500 => "15:00",
            TimeSlot::H1600 => "16:00",
            TimeSlot::H1700 => "17:00",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "time".to_string(),
                allowed: TimeSlot::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Appointment
// =============================================================================

/// A booked service slot for one client's vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Appointment {
    pub id: String,
    pub client_id: String,
    pub vehicle_id: String,

    /// Catalog service name at time of booking.
    pub service: String,

    #[ts(as = "String")]
    pub date: NaiveDate,

    pub time: TimeSlot,

    pub status: AppointmentStatus,

    /// Catalog price at time of booking (frozen).
    pub price: Money,
}

// =============================================================================
// Inventory Item
// =============================================================================

/// A stocked part or consumable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryItem {
    pub id: String,

    /// Unique across the inventory.
    pub name: String,

    /// Units on hand (never negative).
    pub stock: i64,

    /// Reorder threshold (at least 1).
    pub stock_min: i64,

    pub unit_price: Money,
    pub supplier: String,
}

impl InventoryItem {
    /// Stock at or below the minimum threshold.
    ///
    /// ```rust
    /// use taller_core::{InventoryItem, Money};
    ///
    /// let mut pads = InventoryItem {
    ///     id: "INV003".into(),
    ///     name: "Pastillas freno".into(),
    ///     stock: 8,
    ///     stock_min: 5,
    ///     unit_price: Money::from_major(80_000),
    ///     supplier: "Frenos Total".into(),
    /// };
    /// assert!(!pads.is_low_stock());
    /// pads.stock = 5;
    /// assert!(pads.is_low_stock());
    /// ```
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.stock_min
    }

    /// Value of the units on hand.
    pub fn stock_value(&self) -> Money {
        Money::from_cents(self.unit_price.cents().saturating_mul(self.stock))
    }
}

// =============================================================================
// Service
// =============================================================================

/// A catalog offering with a fixed price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Service {
    /// Unique key of the catalog.
    pub name: String,

    pub price: Money,

    /// Free-text estimate such as "30 min" or "1.5 horas".
    pub duration: String,
}

// =============================================================================
// Input Types
// =============================================================================

/// Intake form for a new client and their vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
}

/// Form for a new inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewInventoryItem {
    pub name: String,
    pub stock: i64,
    pub stock_min: i64,
    pub unit_price: Money,
    pub supplier: String,
}

/// Form for a new catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewService {
    pub name: String,
    pub price: Money,
    pub duration: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
