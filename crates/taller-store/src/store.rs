//! # Session Store
//!
//! The in-memory tables of one workshop session.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session Store                                   │
//! │                                                                         │
//! │  Session start                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new() ← transition policy, clock, id attempts             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::seeded(config) ← five collections + fixed seed rows             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────────┐ ┌───────────┐ ┌──────────┐  │
//! │  │ clients  │ │ vehicles │ │ appointments │ │   items   │ │ services │  │
//! │  └──────────┘ └──────────┘ └──────────────┘ └───────────┘ └──────────┘  │
//! │       │                                                                 │
//! │       │ &mut access from exactly one session                            │
//! │       ▼                                                                 │
//! │  registrar / scheduler / inventory / catalog ── mutate                  │
//! │  reports ─────────────────────────────────────── read only              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are never deleted. Every collection keeps insertion order, which is
//! the order listings return.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use taller_core::{
    generate_id, Appointment, Client, IdPrefix, InventoryItem, Service, TransitionPolicy, Vehicle,
};

use crate::error::{StoreError, StoreResult};
use crate::reports::Reports;
use crate::seed;

/// Default number of draws before id generation gives up.
pub const DEFAULT_ID_ATTEMPTS: u32 = 16;

// =============================================================================
// Clock
// =============================================================================

/// Source of "today" for booking checks, seed dates and dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Local calendar date of the host.
    System,
    /// A pinned date (tests, demos).
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use taller_store::{Clock, StoreConfig};
/// use taller_core::TransitionPolicy;
///
/// let config = StoreConfig::new()
///     .transition_policy(TransitionPolicy::Strict)
///     .clock(Clock::System);
/// assert_eq!(config.transition_policy, TransitionPolicy::Strict);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Guard applied by `cancel` / `complete`.
    /// Default: Lenient
    pub transition_policy: TransitionPolicy,

    /// Where "today" comes from.
    /// Default: System
    pub clock: Clock,

    /// Draws allowed before `fresh_id` fails with `IdExhausted`.
    /// Default: 16
    pub id_attempts: u32,
}

impl StoreConfig {
    pub fn new() -> Self {
        StoreConfig {
            transition_policy: TransitionPolicy::default(),
            clock: Clock::default(),
            id_attempts: DEFAULT_ID_ATTEMPTS,
        }
    }

    /// Sets the status transition policy.
    pub fn transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    /// Sets the clock.
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Pins "today" to `date`.
    pub fn fixed_date(self, date: NaiveDate) -> Self {
        self.clock(Clock::Fixed(date))
    }

    /// Sets the id generation attempt budget.
    pub fn id_attempts(mut self, attempts: u32) -> Self {
        self.id_attempts = attempts;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new()
    }
}

// =============================================================================
// Store
// =============================================================================

/// The five collections of a session.
///
/// Operations live in their own modules as `impl Store` blocks:
/// [`registrar`](crate::registrar), [`scheduler`](crate::scheduler),
/// [`inventory`](crate::inventory), [`catalog`](crate::catalog).
/// Read-only aggregations are reached through [`Store::reports`].
#[derive(Debug, Clone)]
pub struct Store {
    pub(crate) config: StoreConfig,
    pub(crate) clients: Vec<Client>,
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) appointments: Vec<Appointment>,
    pub(crate) items: Vec<InventoryItem>,
    pub(crate) services: Vec<Service>,
}

/// Borrowed view of every collection, for serialization.
#[derive(Debug, Serialize)]
pub struct Snapshot<'s> {
    pub today: NaiveDate,
    pub clients: &'s [Client],
    pub vehicles: &'s [Vehicle],
    pub appointments: &'s [Appointment],
    pub inventory: &'s [InventoryItem],
    pub services: &'s [Service],
}

impl Store {
    /// Creates a store with no rows.
    pub fn empty(config: StoreConfig) -> Self {
        Store {
            config,
            clients: Vec::new(),
            vehicles: Vec::new(),
            appointments: Vec::new(),
            items: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Creates a store populated with the fixed seed data.
    ///
    /// Seed appointment dates are relative to the clock's today.
    pub fn seeded(config: StoreConfig) -> Self {
        let mut store = Store::empty(config);
        seed::populate(&mut store);
        info!(
            today = %store.today(),
            clients = store.clients.len(),
            appointments = store.appointments.len(),
            items = store.items.len(),
            services = store.services.len(),
            "Session store seeded"
        );
        store
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Today's date according to the configured clock.
    pub fn today(&self) -> NaiveDate {
        self.config.clock.today()
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Read-only reporting over this store.
    ///
    /// ## Example
    /// ```rust
    /// use taller_store::{Store, StoreConfig};
    ///
    /// let store = Store::seeded(StoreConfig::new());
    /// let totals = store.reports().summary_totals();
    /// assert_eq!(totals.clients, 2);
    /// ```
    pub fn reports(&self) -> Reports<'_> {
        Reports::new(self)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            today: self.today(),
            clients: &self.clients,
            vehicles: &self.vehicles,
            appointments: &self.appointments,
            inventory: &self.items,
            services: &self.services,
        }
    }

    /// Draws an id that is unused in the collection `prefix` names.
    ///
    /// ## Collision Handling
    /// ```text
    /// generate_id(CLI) ──► "CLI3F09A1" taken? ──yes──► draw again
    ///                                   │                 (up to id_attempts)
    ///                                   no
    ///                                   ▼
    ///                               return id
    /// ```
    pub fn fresh_id(&self, prefix: IdPrefix) -> StoreResult<String> {
        for attempt in 1..=self.config.id_attempts {
            let id = generate_id(prefix);
            if !self.id_taken(prefix, &id) {
                return Ok(id);
            }
            debug!(%id, attempt, "Generated id already taken, drawing again");
        }

        warn!(prefix = %prefix, attempts = self.config.id_attempts, "Id generation exhausted");
        Err(StoreError::IdExhausted {
            prefix: prefix.as_str().to_string(),
            attempts: self.config.id_attempts,
        })
    }

    fn id_taken(&self, prefix: IdPrefix, id: &str) -> bool {
        match prefix {
            IdPrefix::Client => self.clients.iter().any(|c| c.id == id),
            IdPrefix::Vehicle => self.vehicles.iter().any(|v| v.id == id),
            IdPrefix::Appointment => self.appointments.iter().any(|a| a.id == id),
            IdPrefix::InventoryItem => self.items.iter().any(|i| i.id == id),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
