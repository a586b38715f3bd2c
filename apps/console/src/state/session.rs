//! # Session State
//!
//! Everything one user's session owns: the store, the admin gate and the
//! configuration. Built explicitly at startup and torn down with
//! [`Session::end`]; nothing outlives it.
//!
//! ## Usage
//! ```rust
//! use taller_console::state::{ConfigState, Session};
//! use taller_store::Clock;
//!
//! let mut session = Session::new(ConfigState::default(), Clock::System);
//! session.store_mut().update_stock("INV003", 5)?;
//! assert_eq!(session.store().low_stock_items().len(), 1);
//! session.end();
//! # Ok::<(), taller_store::StoreError>(())
//! ```

use tracing::info;

use taller_store::{Clock, Store};

use super::auth::AdminGate;
use super::config::ConfigState;
use crate::error::ApiError;

#[derive(Debug)]
pub struct Session {
    store: Store,
    gate: AdminGate,
    config: ConfigState,
    clock: Clock,
}

impl Session {
    /// Starts a session over a freshly seeded store.
    pub fn new(config: ConfigState, clock: Clock) -> Self {
        let store = Store::seeded(config.store_config(clock));
        info!(
            workshop = %config.profile.name,
            policy = ?config.transition_policy(),
            "Session started"
        );
        Session {
            store,
            gate: AdminGate::new(),
            config,
            clock,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn gate(&self) -> &AdminGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut AdminGate {
        &mut self.gate
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigState {
        &mut self.config
    }

    /// `Unauthorized` unless the admin is logged in.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        self.gate.require()
    }

    /// Discards every change and starts over from the seed data.
    ///
    /// The admin flag and configuration are kept.
    pub fn reset(&mut self) {
        self.store = Store::seeded(self.config.store_config(self.clock));
        info!("Session store reset to seed data");
    }

    /// Ends the session, dropping all of its data.
    pub fn end(self) {
        info!(
            clients = self.store.list_clients().len(),
            appointments = self.store.appointments().len(),
            "Session ended"
        );
    }
}
