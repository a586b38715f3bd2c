//! # Client/Vehicle Registrar
//!
//! Registration, lookup and search of clients and their vehicles.
//!
//! ## Registration Flow
//! ```text
//! NewClient form
//!      │
//!      ▼
//! validate_new_client ── fails ──► ValidationError (nothing written)
//!      │
//!      ▼
//! fresh ids CLI…/VEH… ── exhausted ──► IdExhausted (nothing written)
//!      │
//!      ▼
//! push Client (registered today) + Vehicle (client_id = new client)
//! ```

use serde::Serialize;
use tracing::{debug, info};

use taller_core::validation::validate_new_client;
use taller_core::{Client, IdPrefix, NewClient, Vehicle};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Ids created by a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub client_id: String,
    pub vehicle_id: String,
}

/// Vehicle row joined with its owner's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleWithOwner {
    pub id: String,
    pub owner: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub plate: String,
}

impl Store {
    /// Registers a new client together with their first vehicle.
    ///
    /// Text fields are stored trimmed. A failed validation changes nothing.
    pub fn register(&mut self, form: NewClient) -> StoreResult<Registration> {
        let (client, vehicle) = self.prepare_registration(&form)?;
        Ok(self.insert_registration(client, vehicle))
    }

    /// Validates the form and builds the rows without inserting them.
    pub(crate) fn prepare_registration(&self, form: &NewClient) -> StoreResult<(Client, Vehicle)> {
        validate_new_client(form)?;

        let client = Client {
            id: self.fresh_id(IdPrefix::Client)?,
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email.trim().to_string(),
            registered_on: self.today(),
        };
        let vehicle = Vehicle {
            id: self.fresh_id(IdPrefix::Vehicle)?,
            client_id: client.id.clone(),
            make: form.make.trim().to_string(),
            model: form.model.trim().to_string(),
            year: form.year,
            plate: form.plate.trim().to_string(),
        };
        Ok((client, vehicle))
    }

    pub(crate) fn insert_registration(&mut self, client: Client, vehicle: Vehicle) -> Registration {
        info!(
            client_id = %client.id,
            vehicle_id = %vehicle.id,
            plate = %vehicle.plate,
            "Client registered"
        );
        let registration = Registration {
            client_id: client.id.clone(),
            vehicle_id: vehicle.id.clone(),
        };
        self.clients.push(client);
        self.vehicles.push(vehicle);
        registration
    }

    /// All clients in registration order.
    pub fn list_clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, id: &str) -> StoreResult<&Client> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("Client", id))
    }

    pub fn vehicle(&self, id: &str) -> StoreResult<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| StoreError::not_found("Vehicle", id))
    }

    /// Vehicles owned by `client_id`, in registration order.
    pub fn vehicles_of(&self, client_id: &str) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.client_id == client_id)
            .collect()
    }

    /// Every vehicle with its owner's name.
    ///
    /// Fails with `NotFound` if an owner is missing, which the registrar
    /// never allows to happen.
    pub fn list_vehicles_with_owner(&self) -> StoreResult<Vec<VehicleWithOwner>> {
        self.vehicles
            .iter()
            .map(|v| {
                let owner = self.client(&v.client_id)?;
                Ok(VehicleWithOwner {
                    id: v.id.clone(),
                    owner: owner.name.clone(),
                    make: v.make.clone(),
                    model: v.model.clone(),
                    year: v.year,
                    plate: v.plate.clone(),
                })
            })
            .collect()
    }

    /// Case-insensitive substring search over name, phone and email.
    ///
    /// A blank query matches nothing.
    ///
    /// ## Example
    /// ```rust
    /// use taller_store::{Store, StoreConfig};
    ///
    /// let store = Store::seeded(StoreConfig::new());
    /// let hits = store.search_clients("garcía");
    /// assert_eq!(hits.len(), 1);
    /// assert_eq!(hits[0].name, "María García");
    /// ```
    pub fn search_clients(&self, query: &str) -> Vec<&Client> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let hits: Vec<&Client> = self
            .clients
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.phone.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
            })
            .collect();

        debug!(query = %needle, count = hits.len(), "Client search");
        hits
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taller_core::ValidationError;

    use super::*;
    use crate::store::StoreConfig;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn store() -> Store {
        Store::seeded(StoreConfig::new().fixed_date(today()))
    }

    fn form() -> NewClient {
        NewClient {
            name: "  Carlos Rojas ".to_string(),
            phone: "3001234567".to_string(),
            email: String::new(),
            make: "Renault".to_string(),
            model: "Logan".to_string(),
            year: 2015,
            plate: "RJS015".to_string(),
        }
    }

    #[test]
    fn test_register_creates_client_and_vehicle() {
        let mut store = store();
        let reg = store.register(form()).unwrap();

        assert_eq!(store.list_clients().len(), 3);
        let client = store.client(&reg.client_id).unwrap();
        assert_eq!(client.name, "Carlos Rojas");
        assert_eq!(client.email, "");
        assert_eq!(client.registered_on, today());

        let vehicle = store.vehicle(&reg.vehicle_id).unwrap();
        assert_eq!(vehicle.client_id, reg.client_id);
        assert_eq!(vehicle.plate, "RJS015");
        assert_eq!(store.vehicles_of(&reg.client_id).len(), 1);
    }

    #[test]
    fn test_register_rejects_invalid_without_changes() {
        let mut store = store();

        let mut blank_phone = form();
        blank_phone.phone = "  ".to_string();
        let err = store.register(blank_phone).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::Required { ref field }) if field == "phone"
        ));

        let mut old = form();
        old.year = 1989;
        assert!(store.register(old).is_err());

        let mut new = form();
        new.year = 2025;
        assert!(store.register(new).is_err());

        assert_eq!(store.list_clients().len(), 2);
        assert_eq!(store.vehicles().len(), 2);
    }

    #[test]
    fn test_register_year_bounds_inclusive() {
        let mut store = store();
        let mut first = form();
        first.year = 1990;
        assert!(store.register(first).is_ok());
        let mut last = form();
        last.year = 2024;
        assert!(store.register(last).is_ok());
    }

    #[test]
    fn test_search_clients() {
        let store = store();

        let hits = store.search_clients("garcía");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "María García");

        assert_eq!(store.search_clients("JUAN")[0].id, "CLI001");
        assert_eq!(store.search_clients("98765")[0].id, "CLI002");
        assert_eq!(store.search_clients("@email.com").len(), 2);
        assert!(store.search_clients("").is_empty());
        assert!(store.search_clients("   ").is_empty());
        assert!(store.search_clients("zzz").is_empty());
    }

    #[test]
    fn test_list_vehicles_with_owner() {
        let store = store();
        let rows = store.list_vehicles_with_owner().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].owner, "Juan Pérez");
        assert_eq!(rows[1].make, "Honda");
        assert_eq!(rows[1].plate, "XYZ789");
    }

    #[test]
    fn test_list_vehicles_with_missing_owner() {
        let mut store = store();
        store.vehicles[0].client_id = "CLI404".to_string();
        assert!(matches!(
            store.list_vehicles_with_owner(),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_lookups_not_found() {
        let store = store();
        assert!(store.client("CLI999").is_err());
        assert!(store.vehicle("VEH999").is_err());
        assert!(store.vehicles_of("CLI999").is_empty());
    }
}
