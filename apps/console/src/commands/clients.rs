//! # Client Commands
//!
//! Registration form, client and vehicle tables, and client search.

use serde::Serialize;
use tracing::debug;

use taller_core::{Client, NewClient, Vehicle};
use taller_store::{Registration, VehicleWithOwner};

use crate::error::ApiError;
use crate::state::Session;

/// Search hit: the client plus every vehicle on file for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub vehicles: Vec<Vehicle>,
}

/// Registers a client together with their first vehicle.
pub fn register_client(session: &mut Session, form: NewClient) -> Result<Registration, ApiError> {
    Ok(session.store_mut().register(form)?)
}

pub fn list_clients(session: &Session) -> Result<Vec<Client>, ApiError> {
    debug!("list_clients command");
    Ok(session.store().list_clients().to_vec())
}

/// Vehicle table with the owner's name in place of the client id.
pub fn list_vehicles(session: &Session) -> Result<Vec<VehicleWithOwner>, ApiError> {
    Ok(session.store().list_vehicles_with_owner()?)
}

/// Case-insensitive search over name, phone and email.
///
/// A blank query returns an empty list.
pub fn search_clients(session: &Session, query: &str) -> Result<Vec<ClientDetail>, ApiError> {
    let store = session.store();
    let hits = store
        .search_clients(query)
        .into_iter()
        .map(|client| ClientDetail {
            vehicles: store.vehicles_of(&client.id).into_iter().cloned().collect(),
            client: client.clone(),
        })
        .collect();
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taller_store::Clock;

    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;

    fn session() -> Session {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        Session::new(ConfigState::default(), Clock::Fixed(today))
    }

    fn form() -> NewClient {
        NewClient {
            name: "Ana Torres".to_string(),
            phone: "555-0101".to_string(),
            email: String::new(),
            make: "Kia".to_string(),
            model: "Rio".to_string(),
            year: 2021,
            plate: "KIA001".to_string(),
        }
    }

    #[test]
    fn test_register_and_list() {
        let mut session = session();
        let reg = register_client(&mut session, form()).unwrap();

        let clients = list_clients(&session).unwrap();
        assert_eq!(clients.len(), 3);
        assert_eq!(clients[2].id, reg.client_id);

        let vehicles = list_vehicles(&session).unwrap();
        let row = vehicles.iter().find(|v| v.id == reg.vehicle_id).unwrap();
        assert_eq!(row.owner, "Ana Torres");
    }

    #[test]
    fn test_register_invalid_year() {
        let mut session = session();
        let err = register_client(
            &mut session,
            NewClient {
                year: 1989,
                ..form()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list_clients(&session).unwrap().len(), 2);
    }

    #[test]
    fn test_search_includes_vehicles() {
        let session = session();
        let hits = search_clients(&session, "garcía").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].client.name, "María García");
        assert_eq!(hits[0].vehicles[0].plate, "XYZ789");

        assert!(search_clients(&session, "   ").unwrap().is_empty());
    }
}
