//! # Seed Data
//!
//! Rows every session starts with. Ids are fixed; appointment dates are
//! relative to the store clock's today.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │ CLI001 Juan Pérez    ──► VEH001 Toyota Corolla 2020 ABC123           │
//! │                          CIT001 Cambio de aceite  today+1 10:00  ✔   │
//! │ CLI002 María García  ──► VEH002 Honda Civic 2019   XYZ789            │
//! │                          CIT002 Revisión general  today+2 14:00  …   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Days;

use taller_core::{
    Appointment, AppointmentStatus, Client, InventoryItem, Money, Service, TimeSlot, Vehicle,
};

use crate::store::Store;

/// Catalog as (name, price in whole units, duration label).
pub const SEED_SERVICES: [(&str, i64, &str); 6] = [
    ("Cambio de aceite", 50_000, "30 min"),
    ("Revisión general", 120_000, "2 horas"),
    ("Alineación y balanceo", 80_000, "1 hora"),
    ("Cambio de frenos", 150_000, "1.5 horas"),
    ("Diagnóstico computarizado", 70_000, "45 min"),
    ("Cambio de filtros", 60_000, "45 min"),
];

/// Inventory as (id, name, stock, minimum, unit price in whole units, supplier).
pub const SEED_ITEMS: [(&str, &str, i64, i64, i64, &str); 4] = [
    ("INV001", "Aceite motor 5W-30", 25, 10, 25_000, "Lubricantes S.A."),
    ("INV002", "Filtro aire", 15, 10, 35_000, "Filtros Pro"),
    ("INV003", "Pastillas freno", 8, 5, 80_000, "Frenos Total"),
    ("INV004", "Bujías", 30, 20, 15_000, "Bujías Max"),
];

pub(crate) fn populate(store: &mut Store) {
    let today = store.today();

    store.clients = vec![
        client("CLI001", "Juan Pérez", "123456789", "juan@email.com", today),
        client("CLI002", "María García", "987654321", "maria@email.com", today),
    ];

    store.vehicles = vec![
        vehicle("VEH001", "CLI001", "Toyota", "Corolla", 2020, "ABC123"),
        vehicle("VEH002", "CLI002", "Honda", "Civic", 2019, "XYZ789"),
    ];

    store.appointments = vec![
        Appointment {
            id: "CIT001".to_string(),
            client_id: "CLI001".to_string(),
            vehicle_id: "VEH001".to_string(),
            service: "Cambio de aceite".to_string(),
            date: today + Days::new(1),
            time: TimeSlot::H1000,
            status: AppointmentStatus::Confirmed,
            price: Money::from_major(50_000),
        },
        Appointment {
            id: "CIT002".to_string(),
            client_id: "CLI002".to_string(),
            vehicle_id: "VEH002".to_string(),
            service: "Revisión general".to_string(),
            date: today + Days::new(2),
            time: TimeSlot::H1400,
            status: AppointmentStatus::Pending,
            price: Money::from_major(120_000),
        },
    ];

    store.items = SEED_ITEMS
        .iter()
        .map(|&(id, name, stock, stock_min, price, supplier)| InventoryItem {
            id: id.to_string(),
            name: name.to_string(),
            stock,
            stock_min,
            unit_price: Money::from_major(price),
            supplier: supplier.to_string(),
        })
        .collect();

    store.services = SEED_SERVICES
        .iter()
        .map(|&(name, price, duration)| Service {
            name: name.to_string(),
            price: Money::from_major(price),
            duration: duration.to_string(),
        })
        .collect();
}

fn client(id: &str, name: &str, phone: &str, email: &str, today: chrono::NaiveDate) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        registered_on: today,
    }
}

fn vehicle(id: &str, client_id: &str, make: &str, model: &str, year: i32, plate: &str) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        client_id: client_id.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        plate: plate.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::store::{Store, StoreConfig};

    use super::*;

    #[test]
    fn test_seed_rows() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let store = Store::seeded(StoreConfig::new().fixed_date(today));

        assert_eq!(store.clients.len(), 2);
        assert_eq!(store.vehicles.len(), 2);
        assert_eq!(store.items.len(), 4);
        assert_eq!(store.services.len(), 6);

        let cit001 = &store.appointments[0];
        assert_eq!(cit001.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(cit001.time, TimeSlot::H1000);
        assert_eq!(cit001.status, AppointmentStatus::Confirmed);
        assert_eq!(cit001.price, Money::from_major(50_000));

        let cit002 = &store.appointments[1];
        assert_eq!(cit002.date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(cit002.status, AppointmentStatus::Pending);
    }

    #[test]
    fn test_seed_references_are_consistent() {
        let store = Store::seeded(StoreConfig::new());
        for v in &store.vehicles {
            assert!(store.clients.iter().any(|c| c.id == v.client_id));
        }
        for a in &store.appointments {
            let vehicle = store.vehicles.iter().find(|v| v.id == a.vehicle_id).unwrap();
            assert_eq!(vehicle.client_id, a.client_id);
            assert!(store.services.iter().any(|s| s.name == a.service));
        }
    }
}
