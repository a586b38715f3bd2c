//! # Service Catalog
//!
//! The priced services the workshop offers. Names are the catalog key and
//! appointments refer to services by name.

use tracing::info;

use taller_core::validation::validate_new_service;
use taller_core::{NewService, Service};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// The catalog in insertion order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn service(&self, name: &str) -> StoreResult<&Service> {
        self.services
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| StoreError::not_found("Service", name))
    }

    /// Appends a service to the catalog.
    ///
    /// ## Rules
    /// - name and duration are required
    /// - price must be positive
    /// - name must not already be in the catalog
    pub fn add_service(&mut self, form: NewService) -> StoreResult<Service> {
        validate_new_service(&form)?;

        let name = form.name.trim().to_string();
        if self.services.iter().any(|s| s.name == name) {
            return Err(StoreError::duplicate("service name", name));
        }

        let service = Service {
            name,
            price: form.price,
            duration: form.duration.trim().to_string(),
        };
        info!(service = %service.name, price = service.price.cents(), "Service added to catalog");
        self.services.push(service.clone());
        Ok(service)
    }
}

#[cfg(test)]
mod tests {
    use taller_core::Money;

    use super::*;
    use crate::store::StoreConfig;

    fn belt() -> NewService {
        NewService {
            name: "Cambio de correa".to_string(),
            price: Money::from_major(200_000),
            duration: "3 horas".to_string(),
        }
    }

    #[test]
    fn test_seed_catalog_order() {
        let store = Store::seeded(StoreConfig::new());
        let names: Vec<&str> = store.services().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names[0], "Cambio de aceite");
        assert_eq!(names[5], "Cambio de filtros");
        assert_eq!(
            store.service("Cambio de frenos").unwrap().price,
            Money::from_major(150_000)
        );
        assert!(store.service("Pintura").is_err());
    }

    #[test]
    fn test_add_service_appends() {
        let mut store = Store::seeded(StoreConfig::new());
        store.add_service(belt()).unwrap();
        assert_eq!(store.services().len(), 7);
        assert_eq!(store.services()[6].name, "Cambio de correa");
    }

    #[test]
    fn test_add_service_rejections() {
        let mut store = Store::seeded(StoreConfig::new());

        let dup = NewService {
            name: "Cambio de aceite".to_string(),
            ..belt()
        };
        assert!(matches!(
            store.add_service(dup),
            Err(StoreError::UniqueViolation { .. })
        ));

        let free = NewService {
            price: Money::zero(),
            ..belt()
        };
        assert!(matches!(
            store.add_service(free),
            Err(StoreError::Validation(_))
        ));

        let unnamed = NewService {
            name: "  ".to_string(),
            ..belt()
        };
        assert!(store.add_service(unnamed).is_err());
        assert_eq!(store.services().len(), 6);
    }
}
