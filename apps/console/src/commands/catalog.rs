//! # Catalog Commands
//!
//! Service cards and, for the admin, new catalog entries.

use serde::Serialize;

use taller_core::{NewService, Service};

use crate::error::ApiError;
use crate::state::Session;

/// A service card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCard {
    #[serde(flatten)]
    pub service: Service,
    pub price_display: String,
}

pub fn list_services(session: &Session) -> Result<Vec<ServiceCard>, ApiError> {
    let config = session.config();
    Ok(session
        .store()
        .services()
        .iter()
        .map(|service| ServiceCard {
            price_display: config.format_currency(service.price),
            service: service.clone(),
        })
        .collect())
}

/// Adds a catalog entry. Admin only.
pub fn add_service(session: &mut Session, form: NewService) -> Result<ServiceCard, ApiError> {
    session.require_admin()?;
    let service = session.store_mut().add_service(form)?;
    Ok(ServiceCard {
        price_display: session.config().format_currency(service.price),
        service,
    })
}
