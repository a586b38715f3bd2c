//! # Session Commands
//!
//! Admin login, the home view, workshop settings and session reset.

use serde::{Deserialize, Serialize};
use tracing::info;

use taller_core::ValidationError;

use super::catalog::{list_services, ServiceCard};
use crate::error::ApiError;
use crate::state::{ConfigState, Session, WorkshopProfile};

/// Number of service cards on the home view.
pub const HOME_FEATURED_SERVICES: usize = 4;

/// Choices offered by the settings form.
pub const OPENING_TIMES: [&str; 3] = ["07:00", "08:00", "09:00"];
pub const CLOSING_TIMES: [&str; 3] = ["17:00", "18:00", "19:00"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeView {
    pub profile: WorkshopProfile,
    pub featured_services: Vec<ServiceCard>,
    pub total_appointments: usize,
    pub appointments_today: usize,
}

/// Settings form. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginStatus {
    pub authenticated: bool,
}

pub fn login(session: &mut Session, user: &str, password: &str) -> Result<LoginStatus, ApiError> {
    session.gate_mut().login(user, password)?;
    Ok(LoginStatus {
        authenticated: true,
    })
}

pub fn logout(session: &mut Session) -> Result<LoginStatus, ApiError> {
    session.gate_mut().logout();
    Ok(LoginStatus {
        authenticated: false,
    })
}

pub fn get_config(session: &Session) -> Result<ConfigState, ApiError> {
    Ok(session.config().clone())
}

pub fn home(session: &Session) -> Result<HomeView, ApiError> {
    let store = session.store();
    let mut featured_services = list_services(session)?;
    featured_services.truncate(HOME_FEATURED_SERVICES);

    Ok(HomeView {
        profile: session.config().profile.clone(),
        featured_services,
        total_appointments: store.appointments().len(),
        appointments_today: store.count_on(store.today()),
    })
}

/// Applies the settings form for this session. Admin only.
///
/// Everything is checked before anything changes.
pub fn update_profile(session: &mut Session, update: ProfileUpdate) -> Result<WorkshopProfile, ApiError> {
    session.require_admin()?;

    let name = update.name.map(|n| n.trim().to_string());
    if matches!(&name, Some(n) if n.is_empty()) {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        }
        .into());
    }
    check_choice("opens_at", update.opens_at.as_deref(), &OPENING_TIMES)?;
    check_choice("closes_at", update.closes_at.as_deref(), &CLOSING_TIMES)?;

    let profile = &mut session.config_mut().profile;
    if let Some(name) = name {
        profile.name = name;
    }
    if let Some(phone) = update.phone {
        profile.phone = phone.trim().to_string();
    }
    if let Some(opens_at) = update.opens_at {
        profile.opens_at = opens_at;
    }
    if let Some(closes_at) = update.closes_at {
        profile.closes_at = closes_at;
    }

    info!(name = %profile.name, "Workshop profile updated");
    Ok(profile.clone())
}

fn check_choice(field: &str, value: Option<&str>, allowed: &[&str]) -> Result<(), ValidationError> {
    match value {
        Some(v) if !allowed.contains(&v) => Err(ValidationError::NotAllowed {
            field: field.to_string(),
            allowed: allowed.iter().map(|a| a.to_string()).collect(),
        }),
        _ => Ok(()),
    }
}

/// Throws away this session's changes and reloads the seed data.
pub fn reset(session: &mut Session) -> Result<HomeView, ApiError> {
    session.reset();
    home(session)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taller_store::Clock;

    use super::*;
    use crate::error::ErrorCode;

    fn session() -> Session {
        let today = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        Session::new(ConfigState::default(), Clock::Fixed(today))
    }

    #[test]
    fn test_home_view() {
        let session = session();
        let view = home(&session).unwrap();
        assert_eq!(view.profile.name, "AutoTaller Pro");
        assert_eq!(view.featured_services.len(), 4);
        assert_eq!(view.total_appointments, 2);
        assert_eq!(view.appointments_today, 0);
    }

    #[test]
    fn test_login_and_logout() {
        let mut session = session();
        assert_eq!(
            login(&mut session, "admin", "wrong").unwrap_err().code,
            ErrorCode::InvalidCredentials
        );
        assert!(login(&mut session, "admin", "admin123").unwrap().authenticated);
        assert!(!logout(&mut session).unwrap().authenticated);
        assert!(session.require_admin().is_err());
    }

    #[test]
    fn test_update_profile() {
        let mut session = session();
        let update = ProfileUpdate {
            name: Some("Taller Sur".to_string()),
            opens_at: Some("07:00".to_string()),
            ..ProfileUpdate::default()
        };
        assert_eq!(
            update_profile(&mut session, update.clone()).unwrap_err().code,
            ErrorCode::Unauthorized
        );

        login(&mut session, "admin", "admin123").unwrap();
        let profile = update_profile(&mut session, update).unwrap();
        assert_eq!(profile.name, "Taller Sur");
        assert_eq!(profile.opens_at, "07:00");
        assert_eq!(profile.closes_at, "18:00");
        assert_eq!(get_config(&session).unwrap().profile.name, "Taller Sur");
    }

    #[test]
    fn test_update_profile_rejects_bad_choice() {
        let mut session = session();
        login(&mut session, "admin", "admin123").unwrap();
        let err = update_profile(
            &mut session,
            ProfileUpdate {
                name: Some("Otro".to_string()),
                closes_at: Some("23:00".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(session.config().profile.name, "AutoTaller Pro");
    }

    #[test]
    fn test_reset() {
        let mut session = session();
        session.store_mut().cancel("CIT001").unwrap();
        reset(&mut session).unwrap();
        assert!(session.store().appointment("CIT001").unwrap().status.is_open());
    }
}
