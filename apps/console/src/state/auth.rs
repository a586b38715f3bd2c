//! # Admin Gate
//!
//! A single boolean guarding the administration views.
//!
//! ```text
//!   login(admin, admin123) ──► authenticated = true  ──► reports, calendar,
//!                                                        dashboard, catalog
//!   logout()               ──► authenticated = false     additions, profile
//! ```
//!
//! One fixed credential, no expiry, no lockout.

use tracing::{info, warn};

use crate::error::{ApiError, ErrorCode};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Default)]
pub struct AdminGate {
    authenticated: bool,
}

impl AdminGate {
    pub fn new() -> Self {
        AdminGate::default()
    }

    /// Sets the flag if the credential matches, otherwise leaves it as is.
    pub fn login(&mut self, user: &str, password: &str) -> Result<(), ApiError> {
        if user == ADMIN_USER && password == ADMIN_PASSWORD {
            self.authenticated = true;
            info!(user, "Admin logged in");
            Ok(())
        } else {
            warn!(user, "Rejected admin login");
            Err(ApiError::new(
                ErrorCode::InvalidCredentials,
                "Invalid user or password",
            ))
        }
    }

    pub fn logout(&mut self) {
        if self.authenticated {
            info!("Admin logged out");
        }
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// `Unauthorized` unless logged in.
    pub fn require(&self) -> Result<(), ApiError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(ApiError::unauthorized())
        }
    }
}
