//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (taller-core)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds lookup and uniqueness failures         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in console app) ← Serialized for the front end               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use taller_core::{CoreError, ValidationError};
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    ///
    /// ## When This Occurs
    /// - Unknown appointment / client / vehicle / item id
    /// - Booking names a service missing from the catalog
    /// - A vehicle's owner is missing when joining
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique key already taken.
    ///
    /// ## When This Occurs
    /// - Adding a service whose name is already in the catalog
    /// - Adding an inventory item whose name is already stocked
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A record references something that cannot be used.
    ///
    /// ## When This Occurs
    /// - Booking an existing client that has no vehicle on file
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// No unused id could be drawn.
    #[error("Could not generate a unique {prefix} id after {attempts} attempts")]
    IdExhausted { prefix: String, attempts: u32 },

    /// Business rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Form validation failure.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_and_messages() {
        let err = StoreError::not_found("Appointment", "CIT999");
        assert_eq!(err.to_string(), "Appointment not found: CIT999");

        let err = StoreError::duplicate("service name", "Cambio de aceite");
        assert_eq!(
            err.to_string(),
            "Duplicate service name: 'Cambio de aceite' already exists"
        );
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: StoreError = ValidationError::Required {
            field: "phone".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "phone is required");
    }
}
