//! # Error Types
//!
//! Domain-specific error types for taller-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  taller-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  taller-store errors (separate crate)                                   │
//! │  └── StoreError       - Lookup / uniqueness / id generation failures    │
//! │                                                                         │
//! │  Console API errors (in app)                                            │
//! │  └── ApiError         - What the front end sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Console    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, ID, status)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::AppointmentStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// Missing records are a storage concern and are reported by the store
/// crate; this enum covers rules that can be decided from the values alone.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Status change rejected by the strict transition policy.
    ///
    /// ## When This Occurs
    /// ```text
    /// CIT001 is Completed
    ///      │
    ///      ▼
    /// cancel(CIT001) with TransitionPolicy::Strict
    ///      │
    ///      ▼
    /// InvalidTransition { id: "CIT001", from: Completed, to: Cancelled }
    /// ```
    /// Under the default lenient policy every transition is accepted.
    #[error("Appointment {id} cannot go from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// A booking named a vehicle registered to another client.
    #[error("Vehicle {vehicle_id} does not belong to client {client_id}")]
    VehicleNotOwned {
        vehicle_id: String,
        client_id: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// Used for early validation before anything is written to the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Numeric value is below its lower bound.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: i64 },

    /// Numeric value is above its upper bound.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable date or time slot).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Date lies before the earliest accepted date.
    #[error("{field} cannot be before {earliest}")]
    DateInPast { field: String, earliest: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidTransition {
            id: "CIT001".to_string(),
            from: AppointmentStatus::Completed,
            to: AppointmentStatus::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "Appointment CIT001 cannot go from Completada to Cancelada"
        );

        let err = CoreError::VehicleNotOwned {
            vehicle_id: "VEH002".to_string(),
            client_id: "CLI001".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Vehicle VEH002 does not belong to client CLI001"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "plate".to_string(),
        };
        assert_eq!(err.to_string(), "plate is required");

        let err = ValidationError::OutOfRange {
            field: "year".to_string(),
            min: 1990,
            max: 2024,
        };
        assert_eq!(err.to_string(), "year must be between 1990 and 2024");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
