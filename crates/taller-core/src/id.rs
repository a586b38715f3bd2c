//! # Record Identifiers
//!
//! Short, human-readable ids with an entity prefix.
//!
//! ```text
//!   CLI A4F9B2
//!   ─┬─ ───┬──
//!    │     └── first 6 hex chars of a UUID v4, uppercased
//!    └──────── entity prefix
//! ```
//!
//! Six hex characters give about 16.7 million values per prefix. Collisions
//! are possible, so the store checks each generated id against the target
//! collection and draws again when it is taken.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

/// Number of random hex characters after the prefix.
pub const ID_RANDOM_LEN: usize = 6;

/// Entity kind encoded in the id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum IdPrefix {
    Client,
    Vehicle,
    Appointment,
    InventoryItem,
}

impl IdPrefix {
    pub const fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::Client => "CLI",
            IdPrefix::Vehicle => "VEH",
            IdPrefix::Appointment => "CIT",
            IdPrefix::InventoryItem => "INV",
        }
    }
}

impl fmt::Display for IdPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generates a fresh id for the given entity kind.
///
/// ## Example
/// ```rust
/// use taller_core::id::{generate_id, IdPrefix};
///
/// let id = generate_id(IdPrefix::Client);
/// assert!(id.starts_with("CLI"));
/// assert_eq!(id.len(), 9);
/// ```
pub fn generate_id(prefix: IdPrefix) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix.as_str(), hex[..ID_RANDOM_LEN].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        for prefix in [
            IdPrefix::Client,
            IdPrefix::Vehicle,
            IdPrefix::Appointment,
            IdPrefix::InventoryItem,
        ] {
            let id = generate_id(prefix);
            assert!(id.starts_with(prefix.as_str()));
            assert_eq!(id.len(), 3 + ID_RANDOM_LEN);
            assert!(id[3..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn test_generate_id_varies() {
        let a = generate_id(IdPrefix::Appointment);
        let b = generate_id(IdPrefix::Appointment);
        let c = generate_id(IdPrefix::Appointment);
        // three equal draws out of 16^6 would mean the generator is broken
        assert!(!(a == b && b == c));
    }
}
