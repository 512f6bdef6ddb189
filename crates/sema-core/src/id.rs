//! Strongly-typed identifier for schemata.
//!
//! Schemata are addressed by a 128-bit opaque identifier minted by the
//! creator. All other addressing mechanisms (aliases, versions) are built
//! on top of this. The identifier is:
//!
//! - **Strongly typed**: cannot be confused with other UUIDs at compile time
//! - **Creator-generated**: no coordination with the log or other producers
//! - **Opaque**: carries no ordering or timestamp semantics
//!
//! # Example
//!
//! ```rust
//! use sema_core::id::SchemaId;
//!
//! let id = SchemaId::generate();
//! let parsed: SchemaId = id.to_string().parse().unwrap();
//! assert_eq!(id, parsed);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// A unique identifier for a schema.
///
/// Creators mint a fresh `SchemaId` when publishing a new specification;
/// consumers key their materialized view on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(Uuid);

impl SchemaId {
    /// Generates a new random schema ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a schema ID from a raw UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SchemaId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s).map(Self).map_err(|e| Error::InvalidId {
            message: format!("invalid schema ID '{s}': {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_id_roundtrip() {
        let id = SchemaId::generate();
        let s = id.to_string();
        let parsed: SchemaId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(SchemaId::generate(), SchemaId::generate());
    }

    #[test]
    fn serde_is_transparent() {
        let id = SchemaId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }

    #[test]
    fn invalid_id_returns_error() {
        let result: Result<SchemaId> = "not-a-valid-uuid".parse();
        assert!(result.is_err());
    }
}
