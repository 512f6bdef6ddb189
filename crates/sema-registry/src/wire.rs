//! Wire contract for the schema topics.
//!
//! Both topics carry UTF-8 JSON. Field names are part of the contract and
//! must not drift: `UUID` (uppercase), `spec`, `alias`. Record keys are
//! unused; both topics should be single-partition so that log order is
//! last-writer-wins order.

use serde::{Deserialize, Serialize};

use sema_core::{Alias, SchemaId};

/// Topic carrying schema specification updates.
pub const SCHEMA_TOPIC: &str = "schema_update";

/// Topic carrying alias binding updates.
pub const ALIAS_TOPIC: &str = "schema_alias";

/// Sets the given schema to equal the given plain-text Avro spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaUpdate {
    /// The schema being updated.
    #[serde(rename = "UUID")]
    pub schema_id: SchemaId,
    /// The new Avro specification text.
    pub spec: String,
}

/// Binds the given alias to the given schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasUpdate {
    /// The schema the alias points at.
    #[serde(rename = "UUID")]
    pub schema_id: SchemaId,
    /// The alias being bound.
    pub alias: Alias,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_update_wire_shape() {
        let id = SchemaId::generate();
        let update = SchemaUpdate {
            schema_id: id,
            spec: "\"long\"".to_string(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&update).unwrap()).unwrap();
        assert_eq!(json["UUID"], id.to_string());
        assert_eq!(json["spec"], "\"long\"");
    }

    #[test]
    fn alias_update_wire_shape() {
        let id = SchemaId::generate();
        let update = AliasUpdate {
            schema_id: id,
            alias: Alias::new("events-v0"),
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&update).unwrap()).unwrap();
        assert_eq!(json["UUID"], id.to_string());
        assert_eq!(json["alias"], "events-v0");
    }

    #[test]
    fn decodes_foreign_producer_payloads() {
        let raw = r#"{"UUID": "8c3f43f4-59ea-4621-a5b8-69573b2f1f7f", "alias": "metrics-v1"}"#;
        let update: AliasUpdate = serde_json::from_str(raw).unwrap();
        assert_eq!(update.alias, Alias::new("metrics-v1"));
    }
}
