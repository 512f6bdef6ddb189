//! JSON envelopes served by the explorer.
//!
//! Field names mirror the wire contract the original clients expect:
//! `count`, `schemata`, `aliases`, `uuid`, `spec`, `alias`.

use serde::{Deserialize, Serialize};

use sema_core::{Alias, SchemaId};

/// Response body for `GET /schema/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaListBody {
    /// Number of schemata in the view.
    pub count: usize,
    /// All schema IDs.
    pub schemata: Vec<SchemaId>,
}

/// One described schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaBody {
    /// The schema ID.
    pub uuid: SchemaId,
    /// The specification text.
    pub spec: String,
}

/// Response body for `GET /schema/describe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemataBody {
    /// The described schemata; unknown IDs are omitted.
    pub schemata: Vec<SchemaBody>,
}

/// Response body for `GET /alias/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasListBody {
    /// Number of aliases in the view.
    pub count: usize,
    /// All aliases.
    pub aliases: Vec<Alias>,
}

/// One described alias binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasBody {
    /// The alias.
    pub alias: Alias,
    /// The schema it is bound to.
    pub uuid: SchemaId,
}

/// Response body for `GET /alias/describe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasesBody {
    /// The described bindings; unknown aliases are omitted.
    pub aliases: Vec<AliasBody>,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthBody {
    /// Service status.
    pub status: String,
}

/// Response body for `GET /ready`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyBody {
    /// Whether the view is being fed by a running tail.
    pub ready: bool,
    /// Number of schemata currently in the view.
    pub schemata: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_body_field_names_are_stable() {
        let id = SchemaId::generate();
        let body = SchemaListBody {
            count: 1,
            schemata: vec![id],
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&body).unwrap()).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["schemata"][0], id.to_string());
    }

    #[test]
    fn alias_body_field_names_are_stable() {
        let id = SchemaId::generate();
        let body = AliasBody {
            alias: Alias::new("events-v0"),
            uuid: id,
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&body).unwrap()).unwrap();
        assert_eq!(json["alias"], "events-v0");
        assert_eq!(json["uuid"], id.to_string());
    }
}
