//! The materialized schema view.
//!
//! A [`SchemaStore`] owns the two observable maps (schema to codec,
//! alias to schema) plus the handlers that fold log records into them,
//! the read-side operations, and the readiness waits that compose the two
//! maps.
//!
//! ## Composite readiness
//!
//! The two event streams are independent in time: an alias may land
//! before the spec it points at, or after. [`SchemaStore::wait_alias_ready`]
//! hides that race: it resolves only once both the alias binding and the
//! compiled codec are present, in whichever order they arrive.

use std::sync::Arc;

use sema_core::{Alias, NameVersion, SchemaId};
use sema_log::Record;

use crate::codec::{AvroCodec, AvroValue};
use crate::error::{Error, Result};
use crate::metrics;
use crate::observe::{ObservableMap, Readiness};
use crate::wire::{ALIAS_TOPIC, SCHEMA_TOPIC, AliasUpdate, SchemaUpdate};

/// The consumer-side materialized view of the schema log.
///
/// Cloning yields another handle onto the same view; the log tail, the
/// HTTP façade, and any number of waiting callers all share one store.
#[derive(Clone, Debug, Default)]
pub struct SchemaStore {
    schemata: ObservableMap<SchemaId, Arc<AvroCodec>>,
    aliases: ObservableMap<Alias, SchemaId>,
}

impl SchemaStore {
    /// Creates an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Log handlers
    // ------------------------------------------------------------------

    /// Folds one `schema_update` record into the view.
    ///
    /// The specification is compiled before anything is stored; a record
    /// carrying an invalid spec is dropped and the schema keeps its
    /// previous codec, if any. Upstream corrections arrive as newer
    /// records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] for non-JSON payloads and
    /// [`Error::InvalidSpec`] for specs that do not compile. Both are
    /// skip-and-continue conditions for the tail.
    pub fn apply_schema_update(&self, record: &Record) -> Result<()> {
        let update: SchemaUpdate = serde_json::from_slice(&record.payload).map_err(|e| {
            metrics::record_skip(SCHEMA_TOPIC);
            Error::malformed_record(e.to_string())
        })?;

        let codec = AvroCodec::compile(&update.spec).map_err(|e| {
            metrics::record_skip(SCHEMA_TOPIC);
            e
        })?;

        let overwritten = self.schemata.insert(update.schema_id, Arc::new(codec));
        metrics::record_update(SCHEMA_TOPIC);
        metrics::set_schema_count(self.schemata.len());
        tracing::info!(schema_id = %update.schema_id, overwritten, "schema update applied");
        Ok(())
    }

    /// Folds one `schema_alias` record into the view.
    ///
    /// The binding is stored unconditionally; the schema it references
    /// need not have been consumed yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] for non-JSON payloads.
    pub fn apply_alias_update(&self, record: &Record) -> Result<()> {
        let update: AliasUpdate = serde_json::from_slice(&record.payload).map_err(|e| {
            metrics::record_skip(ALIAS_TOPIC);
            Error::malformed_record(e.to_string())
        })?;

        let overwritten = self.aliases.insert(update.alias.clone(), update.schema_id);
        metrics::record_update(ALIAS_TOPIC);
        tracing::info!(
            alias = %update.alias,
            schema_id = %update.schema_id,
            overwritten,
            "alias update applied"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    /// Returns all schema IDs currently in the view.
    #[must_use]
    pub fn list_schemata(&self) -> Vec<SchemaId> {
        self.schemata.keys()
    }

    /// Returns all aliases currently in the view.
    #[must_use]
    pub fn list_aliases(&self) -> Vec<Alias> {
        self.aliases.keys()
    }

    /// Returns the specification text for a schema, if present.
    #[must_use]
    pub fn specification(&self, schema: SchemaId) -> Option<String> {
        self.schemata
            .get(&schema)
            .map(|codec| codec.specification().to_string())
    }

    /// Looks up the schema an alias is bound to.
    #[must_use]
    pub fn who_is(&self, alias: &Alias) -> Option<SchemaId> {
        self.aliases.get(alias)
    }

    /// Returns the number of schemata in the view.
    #[must_use]
    pub fn count(&self) -> usize {
        self.schemata.len()
    }

    /// Returns the compiled codec for a schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaNotPresent`] when the schema is not (yet)
    /// in the view.
    pub fn codec(&self, schema: SchemaId) -> Result<Arc<AvroCodec>> {
        self.schemata
            .get(&schema)
            .ok_or(Error::SchemaNotPresent { schema_id: schema })
    }

    /// Encodes a native value with the given schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaNotPresent`] for unknown schemata and
    /// [`Error::Codec`] for nonconforming values.
    pub fn encode(&self, schema: SchemaId, datum: AvroValue) -> Result<Vec<u8>> {
        self.codec(schema)?.encode(datum)
    }

    /// Decodes Avro binary with the given schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaNotPresent`] for unknown schemata and
    /// [`Error::Codec`] for malformed data.
    pub fn decode(&self, schema: SchemaId, datum: &[u8]) -> Result<AvroValue> {
        self.codec(schema)?.decode(datum)
    }

    /// Encodes with the schema bound to a versioned alias.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AliasNotPresent`] when the version's alias is
    /// unknown, otherwise as [`SchemaStore::encode`].
    pub fn encode_version(&self, version: &NameVersion, datum: AvroValue) -> Result<Vec<u8>> {
        let schema = self.resolve_version(version)?;
        self.encode(schema, datum)
    }

    /// Decodes with the schema bound to a versioned alias.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AliasNotPresent`] when the version's alias is
    /// unknown, otherwise as [`SchemaStore::decode`].
    pub fn decode_version(&self, version: &NameVersion, datum: &[u8]) -> Result<AvroValue> {
        let schema = self.resolve_version(version)?;
        self.decode(schema, datum)
    }

    fn resolve_version(&self, version: &NameVersion) -> Result<SchemaId> {
        let alias = version.alias();
        self.who_is(&alias)
            .ok_or(Error::AliasNotPresent { alias })
    }

    // ------------------------------------------------------------------
    // Readiness
    // ------------------------------------------------------------------

    /// Returns a sink that resolves once the schema is in the view.
    ///
    /// Resolves immediately when the schema is already present.
    #[must_use]
    pub fn wait_schema_ready(&self, schema: SchemaId) -> Readiness {
        self.schemata.observe(&schema)
    }

    /// Returns a sink that resolves once the alias **and** the schema it
    /// points at are both in the view.
    ///
    /// The two updates may arrive in either order. When the alias is not
    /// yet known, a background task waits for the binding, re-reads it,
    /// then waits for the schema; shutdown at any stage aborts the sink
    /// with `false`.
    #[must_use]
    pub fn wait_alias_ready(&self, alias: &Alias) -> Readiness {
        if let Some(schema) = self.who_is(alias) {
            return self.wait_schema_ready(schema);
        }

        let (done, readiness) = Readiness::channel();
        let store = self.clone();
        let alias = alias.clone();
        tokio::spawn(async move {
            if !store.aliases.observe(&alias).wait().await {
                let _ = done.send(false);
                return;
            }
            let Some(schema) = store.who_is(&alias) else {
                let _ = done.send(false);
                return;
            };
            let ready = store.wait_schema_ready(schema).wait().await;
            let _ = done.send(ready);
        });
        readiness
    }

    /// Returns a sink that resolves once the versioned alias is ready.
    ///
    /// Equivalent to [`SchemaStore::wait_alias_ready`] on the rendered
    /// alias.
    #[must_use]
    pub fn wait_version_ready(&self, version: &NameVersion) -> Readiness {
        self.wait_alias_ready(&version.alias())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Shuts the view down, aborting every outstanding readiness sink.
    ///
    /// Entries remain readable; only notification is torn down.
    pub fn close(&self) {
        self.schemata.close();
        self.aliases.close();
    }
}
