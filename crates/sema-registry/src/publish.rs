//! Producer-side façade for writing registry updates.

use bytes::Bytes;

use sema_core::{Alias, SchemaId};
use sema_log::LogProducer;

use crate::error::{Error, Result};
use crate::wire::{ALIAS_TOPIC, SCHEMA_TOPIC, AliasUpdate, SchemaUpdate};

/// Publishes schema and alias updates to the commit log.
///
/// Both operations are synchronous in the broker sense: they return only
/// once the broker has acknowledged persistence, and surface the broker's
/// error verbatim otherwise.
#[derive(Debug)]
pub struct SchemaPublisher<P> {
    producer: P,
}

impl<P: LogProducer> SchemaPublisher<P> {
    /// Creates a publisher over the given producer.
    #[must_use]
    pub fn new(producer: P) -> Self {
        Self { producer }
    }

    /// Sets the given schema to equal the given plain-text Avro spec.
    ///
    /// The spec is published as-is; consumers compile and validate it on
    /// their side and drop records that do not parse.
    ///
    /// # Errors
    ///
    /// Returns the broker's transport error when the publish fails.
    pub async fn update_schema(&self, schema: SchemaId, specification: &str) -> Result<()> {
        let update = SchemaUpdate {
            schema_id: schema,
            spec: specification.to_string(),
        };
        self.publish(SCHEMA_TOPIC, &update).await?;
        tracing::info!(schema_id = %schema, "schema update published");
        Ok(())
    }

    /// Binds the given alias to the given schema.
    ///
    /// # Errors
    ///
    /// Returns the broker's transport error when the publish fails.
    pub async fn update_alias(&self, alias: &Alias, schema: SchemaId) -> Result<()> {
        let update = AliasUpdate {
            schema_id: schema,
            alias: alias.clone(),
        };
        self.publish(ALIAS_TOPIC, &update).await?;
        tracing::info!(alias = %alias, schema_id = %schema, "alias update published");
        Ok(())
    }

    async fn publish<T: serde::Serialize>(&self, topic: &str, update: &T) -> Result<()> {
        let payload = serde_json::to_vec(update).map_err(|e| Error::Serialization {
            message: e.to_string(),
        })?;
        self.producer.publish(topic, Bytes::from(payload)).await?;
        Ok(())
    }
}
