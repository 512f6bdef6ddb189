//! The running consumer: a store wired to a log tail.
//!
//! [`LocalRegistry`] owns the [`SchemaStore`] and the tail that feeds it.
//! Construction subscribes the consumer to both schema topics and starts
//! folding the log; [`LocalRegistry::shutdown`] stops the tail and closes
//! the maps, aborting every outstanding readiness sink.

use sema_log::{LogConsumer, TailHandle, TopicRouter};

use crate::error::Result;
use crate::store::SchemaStore;
use crate::wire::{ALIAS_TOPIC, SCHEMA_TOPIC};

/// A local materialized view fed by a running log tail.
#[derive(Debug)]
pub struct LocalRegistry {
    store: SchemaStore,
    tail: TailHandle,
}

impl LocalRegistry {
    /// Starts a registry view on the given consumer.
    ///
    /// The consumer is subscribed to the schema and alias topics and
    /// replayed from the earliest offset; the view converges on the log's
    /// state as the tail catches up.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the subscription fails.
    pub async fn start<C: LogConsumer>(consumer: C) -> Result<Self> {
        let store = SchemaStore::new();

        let mut router = TopicRouter::new();
        let schemata = store.clone();
        router.new_route(SCHEMA_TOPIC, move |record| {
            schemata.apply_schema_update(record).map_err(Into::into)
        })?;
        let aliases = store.clone();
        router.new_route(ALIAS_TOPIC, move |record| {
            aliases.apply_alias_update(record).map_err(Into::into)
        })?;

        let tail = router.run(consumer).await?;
        Ok(Self { store, tail })
    }

    /// Returns a handle onto the view.
    #[must_use]
    pub fn store(&self) -> SchemaStore {
        self.store.clone()
    }

    /// Returns true while the tail is consuming.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.tail.is_finished()
    }

    /// Stops the tail and closes the view.
    ///
    /// The in-flight record finishes, the consumer is closed, and every
    /// pending readiness sink resolves with `false`. Entries remain
    /// readable on store handles that outlive the registry.
    pub async fn shutdown(self) {
        self.tail.stop().await;
        self.store.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use sema_core::{Alias, SchemaId};
    use sema_log::{InMemoryLog, LogProducer};
    use std::time::Duration;

    use crate::wire::SchemaUpdate;

    async fn publish_schema(log: &InMemoryLog, schema: SchemaId, spec: &str) {
        let payload = serde_json::to_vec(&SchemaUpdate {
            schema_id: schema,
            spec: spec.to_string(),
        })
        .unwrap();
        log.publish(SCHEMA_TOPIC, Bytes::from(payload)).await.unwrap();
    }

    #[tokio::test]
    async fn registry_folds_published_updates() {
        let log = InMemoryLog::new();
        let registry = LocalRegistry::start(log.consumer()).await.unwrap();
        let store = registry.store();

        let id = SchemaId::generate();
        let sink = store.wait_schema_ready(id);
        publish_schema(&log, id, "\"long\"").await;

        let ready = tokio::time::timeout(Duration::from_secs(1), sink.wait())
            .await
            .expect("schema should become ready");
        assert!(ready);
        assert_eq!(store.specification(id).as_deref(), Some("\"long\""));

        registry.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_aborts_pending_waits() {
        let log = InMemoryLog::new();
        let registry = LocalRegistry::start(log.consumer()).await.unwrap();
        let store = registry.store();

        let sink = store.wait_alias_ready(&Alias::new("never-v0"));
        assert!(registry.is_running());
        registry.shutdown().await;

        let ready = tokio::time::timeout(Duration::from_secs(1), sink.wait())
            .await
            .expect("pending wait should abort");
        assert!(!ready);
    }

    #[tokio::test]
    async fn store_outlives_the_registry() {
        let log = InMemoryLog::new();
        let registry = LocalRegistry::start(log.consumer()).await.unwrap();
        let store = registry.store();

        let id = SchemaId::generate();
        publish_schema(&log, id, "\"long\"").await;
        let sink = store.wait_schema_ready(id);
        assert!(sink.wait().await);

        registry.shutdown().await;
        assert_eq!(store.count(), 1);
    }
}
