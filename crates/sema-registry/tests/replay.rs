//! End-to-end replay scenarios through the in-memory log.
//!
//! Each test drives the full pipeline: a publisher writes JSON updates to
//! the log, a running registry tails them into its view, and readers
//! observe the result.

use std::time::Duration;

use sema_core::{Alias, NameVersion, SchemaId};
use sema_log::InMemoryLog;
use sema_registry::{AvroValue, Error, LocalRegistry, Readiness, SchemaPublisher};

const ROW_SPEC: &str = r#"{
    "type": "record",
    "name": "Row",
    "fields": [
        {"name": "id", "type": "long"},
        {"name": "name", "type": "string"}
    ]
}"#;

fn row(id: i64, name: &str) -> AvroValue {
    AvroValue::Record(vec![
        ("id".to_string(), AvroValue::Long(id)),
        ("name".to_string(), AvroValue::String(name.to_string())),
    ])
}

async fn assert_ready(sink: Readiness) {
    let ready = tokio::time::timeout(Duration::from_secs(2), sink.wait())
        .await
        .expect("readiness sink should resolve");
    assert!(ready, "readiness sink should yield true");
}

/// Waits until the tail has caught up far enough for `predicate` to hold.
async fn converge<F: Fn() -> bool>(predicate: F) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !predicate() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("view should converge");
}

#[tokio::test]
async fn alias_arrives_first() {
    let log = InMemoryLog::new();
    let registry = LocalRegistry::start(log.consumer()).await.unwrap();
    let store = registry.store();
    let publisher = SchemaPublisher::new(log.clone());

    let id = SchemaId::generate();
    let alias = Alias::new("foo-v0");
    let sink = store.wait_alias_ready(&alias);

    publisher.update_alias(&alias, id).await.unwrap();
    publisher.update_schema(id, ROW_SPEC).await.unwrap();

    assert_ready(sink).await;
    assert_eq!(store.who_is(&alias), Some(id));

    registry.shutdown().await;
}

#[tokio::test]
async fn spec_arrives_first() {
    let log = InMemoryLog::new();
    let registry = LocalRegistry::start(log.consumer()).await.unwrap();
    let store = registry.store();
    let publisher = SchemaPublisher::new(log.clone());

    let id = SchemaId::generate();
    let alias = Alias::new("foo-v0");
    let sink = store.wait_alias_ready(&alias);

    publisher.update_schema(id, ROW_SPEC).await.unwrap();
    publisher.update_alias(&alias, id).await.unwrap();

    assert_ready(sink).await;
    assert_eq!(store.who_is(&alias), Some(id));

    registry.shutdown().await;
}

#[tokio::test]
async fn invalid_spec_is_skipped_until_corrected() {
    let log = InMemoryLog::new();
    let registry = LocalRegistry::start(log.consumer()).await.unwrap();
    let store = registry.store();
    let publisher = SchemaPublisher::new(log.clone());

    let id = SchemaId::generate();
    let sentinel = SchemaId::generate();
    publisher.update_schema(id, "{not avro").await.unwrap();

    // The sentinel is published after the bad record on the same topic;
    // once it is ready the tail has already passed (and dropped) the bad
    // record.
    let fence = store.wait_schema_ready(sentinel);
    publisher.update_schema(sentinel, "\"long\"").await.unwrap();
    assert_ready(fence).await;
    assert_eq!(store.specification(id), None);

    let sink = store.wait_schema_ready(id);
    publisher.update_schema(id, ROW_SPEC).await.unwrap();

    assert_ready(sink).await;
    assert_eq!(store.specification(id).as_deref(), Some(ROW_SPEC));

    registry.shutdown().await;
}

#[tokio::test]
async fn overwrite_serves_the_last_writer() {
    let log = InMemoryLog::new();
    let registry = LocalRegistry::start(log.consumer()).await.unwrap();
    let store = registry.store();
    let publisher = SchemaPublisher::new(log.clone());

    let id = SchemaId::generate();
    publisher.update_schema(id, "\"long\"").await.unwrap();
    publisher.update_schema(id, "\"string\"").await.unwrap();

    converge(|| store.specification(id).as_deref() == Some("\"string\"")).await;

    registry.shutdown().await;
}

#[tokio::test]
async fn encode_decode_roundtrip() {
    let log = InMemoryLog::new();
    let registry = LocalRegistry::start(log.consumer()).await.unwrap();
    let store = registry.store();
    let publisher = SchemaPublisher::new(log.clone());

    let id = SchemaId::generate();
    let sink = store.wait_schema_ready(id);
    publisher.update_schema(id, ROW_SPEC).await.unwrap();
    assert_ready(sink).await;

    let value = row(7, "x");
    let binary = store.encode(id, value.clone()).unwrap();
    assert_eq!(store.decode(id, &binary).unwrap(), value);

    registry.shutdown().await;
}

#[tokio::test]
async fn versioned_roundtrip_through_the_log() {
    let log = InMemoryLog::new();
    let registry = LocalRegistry::start(log.consumer()).await.unwrap();
    let store = registry.store();
    let publisher = SchemaPublisher::new(log.clone());

    let id = SchemaId::generate();
    let version: NameVersion = "mySchema-vd".parse().unwrap();
    assert_eq!(version, NameVersion::new("mySchema", 13));
    assert_eq!(version.to_string(), "mySchema-vd");

    let sink = store.wait_version_ready(&version);
    publisher.update_schema(id, ROW_SPEC).await.unwrap();
    publisher.update_alias(&version.alias(), id).await.unwrap();
    assert_ready(sink).await;

    let binary = store.encode_version(&version, row(1, "a")).unwrap();
    assert_eq!(store.decode_version(&version, &binary).unwrap(), row(1, "a"));

    registry.shutdown().await;
}

#[tokio::test]
async fn reads_against_an_empty_view_are_not_present() {
    let log = InMemoryLog::new();
    let registry = LocalRegistry::start(log.consumer()).await.unwrap();
    let store = registry.store();

    let id = SchemaId::generate();
    assert_eq!(store.specification(id), None);
    assert_eq!(store.who_is(&Alias::new("missing-v0")), None);
    assert_eq!(store.count(), 0);
    assert!(store.list_schemata().is_empty());
    assert!(store.list_aliases().is_empty());
    assert!(matches!(
        store.decode(id, &[]).unwrap_err(),
        Error::SchemaNotPresent { .. }
    ));

    registry.shutdown().await;
}

#[tokio::test]
async fn late_consumer_replays_the_full_history() {
    let log = InMemoryLog::new();
    let publisher = SchemaPublisher::new(log.clone());

    let id = SchemaId::generate();
    let alias = Alias::new("events-v0");
    publisher.update_schema(id, ROW_SPEC).await.unwrap();
    publisher.update_alias(&alias, id).await.unwrap();

    // The registry starts only after the history exists.
    let registry = LocalRegistry::start(log.consumer()).await.unwrap();
    let store = registry.store();

    let sink = store.wait_alias_ready(&alias);
    assert_ready(sink).await;
    assert_eq!(store.count(), 1);
    assert_eq!(store.who_is(&alias), Some(id));

    registry.shutdown().await;
}
