//! Kafka-backed consumer and producer.
//!
//! Wraps `rdkafka`'s `StreamConsumer` and `FutureProducer` behind the
//! [`LogConsumer`] / [`LogProducer`] seams. Consumer semantics follow the
//! registry's contract: earliest-offset reset, a fabricated per-process
//! consumer group unless one is pinned, IPv4 addressing, and a short
//! session timeout.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::DateTime;
use rdkafka::ClientConfig;
use rdkafka::Message;
use rdkafka::consumer::{Consumer as _, StreamConsumer};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;

use crate::consumer::{ConsumerConfig, LogConsumer};
use crate::error::{Error, Result};
use crate::producer::LogProducer;
use crate::record::Record;

/// How long a publish may wait for the broker ack.
const PUBLISH_ACK_TIMEOUT: Duration = Duration::from_secs(30);

/// A tailing Kafka consumer.
pub struct KafkaConsumer {
    inner: StreamConsumer,
}

impl KafkaConsumer {
    /// Connects to the broker described by `config`.
    ///
    /// When no group id is pinned, a fresh `sema-view-<uuid>` group is
    /// fabricated so this process replays the full log.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the client cannot be created.
    pub fn connect(config: &ConsumerConfig) -> Result<Self> {
        let group_id = config
            .group_id
            .clone()
            .unwrap_or_else(|| format!("sema-view-{}", uuid::Uuid::new_v4()));

        let inner: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &group_id)
            .set("auto.offset.reset", "earliest")
            .set("broker.address.family", "v4")
            .set(
                "session.timeout.ms",
                config.session_timeout.as_millis().to_string(),
            )
            .create()
            .map_err(|e| Error::transport_with_source("failed to create consumer", e))?;

        tracing::info!(brokers = %config.brokers, group_id = %group_id, "log consumer connected");
        Ok(Self { inner })
    }
}

#[async_trait]
impl LogConsumer for KafkaConsumer {
    async fn subscribe(&mut self, topics: &[String]) -> Result<()> {
        let topics: Vec<&str> = topics.iter().map(String::as_str).collect();
        self.inner
            .subscribe(&topics)
            .map_err(|e| Error::transport_with_source("failed to subscribe", e))
    }

    async fn next_record(&mut self) -> Result<Option<Record>> {
        let message = self
            .inner
            .recv()
            .await
            .map_err(|e| Error::transport_with_source("log poll failed", e))?;

        Ok(Some(Record {
            topic: message.topic().to_string(),
            key: message.key().map(Bytes::copy_from_slice),
            payload: message
                .payload()
                .map(Bytes::copy_from_slice)
                .unwrap_or_default(),
            offset: u64::try_from(message.offset()).ok(),
            timestamp: message
                .timestamp()
                .to_millis()
                .and_then(DateTime::from_timestamp_millis),
        }))
    }

    fn close(&mut self) {
        self.inner.unsubscribe();
    }
}

/// A synchronously-acknowledged Kafka producer.
pub struct KafkaProducer {
    inner: FutureProducer,
}

impl KafkaProducer {
    /// Connects to the given bootstrap address.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the client cannot be created.
    pub fn connect(brokers: &str) -> Result<Self> {
        let inner: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set(
                "message.timeout.ms",
                PUBLISH_ACK_TIMEOUT.as_millis().to_string(),
            )
            .create()
            .map_err(|e| Error::transport_with_source("failed to create producer", e))?;

        tracing::info!(brokers = %brokers, "log producer connected");
        Ok(Self { inner })
    }
}

#[async_trait]
impl LogProducer for KafkaProducer {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<()> {
        let record = FutureRecord::<(), [u8]>::to(topic).payload(payload.as_ref());
        self.inner
            .send(record, Timeout::After(PUBLISH_ACK_TIMEOUT))
            .await
            .map(|_| ())
            .map_err(|(e, _)| Error::transport_with_source("publish failed", e))
    }
}
