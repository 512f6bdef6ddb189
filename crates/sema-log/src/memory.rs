//! In-memory commit log for tests and development.
//!
//! [`InMemoryLog`] is a single-process stand-in for the broker: an
//! append-only record list shared by any number of consumers, each of
//! which replays from offset 0 and then receives live appends in publish
//! order. Producer acknowledgement is immediate.
//!
//! ## Limitations
//!
//! - **NOT suitable for production**: no persistence, no distribution
//! - **Single-process only**: records are not visible across processes

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::sync::watch;

use crate::consumer::LogConsumer;
use crate::error::Result;
use crate::producer::LogProducer;
use crate::record::Record;

type RecordLog = Arc<Mutex<Vec<Record>>>;

fn lock(records: &RecordLog) -> MutexGuard<'_, Vec<Record>> {
    records.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A single-process, append-only commit log.
///
/// Cloning yields another handle onto the same log. The log itself is the
/// producer; consumers are created with [`InMemoryLog::consumer`]. Once
/// every log handle is dropped, blocked consumers observe end of stream.
#[derive(Clone)]
pub struct InMemoryLog {
    records: RecordLog,
    /// Bumped on every append; consumers block on changes, which `watch`
    /// delivers without missed edges.
    version: Arc<watch::Sender<u64>>,
}

impl Default for InMemoryLog {
    fn default() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            version: Arc::new(version),
        }
    }
}

impl std::fmt::Debug for InMemoryLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLog")
            .field("records", &lock(&self.records).len())
            .finish()
    }
}

impl InMemoryLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a consumer that replays the log from offset 0.
    #[must_use]
    pub fn consumer(&self) -> InMemoryConsumer {
        InMemoryConsumer {
            records: Arc::clone(&self.records),
            version: self.version.subscribe(),
            topics: Vec::new(),
            cursor: 0,
            closed: false,
        }
    }

    /// Returns all records published to the given topic, in offset order.
    #[must_use]
    pub fn records(&self, topic: &str) -> Vec<Record> {
        lock(&self.records)
            .iter()
            .filter(|record| record.topic == topic)
            .cloned()
            .collect()
    }

    /// Returns the total number of records across all topics.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    /// Returns true when nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LogProducer for InMemoryLog {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<()> {
        {
            let mut records = lock(&self.records);
            let offset = records.iter().filter(|r| r.topic == topic).count() as u64;
            records.push(Record {
                topic: topic.to_string(),
                key: None,
                payload,
                offset: Some(offset),
                timestamp: Some(Utc::now()),
            });
        }
        self.version.send_modify(|v| *v = v.wrapping_add(1));
        Ok(())
    }
}

/// A consumer over an [`InMemoryLog`].
///
/// Replays every record of its subscribed topics from the beginning, then
/// blocks for live appends. The stream ends after [`LogConsumer::close`]
/// or once the remaining records are drained after the last log handle
/// was dropped.
pub struct InMemoryConsumer {
    records: RecordLog,
    version: watch::Receiver<u64>,
    topics: Vec<String>,
    cursor: usize,
    closed: bool,
}

impl InMemoryConsumer {
    fn advance(&mut self) -> Option<Record> {
        let records = lock(&self.records);
        while self.cursor < records.len() {
            let record = &records[self.cursor];
            self.cursor += 1;
            if self.topics.iter().any(|topic| *topic == record.topic) {
                return Some(record.clone());
            }
        }
        None
    }
}

#[async_trait]
impl LogConsumer for InMemoryConsumer {
    async fn subscribe(&mut self, topics: &[String]) -> Result<()> {
        self.topics = topics.to_vec();
        Ok(())
    }

    async fn next_record(&mut self) -> Result<Option<Record>> {
        loop {
            if self.closed {
                return Ok(None);
            }
            if let Some(record) = self.advance() {
                return Ok(Some(record));
            }
            // Appends between advance() and here are not lost: changed()
            // resolves immediately when the version moved since it was
            // last observed. An error means every producer handle is gone.
            if self.version.changed().await.is_err() {
                return Ok(None);
            }
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn replays_from_the_beginning() -> Result<()> {
        let log = InMemoryLog::new();
        log.publish("t", Bytes::from_static(b"a")).await?;
        log.publish("t", Bytes::from_static(b"b")).await?;

        let mut consumer = log.consumer();
        consumer.subscribe(&["t".to_string()]).await?;

        let first = consumer.next_record().await?.unwrap();
        let second = consumer.next_record().await?.unwrap();
        assert_eq!(&first.payload[..], b"a");
        assert_eq!(first.offset, Some(0));
        assert_eq!(&second.payload[..], b"b");
        assert_eq!(second.offset, Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn live_appends_wake_blocked_consumers() -> Result<()> {
        let log = InMemoryLog::new();
        let mut consumer = log.consumer();
        consumer.subscribe(&["t".to_string()]).await?;

        let writer = log.clone();
        let publisher = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            writer.publish("t", Bytes::from_static(b"live")).await
        });

        let record = tokio::time::timeout(Duration::from_secs(1), consumer.next_record())
            .await
            .expect("consumer should be woken")?
            .unwrap();
        assert_eq!(&record.payload[..], b"live");
        publisher.await.unwrap()?;
        Ok(())
    }

    #[tokio::test]
    async fn unsubscribed_topics_are_invisible() -> Result<()> {
        let log = InMemoryLog::new();
        log.publish("other", Bytes::from_static(b"x")).await?;
        log.publish("mine", Bytes::from_static(b"y")).await?;

        let mut consumer = log.consumer();
        consumer.subscribe(&["mine".to_string()]).await?;

        let record = consumer.next_record().await?.unwrap();
        assert_eq!(record.topic, "mine");
        Ok(())
    }

    #[tokio::test]
    async fn close_ends_the_stream() -> Result<()> {
        let log = InMemoryLog::new();
        let mut consumer = log.consumer();
        consumer.subscribe(&["t".to_string()]).await?;
        consumer.close();
        assert!(consumer.next_record().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn dropping_the_log_drains_then_ends_the_stream() -> Result<()> {
        let log = InMemoryLog::new();
        log.publish("t", Bytes::from_static(b"last")).await?;

        let mut consumer = log.consumer();
        consumer.subscribe(&["t".to_string()]).await?;
        drop(log);

        let record = consumer.next_record().await?.unwrap();
        assert_eq!(&record.payload[..], b"last");
        assert!(consumer.next_record().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn per_topic_offsets_are_independent() -> Result<()> {
        let log = InMemoryLog::new();
        log.publish("a", Bytes::from_static(b"1")).await?;
        log.publish("b", Bytes::from_static(b"2")).await?;
        log.publish("a", Bytes::from_static(b"3")).await?;

        let a = log.records("a");
        let b = log.records("b");
        assert_eq!(a.len(), 2);
        assert_eq!(a[1].offset, Some(1));
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].offset, Some(0));
        Ok(())
    }
}
