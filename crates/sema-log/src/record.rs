//! The unit of log consumption.

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A single message read from (or destined for) a commit-log topic.
///
/// Record keys are carried through but unused by the registry; the wire
/// contract keys nothing and relies on single-partition topics for
/// last-writer-wins ordering.
#[derive(Debug, Clone)]
pub struct Record {
    /// The topic this record belongs to.
    pub topic: String,
    /// Optional partitioning key.
    pub key: Option<Bytes>,
    /// The message payload.
    pub payload: Bytes,
    /// Offset within the topic partition, when known.
    pub offset: Option<u64>,
    /// Broker-assigned timestamp, when known.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Record {
    /// Creates a record with the given topic and payload.
    #[must_use]
    pub fn new(topic: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            topic: topic.into(),
            key: None,
            payload: payload.into(),
            offset: None,
            timestamp: None,
        }
    }

    /// Sets the partitioning key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}
