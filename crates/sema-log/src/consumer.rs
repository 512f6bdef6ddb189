//! Consumer seam and configuration.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::Record;

/// Default session timeout for broker-backed consumers.
const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(6);

/// Configuration for a log consumer.
///
/// The semantics the registry depends on are baked in and not
/// configurable: earliest-offset reset (every consumer replays the full
/// history) and IPv4 addressing. Only the knobs that vary per deployment
/// are exposed.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Broker bootstrap address, e.g. `localhost:9092`.
    pub brokers: String,
    /// Consumer group id.
    ///
    /// When `None`, a fresh group id is fabricated at connect time so the
    /// process replays the full log. Pinning a group id shares consumption
    /// progress across restarts; never share one across live processes, or
    /// they will each see only a slice of the history.
    pub group_id: Option<String>,
    /// Broker session timeout.
    pub session_timeout: Duration,
}

impl ConsumerConfig {
    /// Creates a config for the given bootstrap address with defaults.
    #[must_use]
    pub fn new(brokers: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            group_id: None,
            session_timeout: DEFAULT_SESSION_TIMEOUT,
        }
    }

    /// Pins an explicit consumer group id.
    #[must_use]
    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Overrides the session timeout.
    #[must_use]
    pub fn with_session_timeout(mut self, session_timeout: Duration) -> Self {
        self.session_timeout = session_timeout;
        self
    }
}

/// A tailing consumer of commit-log topics.
///
/// Implementations deliver records of the subscribed topics in per-topic
/// offset order. The registry drives exactly one consumer per tail from a
/// single task, so methods take `&mut self` and need not be reentrant.
#[async_trait]
pub trait LogConsumer: Send + 'static {
    /// Subscribes to the given topics, starting from the earliest offset.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the subscription cannot be established.
    async fn subscribe(&mut self, topics: &[String]) -> Result<()>;

    /// Waits for and returns the next record.
    ///
    /// Returns `Ok(None)` when the stream has ended and no further records
    /// will be delivered (a closed in-memory log; broker backends never end).
    ///
    /// # Errors
    ///
    /// Returns a transport error on poll failure. The caller decides
    /// whether to retry; the consumer remains usable.
    async fn next_record(&mut self) -> Result<Option<Record>>;

    /// Releases the subscription.
    fn close(&mut self);
}
