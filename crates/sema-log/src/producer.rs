//! Producer seam.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// A synchronous-acknowledgement publisher of commit-log records.
///
/// `publish` resolves only once the broker has acknowledged persistence,
/// so a caller that observes `Ok(())` knows the record is in the log.
/// Partitioning is left to the broker; deployments that need strict
/// last-writer-wins ordering use single-partition topics.
#[async_trait]
pub trait LogProducer: Send + Sync {
    /// Publishes a payload to the given topic and awaits the broker ack.
    ///
    /// # Errors
    ///
    /// Returns the broker's error verbatim as a transport error.
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<()>;
}
