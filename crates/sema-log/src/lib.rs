//! # sema-log
//!
//! Commit-log plumbing for the sema schema registry.
//!
//! This crate isolates every interaction with the append-only commit log:
//!
//! - [`Record`]: The unit of consumption, one message from one topic
//! - [`LogConsumer`] / [`LogProducer`]: Backend seams for tailing and
//!   publishing, so the registry core never sees a vendor client
//! - [`TopicRouter`]: Dispatches inbound records to per-topic handlers and
//!   drives the tail until stopped
//! - [`InMemoryLog`]: Single-process log for tests and development
//! - [`KafkaConsumer`] / [`KafkaProducer`]: The Kafka backend
//!
//! ## Consumption model
//!
//! Every consumer tails its topics from the earliest offset under a fresh
//! consumer group, so each process replays the full history and converges
//! on the same view. Within one topic partition records are handled in
//! offset order by a single worker; across topics there is no ordering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod consumer;
pub mod error;
pub mod kafka;
pub mod memory;
pub mod producer;
pub mod record;
pub mod router;

pub use consumer::{ConsumerConfig, LogConsumer};
pub use error::{Error, Result};
pub use kafka::{KafkaConsumer, KafkaProducer};
pub use memory::{InMemoryConsumer, InMemoryLog};
pub use producer::LogProducer;
pub use record::Record;
pub use router::{HandlerError, TailHandle, TopicRouter};
