//! # sema-registry
//!
//! Reactive materialized view over the sema schema log.
//!
//! Producers publish schema specifications (UUID → Avro spec text) and
//! alias bindings (label → UUID) to two well-known topics. Every consumer
//! tails both topics from the earliest offset into a local, in-memory
//! view, which this crate implements:
//!
//! - [`ObservableMap`]: Concurrent map with per-key one-shot readiness
//!   notifications
//! - [`AvroCodec`]: Compiled Avro schema supporting binary↔native
//!   conversion
//! - [`SchemaStore`]: The two maps plus the log handlers, read-side
//!   operations, and composite readiness resolution
//! - [`LocalRegistry`]: A store wired to a running log tail, with a
//!   clean shutdown path
//! - [`SchemaPublisher`]: The producer-side façade for writing updates
//!
//! ## Guarantees
//!
//! - **Monotonic presence**: an entry, once seen, stays for the process
//!   lifetime (the log only upserts)
//! - **Last writer wins**: per topic partition, the newest update is the
//!   one served
//! - **Readiness**: a waiter either finds its key already present or is
//!   signalled on the first insertion; shutdown aborts all waiters with
//!   `false`
//!
//! The view is eventually consistent with the log; there is no bounded
//! staleness guarantee.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod error;
pub mod metrics;
pub mod observe;
pub mod publish;
pub mod store;
pub mod view;
pub mod wire;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::codec::{AvroCodec, AvroValue};
    pub use crate::error::{Error, Result};
    pub use crate::observe::{ObservableMap, Readiness};
    pub use crate::publish::SchemaPublisher;
    pub use crate::store::SchemaStore;
    pub use crate::view::LocalRegistry;
    pub use crate::wire::{ALIAS_TOPIC, SCHEMA_TOPIC, AliasUpdate, SchemaUpdate};
}

pub use codec::{AvroCodec, AvroValue};
pub use error::{Error, Result};
pub use observe::{ObservableMap, Readiness};
pub use publish::SchemaPublisher;
pub use store::SchemaStore;
pub use view::LocalRegistry;
pub use wire::{ALIAS_TOPIC, SCHEMA_TOPIC, AliasUpdate, SchemaUpdate};
