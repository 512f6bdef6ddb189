//! # sema-core
//!
//! Shared primitives for the sema schema registry.
//!
//! This crate provides the types used across all sema components:
//!
//! - **Identifiers**: The strongly-typed [`SchemaId`] addressing a schema
//! - **Aliases**: Plain-text labels ([`Alias`]) and the linear versioning
//!   scheme built on top of them ([`NameVersion`])
//! - **Error Types**: Shared error definitions and result types
//! - **Observability**: Logging initialization helpers
//!
//! ## Crate Boundary
//!
//! `sema-core` is the only crate allowed to define shared primitives.
//! Everything that crosses a component boundary (wire payloads, HTTP
//! envelopes) is expressed in terms of the types defined here.
//!
//! ## Example
//!
//! ```rust
//! use sema_core::prelude::*;
//!
//! let schema = SchemaId::generate();
//! let version = NameVersion::origin("sensor-reading");
//! assert_eq!(version.alias().as_str(), "sensor-reading-v0");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod alias;
pub mod error;
pub mod id;
pub mod observability;
pub mod version;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use sema_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::alias::Alias;
    pub use crate::error::{Error, Result};
    pub use crate::id::SchemaId;
    pub use crate::version::NameVersion;
}

pub use alias::Alias;
pub use error::{Error, Result};
pub use id::SchemaId;
pub use observability::{LogFormat, init_logging};
pub use version::NameVersion;
