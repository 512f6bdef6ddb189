//! CLI command implementations.

pub mod new_schema;
