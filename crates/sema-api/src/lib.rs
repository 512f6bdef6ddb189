//! # sema-api
//!
//! HTTP read-side explorer for the sema schema registry.
//!
//! A thin axum façade over a running [`LocalRegistry`]: it tails the
//! schema topics into an in-memory view and serves it read-only.
//!
//! ## Endpoints
//!
//! - `GET /schema/list`: all schema IDs in the view
//! - `GET /schema/describe?uuid=…`: specifications for the given IDs
//! - `GET /alias/list`: all aliases in the view
//! - `GET /alias/describe?alias=…`: bindings for the given aliases
//! - `GET /health`, `GET /ready`: liveness and readiness
//!
//! The explorer is unauthenticated and CORS-open; it exposes nothing but
//! the already-public contents of the schema log.
//!
//! [`LocalRegistry`]: sema_registry::LocalRegistry

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod server;

pub use config::Config;
pub use error::{ApiError, ApiResult, ServerError};
pub use server::{AppState, Server};
