//! HTTP route handlers.

pub mod aliases;
pub mod schemas;

use std::sync::Arc;

use axum::Router;

use crate::server::AppState;

/// All explorer routes.
pub fn explorer_routes() -> Router<Arc<AppState>> {
    Router::new().merge(schemas::routes()).merge(aliases::routes())
}
