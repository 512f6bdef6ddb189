//! Explorer server: state, router assembly, and the serve loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use sema_log::{ConsumerConfig, KafkaConsumer};
use sema_registry::{LocalRegistry, SchemaStore};

use crate::config::Config;
use crate::dto::{HealthBody, ReadyBody};
use crate::error::ServerError;
use crate::routes::explorer_routes;

/// Shared application state for all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The materialized view served by this explorer.
    pub store: SchemaStore,
    consuming: Arc<AtomicBool>,
}

impl AppState {
    /// Creates state over a view that is being fed by a running tail.
    #[must_use]
    pub fn new(store: SchemaStore) -> Self {
        Self {
            store,
            consuming: Arc::new(AtomicBool::new(true)),
        }
    }

    fn mark_stopped(&self) {
        self.consuming.store(false, Ordering::Relaxed);
    }

    fn is_consuming(&self) -> bool {
        self.consuming.load(Ordering::Relaxed)
    }
}

/// Health check endpoint handler.
///
/// A shallow liveness check; it verifies nothing about the tail.
async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
    })
}

/// Readiness check endpoint handler.
///
/// Ready while the tail is consuming. The view is eventually consistent,
/// so readiness does not imply the tail has caught up with the log.
async fn ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = ReadyBody {
        ready: state.is_consuming(),
        schemata: state.store.count(),
    };
    let status = if body.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

/// Builds the full explorer router over the given state.
///
/// CORS is wide open: the explorer serves nothing but the already-public
/// contents of the schema log.
#[must_use]
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .merge(explorer_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The explorer server.
#[derive(Debug)]
pub struct Server {
    config: Config,
}

impl Server {
    /// Creates a server with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Starts the registry tail and serves HTTP until shutdown.
    ///
    /// Blocks until ctrl-c, then drains: the HTTP server stops accepting,
    /// the tail is stopped, and the view is closed so that pending
    /// readiness waits abort.
    ///
    /// # Errors
    ///
    /// Returns an error when the consumer cannot be created, the tail
    /// cannot start, or the listen address cannot be bound.
    pub async fn serve(self) -> Result<(), ServerError> {
        let consumer = KafkaConsumer::connect(&ConsumerConfig::new(&self.config.broker))?;
        let registry = LocalRegistry::start(consumer).await?;
        let state = Arc::new(AppState::new(registry.store()));
        let router = app_router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind(self.config.listen)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.config.listen,
                source,
            })?;
        tracing::info!(addr = %self.config.listen, broker = %self.config.broker, "explorer listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("shutting down registry tail");
        state.mark_stopped();
        registry.shutdown().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to install ctrl-c handler");
    }
}

/// Builds state over an empty, tail-less view for handler tests.
#[cfg(test)]
pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(SchemaStore::new()))
}
