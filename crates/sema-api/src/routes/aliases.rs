//! `/alias` routes.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use sema_core::Alias;

use crate::dto::{AliasBody, AliasListBody, AliasesBody};
use crate::error::{ApiError, ApiResult};
use crate::server::AppState;

/// Routes under `/alias`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/alias/list", get(list))
        .route("/alias/describe", get(describe))
}

/// Lists all aliases in the view.
async fn list(State(state): State<Arc<AppState>>) -> Json<AliasListBody> {
    let aliases = state.store.list_aliases();
    Json(AliasListBody {
        count: aliases.len(),
        aliases,
    })
}

/// Describes the bindings named by repeated `alias` query parameters.
///
/// Aliases not (yet) in the view are omitted from the response.
async fn describe(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<AliasesBody>> {
    let requested: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "alias")
        .map(|(_, value)| value.as_str())
        .collect();
    if requested.is_empty() {
        return Err(ApiError::bad_request("required query parameter 'alias'"));
    }

    let mut aliases = Vec::with_capacity(requested.len());
    for raw in requested {
        let alias = Alias::new(raw);
        let Some(uuid) = state.store.who_is(&alias) else {
            tracing::debug!(alias = %alias, "describe skipped unknown alias");
            continue;
        };
        aliases.push(AliasBody { alias, uuid });
    }

    Ok(Json(AliasesBody { aliases }))
}
