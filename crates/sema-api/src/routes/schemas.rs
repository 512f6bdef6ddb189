//! `/schema` routes.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use sema_core::SchemaId;

use crate::dto::{SchemaBody, SchemaListBody, SchemataBody};
use crate::error::{ApiError, ApiResult};
use crate::server::AppState;

/// Routes under `/schema`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/schema/list", get(list))
        .route("/schema/describe", get(describe))
}

/// Lists all schema IDs in the view.
async fn list(State(state): State<Arc<AppState>>) -> Json<SchemaListBody> {
    let schemata = state.store.list_schemata();
    Json(SchemaListBody {
        count: schemata.len(),
        schemata,
    })
}

/// Describes the schemata named by repeated `uuid` query parameters.
///
/// IDs not (yet) in the view are omitted from the response; an
/// unparseable ID is a client error.
async fn describe(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<SchemataBody>> {
    let requested: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "uuid")
        .map(|(_, value)| value.as_str())
        .collect();
    if requested.is_empty() {
        return Err(ApiError::bad_request("required query parameter 'uuid'"));
    }

    let mut schemata = Vec::with_capacity(requested.len());
    for raw in requested {
        let schema: SchemaId = raw
            .parse()
            .map_err(|_| ApiError::bad_request(format!("invalid schema ID '{raw}'")))?;
        let Some(spec) = state.store.specification(schema) else {
            tracing::debug!(schema_id = %schema, "describe skipped unknown schema");
            continue;
        };
        schemata.push(SchemaBody { uuid: schema, spec });
    }

    Ok(Json(SchemataBody { schemata }))
}
