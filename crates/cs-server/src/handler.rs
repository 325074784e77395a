use axum::extract::{Query, State};
use axum::response::Json;
use cs_registry::{Registry, RegistryResult};
use cs_types::DetailsView;
use serde_json::json;

use crate::endpoint::{DetailsQuery, HealthResponse};
use crate::error::{ServerError, ServerResult};

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(registry): State<Registry>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "cs-server",
        "version": env!("CARGO_PKG_VERSION"),
        "table": registry.config().table_name(),
    }))
}

/// Mint a codespace. The body is the bare id.
pub async fn create_handler(State(registry): State<Registry>) -> ServerResult<String> {
    let id = run_blocking(move || registry.create()).await?;
    Ok(id.to_string())
}

/// Resolve `?id=` into its details.
pub async fn details_handler(
    State(registry): State<Registry>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ServerResult<Json<DetailsView>> {
    let query = DetailsQuery::from_pairs(pairs);
    let view = run_blocking(move || registry.details(&query.id)).await?;
    Ok(Json(view))
}

/// Store calls may block on disk, so they run off the async workers.
async fn run_blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> RegistryResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .map_err(ServerError::from)
}
