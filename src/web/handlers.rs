//! HTTP request handlers

use super::state::AppState;
use crate::results::SearchResult;
use crate::search::SearchRequest;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

/// Search handler for query-string requests.
///
/// The HTTP status is always 200; the outcome is in the body's `code`.
pub async fn search(
    State(state): State<AppState>,
    Query(request): Query<SearchRequest>,
) -> Json<SearchResult> {
    Json(state.search.execute(&request).await)
}

/// Search handler for JSON body requests
pub async fn search_json(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchResult> {
    Json(state.search.execute(&request).await)
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let elasticsearch = match state.backend.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!("Elasticsearch ping failed: {}", e);
            "down"
        }
    };
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "elasticsearch": elasticsearch,
    }))
}

/// Metrics snapshot handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}
