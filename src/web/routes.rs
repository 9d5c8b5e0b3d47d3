//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(handlers::search).post(handlers::search_json))
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::{Result, SearchError};
    use crate::es::{EsSearchRequest, SearchBackend, SearchHits};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct OneHitBackend;

    #[async_trait]
    impl SearchBackend for OneHitBackend {
        async fn search(&self, request: &EsSearchRequest) -> Result<SearchHits> {
            Ok(SearchHits::new(
                1,
                vec![json!({ "goods_id": "1", "goods_from": request.index_path() })],
            ))
        }

        async fn ping(&self) -> Result<()> {
            Err(SearchError::Engine("unreachable".into()))
        }
    }

    fn app() -> Router {
        create_router(AppState::new(Settings::default(), Arc::new(OneHitBackend)))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_search_query_string() {
        let response = app()
            .oneshot(
                Request::get("/search?keyword=wireless%20mouse&from=0&size=51&es_index=tbk_pdd")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["from"], 1);
        assert_eq!(body["size"], 10);
        assert_eq!(body["total_page"], 1);
        assert_eq!(body["data"][0]["goods_from"], "tbk_pdd");
    }

    #[tokio::test]
    async fn test_search_blank_paging_params_use_defaults() {
        let response = app()
            .oneshot(
                Request::get("/search?keyword=mouse&size=&from=&recommend=x")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["from"], 1);
        assert_eq!(body["size"], 10);
        assert_eq!(body["data"][0]["goods_from"], "tbk_tb,tbk_jd,tbk_pdd");
    }

    #[tokio::test]
    async fn test_search_json_body_blank_keyword() {
        let response = app()
            .oneshot(
                Request::post("/search")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"keyword": "  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert_eq!(body["msg"], "keyword missing");
    }

    #[tokio::test]
    async fn test_health_reports_backend_down() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["elasticsearch"], "down");
    }

    #[tokio::test]
    async fn test_stats_counts_searches() {
        let state = AppState::new(Settings::default(), Arc::new(OneHitBackend));
        state.search.execute(&crate::search::SearchRequest::simple("mouse")).await;

        let response = create_router(state)
            .oneshot(Request::get("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["total_searches"], 1);
        assert_eq!(body["exact_hits"], 1);
    }
}
