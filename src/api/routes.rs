//! API Routes
//!
//! Wires the cache handlers into an Axum router.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_handler, health_handler, set_handler, size_handler, stats_handler, AppState,
};

/// Builds the service router.
///
/// Only the cache contract is routed: set, get and size, plus read-only
/// stats and health. There is no delete route.
pub fn create_router(state: AppState) -> Router {
    cache_routes()
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cache_routes() -> Router<AppState> {
    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/size", get(size_handler))
}

fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SharedCache;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn app_with_capacity(capacity: usize) -> (Router, AppState) {
        let state = AppState::new(SharedCache::new(capacity).unwrap());
        (create_router(state.clone()), state)
    }

    fn put_set(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri("/set")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_set_lands_in_shared_state() {
        let (app, state) = app_with_capacity(4);

        let response = app
            .oneshot(put_set(r#"{"key":"k","value":"v","ttl_ms":60000}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.cache.get("k").as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_get_reads_what_state_holds() {
        let (app, state) = app_with_capacity(4);
        state
            .cache
            .set("k".to_string(), "v".to_string(), std::time::Duration::ZERO);

        let hit = app.clone().oneshot(get("/get/k")).await.unwrap();
        let miss = app.oneshot(get("/get/other")).await.unwrap();

        assert_eq!(hit.status(), StatusCode::OK);
        assert_eq!(miss.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_observability_routes_respond() {
        let (app, _state) = app_with_capacity(4);

        for uri in ["/size", "/stats", "/health"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_no_delete_route() {
        let (app, _state) = app_with_capacity(4);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/get/anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
