//! HTTP server setup with Axum

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::rest::{events, search};
use super::state::AppState;

/// Create the Axum router with all endpoints
///
/// When `static_dir` is given, unmatched paths are served from it with
/// `index.html` as the fallback for client-side routes.
pub fn create_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .route(
            "/api/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/api/events/date", get(search::events_today))
        .route("/api/events/date/", get(search::events_today))
        .route("/api/events/date/:date", get(search::events_by_date))
        .route("/api/events/search", get(search::search_by_param))
        .route("/api/events/search/", get(search::search_by_param))
        .route("/api/events/search/:query", get(search::search_by_path))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).layer(cors_layer())
}

/// Mirror the caller's origin and allow credentials
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": crate::NAME,
        "version": crate::VERSION,
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}
