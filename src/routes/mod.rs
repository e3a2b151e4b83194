use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{
        providers::{BookCatalog, RecommendationModel},
        CoverResolver,
    },
};

pub mod covers;
pub mod recommendations;
pub mod search;

/// Shared application state
pub struct AppState {
    pub model: Arc<dyn RecommendationModel>,
    pub catalog: Arc<dyn BookCatalog>,
    pub covers: CoverResolver,
    /// Number of books the model is asked for
    pub recommendation_count: usize,
}

impl AppState {
    pub fn new(
        model: Arc<dyn RecommendationModel>,
        catalog: Arc<dyn BookCatalog>,
        covers_url: String,
        recommendation_count: usize,
    ) -> Self {
        let covers = CoverResolver::new(catalog.clone(), covers_url);
        Self {
            model,
            catalog,
            covers,
            recommendation_count,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/books", book_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Book routes under /books
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/search", get(search::search))
        .route("/covers", get(covers::cover))
}

/// CORS for the browser frontend
///
/// Credentials are allowed, so methods and headers mirror the request instead of
/// using wildcards.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Book Library API" }))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
