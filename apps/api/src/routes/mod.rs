pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::career::handlers as career;
use crate::resume::handlers as resume;
use crate::roadmap::handlers as roadmap;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/assessment", post(career::handle_assessment))
        .route(
            "/api/roadmap/generate",
            post(roadmap::handle_generate_roadmap),
        )
        .route(
            "/api/resume/analyze",
            post(resume::handle_analyze_resume)
                .layer(DefaultBodyLimit::max(resume::MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

/// CORS for the configured browser origins, with credentials.
/// Methods and headers are mirrored since wildcards are not allowed alongside credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
