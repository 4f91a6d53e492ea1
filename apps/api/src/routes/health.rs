use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Student Guidance API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy"
    }))
}

/// GET /health
/// Reports which upstream credentials were present at startup.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "model": state.llm.model(),
        "gemini_configured": !state.config.gemini_api_key.is_empty(),
        "openai_configured": state.config.openai_configured,
        "supabase_configured": state.config.supabase_configured
    }))
}
