//! Axum route handlers for the roadmap API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::roadmap::models::Roadmap;
use crate::roadmap::planner::generate_roadmap;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub domain: String,
}

/// POST /api/roadmap/generate
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<Roadmap>, AppError> {
    if request.domain.trim().is_empty() {
        return Err(AppError::Validation("domain cannot be empty".to_string()));
    }

    let roadmap = generate_roadmap(&request.domain, &state.llm).await?;
    Ok(Json(roadmap))
}
