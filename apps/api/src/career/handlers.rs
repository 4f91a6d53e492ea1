//! Axum route handlers for the career assessment API.

use axum::{extract::State, Json};

use crate::career::matcher::analyze_career_match;
use crate::career::models::{CareerProfile, MatchResult};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/assessment
///
/// Body: `{hobbies, skills, interests}` (each optional). Returns ranked
/// career matches.
pub async fn handle_assessment(
    State(state): State<AppState>,
    Json(profile): Json<CareerProfile>,
) -> Result<Json<MatchResult>, AppError> {
    if profile.is_empty() {
        return Err(AppError::Validation(
            "Provide at least one hobby, skill, or interest".to_string(),
        ));
    }

    let result = analyze_career_match(&profile, &state.llm).await?;
    Ok(Json(result))
}
