//! Career matcher — profile → prompt → model → validated `MatchResult`.

use tracing::info;

use crate::career::models::{CareerProfile, MatchResult};
use crate::career::prompts::build_career_prompt;
use crate::extraction::{GuidanceError, StructuredClient};

/// Asks the model for career domains matching `profile`.
/// Matches are returned in the order the model ranked them.
pub async fn analyze_career_match(
    profile: &CareerProfile,
    llm: &StructuredClient,
) -> Result<MatchResult, GuidanceError> {
    let request = build_career_prompt(&profile.hobbies, &profile.skills, &profile.interests);
    info!(
        "Career match requested: {} hobbies, {} skills, {} interests",
        profile.hobbies.len(),
        profile.skills.len(),
        profile.interests.len()
    );

    let result: MatchResult = llm.request_structured(&request).await?;
    info!("Career match produced {} domains", result.matches.len());
    Ok(result)
}
