use tracing::info;

use crate::extraction::{GuidanceError, StructuredClient};
use crate::roadmap::models::Roadmap;
use crate::roadmap::prompts::build_roadmap_prompt;

/// Generates a Day Zero roadmap for `domain`.
pub async fn generate_roadmap(
    domain: &str,
    llm: &StructuredClient,
) -> Result<Roadmap, GuidanceError> {
    let domain = domain.trim();
    info!("Roadmap requested for domain {domain:?}");

    let mut roadmap: Roadmap = llm.request_structured(&build_roadmap_prompt(domain)).await?;
    if roadmap.domain.trim().is_empty() {
        roadmap.domain = domain.to_string();
    }

    info!(
        "Roadmap for {:?}: {} resources, {} tools, {} steps",
        roadmap.domain,
        roadmap.learn.len(),
        roadmap.setup.len(),
        roadmap.project.steps.len()
    );
    Ok(roadmap)
}
