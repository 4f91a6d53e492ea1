use serde_json::Value;

use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::llm_client::GenerationRequest;

pub const ROADMAP_SYSTEM: &str = "You are a senior tech lead creating onboarding plans for new interns. \
    Your goal is to get them from zero to building a real project in one day. \
    Focus on practical, hands-on learning with specific resources and projects. \
    Be ultra-specific. No generic advice.";

/// Replace: {domain}, {domain_json} (the domain as a JSON string literal), {json_only}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Create a Day Zero roadmap for "{domain}". Provide 3 sections:

1. Learn (3-5 foundational resources):
   - Online courses, documentation, or tutorials
   - Include specific URLs when possible

2. Setup (environment and tools):
   - Required software, IDEs, accounts
   - Step-by-step installation guide

3. Do (first hands-on project):
   - A beginner-friendly project that demonstrates core concepts
   - Clear deliverables and success criteria

Return valid JSON with this structure:
{
  "domain": {domain_json},
  "learn": [{"title": "Resource Title", "url": "https://...", "duration": "2h"}],
  "setup": [{"tool": "Tool Name", "purpose": "Why it is needed", "install_guide": "Command or link"}],
  "do": {
    "project_name": "Catchy Name",
    "description": "Brief concept",
    "steps": ["Step 1", "Step 2", "Step 3"],
    "deliverables": ["Functionality 1", "Functionality 2"]
  }
}

{json_only}"#;

pub fn build_roadmap_prompt(domain: &str) -> GenerationRequest {
    // The example schema must stay valid JSON whatever the domain contains.
    let domain_json = Value::String(domain.to_string()).to_string();
    let prompt = render(
        ROADMAP_PROMPT_TEMPLATE,
        &[
            ("domain", domain),
            ("domain_json", domain_json.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );
    GenerationRequest::new(prompt).with_system_instruction(ROADMAP_SYSTEM)
}
