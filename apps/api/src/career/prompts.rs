//! Career-match prompt templates and the builder that fills them.

use serde_json::{Map, Value};

use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::llm_client::GenerationRequest;

pub const CAREER_SYSTEM: &str = "You are an expert career counselor for students, \
    with deep knowledge of technology careers, market trends, and skill requirements. \
    Provide data-driven, actionable career guidance. \
    Be encouraging but realistic and focus on modern, in-demand roles.";

/// Replace: {hobbies}, {skills}, {interests}, {json_only}
pub const CAREER_PROMPT_TEMPLATE: &str = r#"Based on the following student profile, suggest exactly 5 career domains with match percentages (0-100).

Hobbies: {hobbies}
Technical Skills: {skills}
Interest Areas (ratings): {interests}

For each career domain, provide:
1. Domain name
2. Match percentage (an integer from 0 to 100)
3. Brief reasoning (2-3 sentences)
4. Key skills to develop

The response must be valid JSON with this structure:
{
  "matches": [
    {
      "domain": "Full Stack Development",
      "match_percentage": 85,
      "reasoning": "Your skills align well with building complete web products...",
      "key_skills": ["React", "Node.js", "PostgreSQL"]
    }
  ]
}

{json_only}"#;

const NONE_PROVIDED: &str = "None provided";

/// Renders the career-match prompt. Pure: identical input gives identical output.
/// The system instruction is always set.
pub fn build_career_prompt(
    hobbies: &[String],
    skills: &[String],
    interests: &Map<String, Value>,
) -> GenerationRequest {
    let hobbies = join_or_none(hobbies);
    let skills = join_or_none(skills);
    let interests = render_interests(interests);

    let prompt = render(
        CAREER_PROMPT_TEMPLATE,
        &[
            ("hobbies", hobbies.as_str()),
            ("skills", skills.as_str()),
            ("interests", interests.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );

    GenerationRequest::new(prompt).with_system_instruction(CAREER_SYSTEM)
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        NONE_PROVIDED.to_string()
    } else {
        items.join(", ")
    }
}

/// `name: rating` pairs in insertion order. Keys and text ratings appear
/// verbatim; other values use their JSON form.
fn render_interests(interests: &Map<String, Value>) -> String {
    if interests.is_empty() {
        return NONE_PROVIDED.to_string();
    }
    interests
        .iter()
        .map(|(name, rating)| match rating {
            Value::String(text) => format!("{name}: {text}"),
            other => format!("{name}: {other}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn interests(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_prompt_contains_every_input_verbatim() {
        let hobbies = strings(&["gaming", "chess {blitz}"]);
        let skills = strings(&["Python", "C++"]);
        let ratings = interests(json!({"tech": 5, "design \"ux\"": "high", "music": 2.5}));

        let request = build_career_prompt(&hobbies, &skills, &ratings);

        for item in hobbies.iter().chain(skills.iter()) {
            assert!(request.prompt.contains(item.as_str()), "missing {item}");
        }
        for key in ratings.keys() {
            assert!(request.prompt.contains(key.as_str()), "missing {key}");
        }
        assert!(request.prompt.contains("tech: 5, design \"ux\": high, music: 2.5"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let hobbies = strings(&["hiking"]);
        let skills = strings(&["SQL"]);
        let ratings = interests(json!({"data": 9, "art": 3}));
        assert_eq!(
            build_career_prompt(&hobbies, &skills, &ratings),
            build_career_prompt(&hobbies, &skills, &ratings)
        );
    }

    #[test]
    fn test_interest_order_is_preserved() {
        let ratings = interests(json!({"zoology": 1, "art": 2}));
        let request = build_career_prompt(&[], &[], &ratings);
        assert!(request.prompt.contains("zoology: 1, art: 2"));
    }

    #[test]
    fn test_empty_inputs_render_placeholder() {
        let request = build_career_prompt(&[], &[], &Map::new());
        assert!(request.prompt.contains("Hobbies: None provided"));
        assert!(request.prompt.contains("Technical Skills: None provided"));
        assert!(request.prompt.contains("Interest Areas (ratings): None provided"));
    }

    #[test]
    fn test_template_requests_five_domains_and_schema() {
        let request = build_career_prompt(&strings(&["a"]), &[], &Map::new());
        assert!(request.prompt.contains("exactly 5 career domains"));
        assert!(request.prompt.contains("\"match_percentage\": 85"));
        assert!(request.prompt.contains("\"key_skills\""));
        assert!(request.prompt.contains("valid JSON"));
        assert!(!request.prompt.contains("{json_only}"));
        assert_eq!(request.system_instruction.as_deref(), Some(CAREER_SYSTEM));
    }
}
