use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::extraction::schema::{bounded_integer, require_non_empty, Schema, SchemaError};

/// What the student tells us about themselves. Read-only to the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Interest area → rating. Ratings are usually 1–10 but may be text.
    /// Insertion order is preserved.
    #[serde(default)]
    pub interests: Map<String, Value>,
}

impl CareerProfile {
    pub fn is_empty(&self) -> bool {
        self.hobbies.is_empty() && self.skills.is_empty() && self.interests.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerMatch {
    pub domain: String,
    /// Always within 0–100.
    pub match_percentage: u8,
    pub reasoning: String,
    pub key_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: Vec<CareerMatch>,
}

/// Wire form of `MatchResult` as the model writes it.
#[derive(Debug, Deserialize)]
pub struct MatchResultWire {
    pub matches: Vec<CareerMatchWire>,
}

#[derive(Debug, Deserialize)]
pub struct CareerMatchWire {
    pub domain: String,
    pub match_percentage: Number,
    pub reasoning: String,
    pub key_skills: Vec<String>,
}

impl Schema for MatchResult {
    type Wire = MatchResultWire;

    fn from_wire(wire: MatchResultWire) -> Result<Self, SchemaError> {
        require_non_empty("matches", &wire.matches)?;

        let matches = wire
            .matches
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                let field = format!("matches[{i}].match_percentage");
                let pct = bounded_integer(&field, &m.match_percentage, 0, 100)?;
                Ok(CareerMatch {
                    domain: m.domain,
                    match_percentage: pct as u8,
                    reasoning: m.reasoning,
                    key_skills: m.key_skills,
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        Ok(MatchResult { matches })
    }
}
