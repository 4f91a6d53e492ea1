use serde::{Deserialize, Serialize};

use crate::extraction::schema::{require_non_empty, Schema, SchemaError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupTool {
    pub tool: String,
    pub purpose: String,
    pub install_guide: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterProject {
    pub project_name: String,
    pub description: String,
    pub steps: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
}

/// A one-day onboarding plan for a career domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    /// Empty when the model omits it; the planner fills in the requested domain.
    #[serde(default)]
    pub domain: String,
    pub learn: Vec<LearningResource>,
    pub setup: Vec<SetupTool>,
    #[serde(rename = "do")]
    pub project: StarterProject,
}

impl Schema for Roadmap {
    type Wire = Roadmap;

    fn from_wire(wire: Roadmap) -> Result<Self, SchemaError> {
        require_non_empty("learn", &wire.learn)?;
        require_non_empty("setup", &wire.setup)?;
        require_non_empty("do.steps", &wire.project.steps)?;
        Ok(wire)
    }
}
