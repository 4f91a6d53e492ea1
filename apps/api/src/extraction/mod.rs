//! Structured extraction — send a prompt upstream, recover a typed payload
//! from whatever text comes back.
//!
//! Failures are split three ways so callers can react differently:
//! upstream unreachable (`Upstream`), reply unusable (`Extraction`), reply
//! parsed but wrongly shaped (`Schema`).

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::{GenerationRequest, LlmError, TextGenerator};

pub mod json;
pub mod schema;

pub use json::{extract_json, ExtractionError};
pub use schema::{decode, Schema, SchemaError};

const PREVIEW_CHARS: usize = 120;

#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("upstream model call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("could not extract JSON from model reply: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("model reply does not match the expected schema: {0}")]
    Schema(#[from] SchemaError),
}

/// Coarse failure category, for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Upstream,
    Extraction,
    Schema,
}

impl GuidanceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GuidanceError::Upstream(_) => FailureKind::Upstream,
            GuidanceError::Extraction(_) => FailureKind::Extraction,
            GuidanceError::Schema(_) => FailureKind::Schema,
        }
    }
}

/// Single-shot request/response client over an injected `TextGenerator`.
/// Holds no mutable state; clone freely.
#[derive(Clone)]
pub struct StructuredClient {
    generator: Arc<dyn TextGenerator>,
}

impl StructuredClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// One upstream call, raw text back.
    pub async fn send(&self, request: &GenerationRequest) -> Result<String, GuidanceError> {
        let raw = self.generator.generate(request).await?;
        debug!(
            "Model {} replied with {} chars",
            self.generator.model(),
            raw.len()
        );
        Ok(raw)
    }

    /// send → extract_json → decode.
    pub async fn request_structured<T: Schema>(
        &self,
        request: &GenerationRequest,
    ) -> Result<T, GuidanceError> {
        let raw = self.send(request).await?;

        let object = extract_json(&raw).map_err(|e| {
            warn!("JSON extraction failed ({e}); reply starts: {:?}", preview(&raw));
            e
        })?;

        let payload = decode::<T>(object).map_err(|e| {
            warn!("Schema validation failed ({e}); reply starts: {:?}", preview(&raw));
            e
        })?;

        Ok(payload)
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
