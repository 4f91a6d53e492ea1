//! Substitute upstream for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{GenerationRequest, LlmError, TextGenerator};

enum Reply {
    Text(String),
    Api { status: u16, message: String },
}

/// Returns a canned reply and records every request it receives.
pub struct StubGenerator {
    reply: Reply,
    seen: Mutex<Vec<GenerationRequest>>,
}

impl StubGenerator {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Text(text.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Api {
                status,
                message: message.into(),
            },
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Api { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn model(&self) -> &str {
        "stub"
    }
}
