use crate::config::Config;
use crate::extraction::StructuredClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub llm: StructuredClient,
    pub config: Config,
}
