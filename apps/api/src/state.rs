use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatCompletion;
use crate::matching::SkillMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat completion backend. Default: Groq via `LlmClient`; tests swap in stubs.
    pub llm: Arc<dyn ChatCompletion>,
    /// Vocabulary and thresholds, built once at startup.
    pub matcher: Arc<SkillMatcher>,
    pub config: Config,
}
