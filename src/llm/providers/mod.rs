//! Concrete LLM provider implementations

pub mod gemini;

pub use gemini::{GeminiConfig, GeminiProvider};

use crate::llm::provider::{LlmError, LlmProvider};
use std::sync::Arc;

/// Create a provider instance from a provider name and resolved API key
///
/// The provider name comes from configuration; the API key has already been
/// resolved from its environment variable by the config layer.
pub fn create_provider(name: &str, api_key: String) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match name {
        "gemini" => {
            let provider = GeminiProvider::new(GeminiConfig {
                api_key,
                ..Default::default()
            })?;
            Ok(Arc::new(provider))
        }
        other => Err(LlmError::NotConfigured(format!(
            "Unknown LLM provider: {other}"
        ))),
    }
}
