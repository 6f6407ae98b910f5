//! Assembly-line pipeline: decompose, execute, verify, advance or retry
//!
//! The components mirror the stations of the line:
//! - [`decomposer::TaskDecomposer`] turns the request into the task queue
//! - [`task::SpecialistRole`] maps role tags to behavior profiles
//! - [`context::ContextAssembler`] builds each worker's execution context
//! - [`executor::WorkerExecutor`] runs one task through its specialist
//! - [`verifier::Verifier`] gates each output with a pass/fail verdict
//! - [`router::Pipeline`] drives the loop and owns the per-request state

pub mod context;
pub mod decomposer;
pub mod executor;
pub mod router;
pub mod state;
pub mod task;
pub mod verifier;

pub use context::{ContextAssembler, FileReferenceSource, NoReference, ReferenceSource};
pub use decomposer::TaskDecomposer;
pub use executor::WorkerExecutor;
pub use router::{Pipeline, PipelineStage};
pub use state::{PipelineResult, PipelineState, NO_RESPONSE};
pub use task::{SpecialistRole, TaskDescriptor};
pub use verifier::Verifier;

use crate::config::LlmSection;
use crate::llm::provider::CompletionRequest;

/// Model call parameters threaded explicitly into every component
///
/// Carried by value so components never reach into ambient process state.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl LlmSettings {
    pub fn from_config(llm: &LlmSection) -> Self {
        Self {
            model: llm.model.clone(),
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
        }
    }

    /// Build a completion request with these settings applied
    pub fn request(&self, system: Option<&str>, user: impl Into<String>) -> CompletionRequest {
        let mut request = CompletionRequest::from_prompts(&self.model, system, user)
            .with_temperature(self.temperature);
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        request
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            model: "test-model".to_string(),
            temperature: 0.2,
            max_tokens: None,
        }
    }
}
