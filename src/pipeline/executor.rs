//! Worker executor: runs one task through its resolved specialist
//!
//! Exactly one capability invocation per call, no internal retry. Retries
//! are the router's decision, made after verification.

use crate::llm::provider::{LlmError, LlmProvider, Message};
use crate::pipeline::state::PipelineState;
use crate::pipeline::task::TaskDescriptor;
use crate::pipeline::LlmSettings;
use std::sync::Arc;
use tracing::info;

/// Executes tasks with the role-appropriate specialist profile
pub struct WorkerExecutor {
    provider: Arc<dyn LlmProvider>,
    settings: LlmSettings,
}

impl WorkerExecutor {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: LlmSettings) -> Self {
        Self { provider, settings }
    }

    /// Run one task and record its output
    ///
    /// Appends a role-tagged message to the conversation, overwrites
    /// `last_output`, and records the specialist as the active agent.
    /// Nothing is discarded: every invocation's output lands in the
    /// conversation even if verification later rejects it.
    pub async fn execute(
        &self,
        descriptor: &TaskDescriptor,
        context_text: String,
        state: &mut PipelineState,
    ) -> Result<(), LlmError> {
        let request = self.settings.request(None, context_text);
        let response = self.provider.complete(request).await?;
        let output = response.content;

        info!(
            request_id = %state.request_id,
            step_index = state.current_step_index,
            role = %descriptor.role,
            attempts = state.attempts,
            output_length = output.len(),
            "Executor produced output"
        );

        state
            .conversation
            .push(Message::assistant(format!("[{}]: {}", descriptor.role, output)));
        state.last_output = Some(output);
        state.active_agent = descriptor.role.to_string();
        Ok(())
    }
}
