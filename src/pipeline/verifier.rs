//! Verifier: the pass/fail quality gate after every executor run
//!
//! The judge sees the raw task descriptor (role-tag prefix included) and the
//! executor's output, and is instructed to answer with exactly "PASSED" or
//! "FAILED" plus deficiencies. Verdict extraction is deliberately blunt: a
//! case-insensitive containment check for "PASSED". Anything ambiguous is a
//! failure, not an error.

use crate::llm::provider::{LlmError, LlmProvider};
use crate::pipeline::state::PipelineState;
use crate::pipeline::LlmSettings;
use std::sync::Arc;
use tracing::info;

/// Component name recorded in `active_agent`
pub const VERIFIER_AGENT: &str = "Verifier";

/// Judges executed tasks against their descriptions
pub struct Verifier {
    provider: Arc<dyn LlmProvider>,
    settings: LlmSettings,
}

impl Verifier {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: LlmSettings) -> Self {
        Self { provider, settings }
    }

    /// Judge the last output against the current task descriptor
    ///
    /// Sets `verification_passed`; on failure, stores the full judge reply
    /// as `error_feedback`, on pass clears it.
    pub async fn verify(
        &self,
        raw_descriptor: &str,
        state: &mut PipelineState,
    ) -> Result<(), LlmError> {
        let work_to_check = state.last_output.as_deref().unwrap_or("");
        let prompt = build_judge_prompt(raw_descriptor, work_to_check);
        let request = self.settings.request(None, prompt);

        let response = self.provider.complete(request).await?;
        let passed = is_passed(&response.content);

        info!(
            request_id = %state.request_id,
            step_index = state.current_step_index,
            passed,
            "Verifier issued verdict"
        );

        state.verification_passed = passed;
        state.error_feedback = if passed {
            String::new()
        } else {
            response.content
        };
        state.active_agent = VERIFIER_AGENT.to_string();
        Ok(())
    }
}

fn build_judge_prompt(task_description: &str, work_to_check: &str) -> String {
    format!(
        "You are Quality Assurance. Review this work strictly:
Assigned task: {task_description}
Output produced by the AI: {work_to_check}

Judging criteria:
- If the work is 100% correct and complete as assigned, reply with the \
single word 'PASSED'.
- If anything is wrong or missing, reply 'FAILED' followed by the reasons \
and what must be fixed."
    )
}

/// Case-insensitive containment check for the pass token
fn is_passed(response: &str) -> bool {
    response.to_uppercase().contains("PASSED")
}
