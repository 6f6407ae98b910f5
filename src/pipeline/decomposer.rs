//! Task decomposer: turns a free-form request into the task queue
//!
//! One planner LLM call at the start of every run. The response is expected
//! to be a JSON array of `[RoleName]: task` strings, but the model may wrap
//! it in commentary, so extraction scans for the first bracketed span before
//! decoding. Malformed output degrades to a single fallback task — planning
//! never fails the pipeline on content grounds.

use crate::llm::provider::{LlmError, LlmProvider};
use crate::pipeline::state::PipelineState;
use crate::pipeline::LlmSettings;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Greedy match of the first `[...]` span, newlines included
static JSON_ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("array regex is valid"));

/// Component name recorded in `active_agent`
pub const PLANNER_AGENT: &str = "Planner";

/// Decomposes user requests into ordered specialist tasks
pub struct TaskDecomposer {
    provider: Arc<dyn LlmProvider>,
    settings: LlmSettings,
}

impl TaskDecomposer {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: LlmSettings) -> Self {
        Self { provider, settings }
    }

    /// Produce the task queue for `user_request` and reset the cursor
    ///
    /// Provider failures propagate; format failures fall back to a
    /// single-element queue carrying the whole request for the Researcher.
    pub async fn decompose(
        &self,
        user_request: &str,
        state: &mut PipelineState,
    ) -> Result<(), LlmError> {
        let prompt = build_planner_prompt(user_request);
        let request = self.settings.request(None, prompt);

        let response = self.provider.complete(request).await?;
        let tasks = extract_task_array(&response.content).unwrap_or_else(|| {
            warn!(
                request_id = %state.request_id,
                "Planner response had no decodable JSON array, using fallback task"
            );
            vec![format!("[Researcher]: {user_request}")]
        });

        debug!(
            request_id = %state.request_id,
            task_count = tasks.len(),
            "Decomposed request into task queue"
        );

        state.task_queue = tasks;
        state.current_step_index = 0;
        state.attempts = 0;
        state.active_agent = PLANNER_AGENT.to_string();
        Ok(())
    }
}

fn build_planner_prompt(user_request: &str) -> String {
    format!(
        "You are a Senior AI Planner. Break the user's request into short, \
self-contained micro-tasks for a team of AI specialists (Coder, Vision, \
Data, Researcher) working as an assembly line.

User request: {user_request}

Decomposition rules:
1. Each step must be self-contained and unambiguous.
2. Name the responsible specialist for each step using the form \
[AgentName]: Task description
3. Return ONLY a JSON array of strings. Do not include any other text.
Example: [\"[Data]: read the data from the CSV file\", \"[Coder]: write a \
script to compute the profit\"]"
    )
}

/// Extract and decode the first bracketed JSON array span, if any
fn extract_task_array(raw: &str) -> Option<Vec<String>> {
    let span = JSON_ARRAY_RE.find(raw)?.as_str();
    match serde_json::from_str::<Vec<String>>(span) {
        Ok(tasks) if !tasks.is_empty() => Some(tasks),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "Bracketed span did not decode as a string array");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mocks::MockLlmProvider;

    fn decomposer_with(responses: Vec<String>) -> TaskDecomposer {
        TaskDecomposer::new(
            Arc::new(MockLlmProvider::new(responses)),
            LlmSettings::for_tests(),
        )
    }

    #[tokio::test]
    async fn test_well_formed_array_used_verbatim() {
        let decomposer = decomposer_with(vec![
            r#"["[Data]: load the csv", "[Coder]: compute totals"]"#.to_string(),
        ]);
        let mut state = PipelineState::new();

        decomposer.decompose("do accounting", &mut state).await.unwrap();

        assert_eq!(
            state.task_queue,
            vec![
                "[Data]: load the csv".to_string(),
                "[Coder]: compute totals".to_string()
            ]
        );
        assert_eq!(state.current_step_index, 0);
        assert_eq!(state.active_agent, PLANNER_AGENT);
    }

    #[tokio::test]
    async fn test_array_extracted_from_surrounding_commentary() {
        let decomposer = decomposer_with(vec![
            "Sure! Here is the plan:\n[\"[Data]: step one\",\n \"[Vision]: step two\"]\nGood luck!"
                .to_string(),
        ]);
        let mut state = PipelineState::new();

        decomposer.decompose("anything", &mut state).await.unwrap();

        assert_eq!(state.task_queue.len(), 2);
        assert_eq!(state.task_queue[1], "[Vision]: step two");
    }

    #[tokio::test]
    async fn test_no_bracket_falls_back_to_single_task() {
        let decomposer = decomposer_with(vec!["I cannot plan this.".to_string()]);
        let mut state = PipelineState::new();

        decomposer.decompose("summarize this CSV", &mut state).await.unwrap();

        assert_eq!(
            state.task_queue,
            vec!["[Researcher]: summarize this CSV".to_string()]
        );
    }

    #[tokio::test]
    async fn test_invalid_json_in_span_falls_back() {
        let decomposer = decomposer_with(vec!["[not, valid, json]".to_string()]);
        let mut state = PipelineState::new();

        decomposer.decompose("original request", &mut state).await.unwrap();

        assert_eq!(
            state.task_queue,
            vec!["[Researcher]: original request".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_response_falls_back() {
        let decomposer = decomposer_with(vec![String::new()]);
        let mut state = PipelineState::new();

        decomposer.decompose("the request", &mut state).await.unwrap();

        assert_eq!(state.task_queue.len(), 1);
        assert!(state.task_queue[0].contains("the request"));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let decomposer = TaskDecomposer::new(
            Arc::new(MockLlmProvider::with_failure()),
            LlmSettings::for_tests(),
        );
        let mut state = PipelineState::new();

        let result = decomposer.decompose("anything", &mut state).await;
        assert!(result.is_err());
        assert!(state.task_queue.is_empty());
    }

    #[test]
    fn test_empty_decoded_array_treated_as_malformed() {
        assert_eq!(extract_task_array("[]"), None);
    }

    #[test]
    fn test_extraction_is_greedy_across_newlines() {
        let raw = "prefix [\"[Data]: a\",\n\"[Coder]: b\"] suffix";
        let tasks = extract_task_array(raw).unwrap();
        assert_eq!(tasks.len(), 2);
    }
}
