//! Pipeline state and result types
//!
//! One [`PipelineState`] exists per request and is owned by the router for
//! the lifetime of that request. Nothing here is shared across requests.

use crate::llm::provider::{Message, MessageRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker returned when the conversation produced no assistant output
pub const NO_RESPONSE: &str = "No response";

/// Mutable state for one assembly-line run
#[derive(Debug, Clone)]
pub struct PipelineState {
    /// Request identifier for logging and audit
    pub request_id: Uuid,
    /// When this run started
    pub started_at: DateTime<Utc>,
    /// Role-tagged conversation, append-only; grows by one entry per
    /// executor run
    pub conversation: Vec<Message>,
    /// Raw task descriptors, immutable once the decomposer has set them
    pub task_queue: Vec<String>,
    /// Cursor into `task_queue`; advances only on verification pass
    pub current_step_index: usize,
    /// Most recent executor output, consumed as context by the next task
    pub last_output: Option<String>,
    /// Verdict from the last verifier run
    pub verification_passed: bool,
    /// Judge feedback from the last failed verification; empty on pass
    pub error_feedback: String,
    /// Name of whichever component most recently acted (audit only)
    pub active_agent: String,
    /// Executor attempts for the current task index
    pub attempts: u32,
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            started_at: Utc::now(),
            conversation: Vec::new(),
            task_queue: Vec::new(),
            current_step_index: 0,
            last_output: None,
            verification_passed: false,
            error_feedback: String::new(),
            active_agent: String::new(),
            attempts: 0,
        }
    }

    /// The raw descriptor at the current cursor, if the cursor is valid
    pub fn current_task(&self) -> Option<&str> {
        self.task_queue
            .get(self.current_step_index)
            .map(String::as_str)
    }

    /// All assistant-tagged message contents, in order
    pub fn assistant_contents(&self) -> Vec<String> {
        self.conversation
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .map(|m| m.content.clone())
            .collect()
    }

    /// Build the host-facing result from the final state
    ///
    /// `full_chain` keeps the provenance-tagged message contents;
    /// `final_answer` is the last worker's output with the tag stripped.
    pub fn into_result(self) -> PipelineResult {
        let full_chain = self.assistant_contents();
        let final_answer = full_chain
            .last()
            .map(|content| strip_provenance_tag(content).to_string())
            .unwrap_or_else(|| NO_RESPONSE.to_string());

        PipelineResult {
            final_answer,
            full_chain,
            tasks_completed: self.task_queue,
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a leading `[Role]: ` provenance tag, if present
fn strip_provenance_tag(content: &str) -> &str {
    if content.starts_with('[') {
        if let Some((_, rest)) = content.split_once("]: ") {
            return rest;
        }
    }
    content
}

/// What the host gets back from one completed run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineResult {
    /// Content of the last assistant-tagged message, or the "No response"
    /// marker if no worker ever produced output
    pub final_answer: String,
    /// Every assistant-tagged message content, in order
    pub full_chain: Vec<String>,
    /// The final task queue as produced by the decomposer
    pub tasks_completed: Vec<String>,
}
