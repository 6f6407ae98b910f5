//! Error types for pipeline operations
//!
//! Content-level problems (malformed plans, unreadable reference files,
//! ambiguous verdicts) are recovered inside the components that hit them.
//! What surfaces here is what the host has to deal with: capability
//! invocation failures, configuration problems, and tasks that exhausted
//! their verification attempts.

use crate::config::ConfigError;
use crate::llm::provider::LlmError;
use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Task {index} failed verification after {attempts} attempts: {feedback}")]
    TaskFailed {
        index: usize,
        attempts: u32,
        feedback: String,
    },

    #[error("Invalid pipeline state: {0}")]
    InvalidState(String),
}

impl PipelineError {
    /// Create a task-failure error for a task that exhausted its attempts
    pub fn task_failed(index: usize, attempts: u32, feedback: impl Into<String>) -> Self {
        Self::TaskFailed {
            index,
            attempts,
            feedback: feedback.into(),
        }
    }

    /// Create an invalid-state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}
