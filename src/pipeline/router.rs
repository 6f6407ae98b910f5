//! Pipeline router: the assembly-line state machine
//!
//! Decompose once, then alternate execute and verify for the task at the
//! cursor; a failed verdict replays the same index, a passed verdict
//! advances or terminates. Retries are bounded by `max_attempts`, after
//! which the run ends in the terminal `Failed` stage.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::llm::provider::{LlmProvider, Message};
use crate::pipeline::context::{ContextAssembler, FileReferenceSource, ReferenceSource};
use crate::pipeline::decomposer::TaskDecomposer;
use crate::pipeline::executor::WorkerExecutor;
use crate::pipeline::state::{PipelineResult, PipelineState};
use crate::pipeline::task::TaskDescriptor;
use crate::pipeline::verifier::Verifier;
use crate::pipeline::LlmSettings;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Stages of one assembly-line run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Decomposing,
    Executing,
    Verifying,
    Done,
    Failed,
}

/// Routing outcome after a verifier verdict
///
/// A pure function of the verdict, the cursor, the queue length, and the
/// attempt budget — the router has no other decision points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    RetrySameIndex,
    AdvanceIndex,
    Complete,
    FailTask,
}

fn route_after_verify(
    passed: bool,
    index: usize,
    queue_len: usize,
    attempts: u32,
    max_attempts: u32,
) -> Transition {
    if !passed {
        if attempts >= max_attempts {
            return Transition::FailTask;
        }
        return Transition::RetrySameIndex;
    }
    if index + 1 < queue_len {
        Transition::AdvanceIndex
    } else {
        Transition::Complete
    }
}

/// One-request assembly-line pipeline
///
/// Owns the component set and drives a fresh [`PipelineState`] through the
/// stage loop per `run` call. Strictly sequential: one capability
/// invocation in flight at a time.
pub struct Pipeline {
    decomposer: TaskDecomposer,
    executor: WorkerExecutor,
    verifier: Verifier,
    assembler: ContextAssembler,
    max_attempts: u32,
}

impl Pipeline {
    /// Build a pipeline from configuration, using file-based reference data
    pub fn new(provider: Arc<dyn LlmProvider>, config: &PipelineConfig) -> Self {
        let reference = FileReferenceSource::from_paths(&config.pipeline.reference_paths);
        Self::with_reference_source(provider, config, Box::new(reference))
    }

    /// Build a pipeline with a custom reference-data collaborator
    pub fn with_reference_source(
        provider: Arc<dyn LlmProvider>,
        config: &PipelineConfig,
        reference: Box<dyn ReferenceSource>,
    ) -> Self {
        let settings = LlmSettings::from_config(&config.llm);
        Self {
            decomposer: TaskDecomposer::new(provider.clone(), settings.clone()),
            executor: WorkerExecutor::new(provider.clone(), settings.clone()),
            verifier: Verifier::new(provider, settings),
            assembler: ContextAssembler::new(reference),
            max_attempts: config.pipeline.max_attempts,
        }
    }

    /// Run one request through the full assembly line
    ///
    /// The host boundary. Capability invocation failures propagate; a task
    /// that exhausts its verification attempts surfaces as
    /// [`PipelineError::TaskFailed`].
    pub async fn run(&self, user_request: &str) -> Result<PipelineResult, PipelineError> {
        let mut state = PipelineState::new();
        state.conversation.push(Message::user(user_request));
        let mut stage = PipelineStage::Decomposing;

        info!(
            request_id = %state.request_id,
            request_length = user_request.len(),
            "Starting pipeline run"
        );

        loop {
            match stage {
                PipelineStage::Decomposing => {
                    self.decomposer.decompose(user_request, &mut state).await?;
                    stage = PipelineStage::Executing;
                }
                PipelineStage::Executing => {
                    let raw = state
                        .current_task()
                        .ok_or_else(|| {
                            PipelineError::invalid_state(format!(
                                "Step index {} out of bounds for queue of {}",
                                state.current_step_index,
                                state.task_queue.len()
                            ))
                        })?
                        .to_string();
                    let descriptor = TaskDescriptor::parse(&raw);

                    state.attempts += 1;
                    debug!(
                        request_id = %state.request_id,
                        step_index = state.current_step_index,
                        attempt = state.attempts,
                        role = %descriptor.role,
                        "Executing task"
                    );

                    let context = self.assembler.assemble(
                        &descriptor,
                        state.last_output.as_deref(),
                        &state.error_feedback,
                    );
                    self.executor.execute(&descriptor, context, &mut state).await?;
                    stage = PipelineStage::Verifying;
                }
                PipelineStage::Verifying => {
                    let raw = state
                        .current_task()
                        .ok_or_else(|| {
                            PipelineError::invalid_state(
                                "Verifier ran without a current task".to_string(),
                            )
                        })?
                        .to_string();
                    self.verifier.verify(&raw, &mut state).await?;

                    let transition = route_after_verify(
                        state.verification_passed,
                        state.current_step_index,
                        state.task_queue.len(),
                        state.attempts,
                        self.max_attempts,
                    );
                    stage = match transition {
                        Transition::RetrySameIndex => {
                            warn!(
                                request_id = %state.request_id,
                                step_index = state.current_step_index,
                                attempt = state.attempts,
                                "Verification failed, retrying task"
                            );
                            PipelineStage::Executing
                        }
                        Transition::AdvanceIndex => {
                            state.current_step_index += 1;
                            state.attempts = 0;
                            state.error_feedback.clear();
                            PipelineStage::Executing
                        }
                        Transition::Complete => PipelineStage::Done,
                        Transition::FailTask => PipelineStage::Failed,
                    };
                }
                PipelineStage::Done => {
                    let elapsed = chrono::Utc::now() - state.started_at;
                    info!(
                        request_id = %state.request_id,
                        tasks = state.task_queue.len(),
                        messages = state.conversation.len(),
                        elapsed_ms = elapsed.num_milliseconds(),
                        "Pipeline run complete"
                    );
                    return Ok(state.into_result());
                }
                PipelineStage::Failed => {
                    warn!(
                        request_id = %state.request_id,
                        step_index = state.current_step_index,
                        attempts = state.attempts,
                        "Task exhausted verification attempts"
                    );
                    return Err(PipelineError::task_failed(
                        state.current_step_index,
                        state.attempts,
                        state.error_feedback.clone(),
                    ));
                }
            }
        }
    }
}
