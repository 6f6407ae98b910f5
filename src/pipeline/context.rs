//! Execution context assembly for the worker executor
//!
//! Gathers the resolved role's instructions, best-effort auxiliary reference
//! data, the previous step's output, and (on a retry) the verifier's
//! feedback into a single prompt for the current task.

use crate::pipeline::task::TaskDescriptor;
use std::path::PathBuf;
use tracing::debug;

/// Best-effort source of auxiliary reference text
///
/// A replaceable collaborator: the core only needs "fetch optional reference
/// text" and must never fail because of it.
pub trait ReferenceSource: Send + Sync {
    /// Return the reference document, or None if unavailable for any reason
    fn try_read(&self) -> Option<String>;
}

/// Reads the first existing file from an ordered candidate list
pub struct FileReferenceSource {
    candidates: Vec<PathBuf>,
}

impl FileReferenceSource {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn from_paths(paths: &[String]) -> Self {
        Self::new(paths.iter().map(PathBuf::from).collect())
    }
}

impl ReferenceSource for FileReferenceSource {
    fn try_read(&self) -> Option<String> {
        for path in &self.candidates {
            if !path.exists() {
                continue;
            }
            match std::fs::read_to_string(path) {
                Ok(text) => {
                    debug!(path = %path.display(), "Loaded reference data");
                    return Some(text);
                }
                Err(e) => {
                    // Unreadable candidate, try the next location
                    debug!(path = %path.display(), error = %e, "Skipping reference candidate");
                    continue;
                }
            }
        }
        None
    }
}

/// A source with nothing to offer, for hosts without reference data
pub struct NoReference;

impl ReferenceSource for NoReference {
    fn try_read(&self) -> Option<String> {
        None
    }
}

/// Builds the executor prompt for the current task
pub struct ContextAssembler {
    reference: Box<dyn ReferenceSource>,
}

impl ContextAssembler {
    pub fn new(reference: Box<dyn ReferenceSource>) -> Self {
        Self { reference }
    }

    /// Assemble the full worker prompt
    ///
    /// `last_output` is the previous task's output (None on the first task);
    /// `error_feedback` is the judge's critique when this is a retry.
    pub fn assemble(
        &self,
        descriptor: &TaskDescriptor,
        last_output: Option<&str>,
        error_feedback: &str,
    ) -> String {
        let reference_block = match self.reference.try_read() {
            Some(data) => format!(
                "\n--- Reference Data ---\n{data}\n----------------------\n"
            ),
            None => String::new(),
        };

        let mut prompt = format!(
            "{instructions}\n\nContext:\n{reference_block}\nPrevious Progress: {progress}\n",
            instructions = descriptor.role.instructions(),
            progress = last_output.unwrap_or("None"),
        );

        if !error_feedback.is_empty() {
            prompt.push_str(&format!(
                "\nPrevious attempt was rejected by quality assurance. Address this feedback:\n{error_feedback}\n"
            ));
        }

        prompt.push_str(&format!(
            "\nCurrent Task to execute: {}",
            descriptor.description
        ));
        prompt
    }
}
