//! Task descriptors and specialist roles
//!
//! Queue entries are raw strings of the form `[RoleTag]: description`. They
//! are parsed on demand into a [`TaskDescriptor`]; the raw string remains the
//! source of truth in [`crate::pipeline::state::PipelineState::task_queue`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of specialist roles
///
/// Unrecognized or missing tags always resolve to `Researcher`; resolution
/// has no failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialistRole {
    Coder,
    Vision,
    Data,
    Researcher,
}

impl SpecialistRole {
    /// Resolve a role tag to a specialist
    ///
    /// Substring containment against the known names, first match wins in a
    /// fixed priority order. Pure and total: anything unrecognized is a
    /// Researcher.
    pub fn resolve(tag: &str) -> Self {
        if tag.contains("Coder") {
            SpecialistRole::Coder
        } else if tag.contains("Vision") {
            SpecialistRole::Vision
        } else if tag.contains("Data") {
            SpecialistRole::Data
        } else {
            SpecialistRole::Researcher
        }
    }

    /// The fixed behavior profile for this role, used as the worker's
    /// system prompt
    pub fn instructions(&self) -> &'static str {
        match self {
            SpecialistRole::Coder => CODER_INSTRUCTIONS,
            SpecialistRole::Vision => VISION_INSTRUCTIONS,
            SpecialistRole::Data => DATA_INSTRUCTIONS,
            SpecialistRole::Researcher => RESEARCHER_INSTRUCTIONS,
        }
    }
}

impl fmt::Display for SpecialistRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpecialistRole::Coder => "Coder",
            SpecialistRole::Vision => "Vision",
            SpecialistRole::Data => "Data",
            SpecialistRole::Researcher => "Researcher",
        };
        write!(f, "{name}")
    }
}

const CODER_INSTRUCTIONS: &str = "\
You are a Senior Software Engineer and Architect.
Your goal is to write production-ready, efficient, and well-documented code.
Always consider:
1. Best practices (Clean Code, SOLID).
2. Error handling and performance.
3. Language-specific idioms.";

const VISION_INSTRUCTIONS: &str = "\
You are a Vision & Document Intelligence Expert.
Your goal is to extract every detail from images or documents provided.
- For OCR: Maintain the original structure of the text.
- For Image Analysis: Describe context, objects, and hidden details.
- Be precise and structured.";

const DATA_INSTRUCTIONS: &str = "\
You are a Data Scientist.
You specialize in extracting insights from data, formatting CSVs, and \
performing complex calculations.
Always return data in a structured, easy-to-use format.";

const RESEARCHER_INSTRUCTIONS: &str = "You are a helpful Research Assistant.";

/// Parsed view of one queue entry
///
/// Derived on demand from the raw descriptor string, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDescriptor {
    pub role: SpecialistRole,
    pub description: String,
    /// The original queue entry, role-tag prefix included
    pub raw: String,
}

impl TaskDescriptor {
    /// Parse a raw queue entry of the form `[RoleTag]: description`
    ///
    /// Splits on the first `]:`. The left side minus brackets, trimmed, is
    /// the role tag; the right side is the description. Without the
    /// delimiter the whole entry is the description and the role defaults
    /// to Researcher.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once("]:") {
            Some((tag, description)) => {
                let tag = tag.replace('[', "");
                Self {
                    role: SpecialistRole::resolve(tag.trim()),
                    description: description.trim().to_string(),
                    raw: raw.to_string(),
                }
            }
            None => Self {
                role: SpecialistRole::Researcher,
                description: raw.to_string(),
                raw: raw.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_tagged_descriptor() {
        let descriptor = TaskDescriptor::parse("[Data]: summarize the csv");
        assert_eq!(descriptor.role, SpecialistRole::Data);
        assert_eq!(descriptor.description, "summarize the csv");
        assert_eq!(descriptor.raw, "[Data]: summarize the csv");
    }

    #[test]
    fn test_parse_without_delimiter_defaults_to_researcher() {
        let descriptor = TaskDescriptor::parse("just do the thing");
        assert_eq!(descriptor.role, SpecialistRole::Researcher);
        assert_eq!(descriptor.description, "just do the thing");
    }

    #[test]
    fn test_parse_splits_on_first_delimiter_only() {
        let descriptor = TaskDescriptor::parse("[Coder]: handle the ]: edge");
        assert_eq!(descriptor.role, SpecialistRole::Coder);
        assert_eq!(descriptor.description, "handle the ]: edge");
    }

    #[test]
    fn test_parse_tolerates_leading_whitespace_in_tag() {
        // The planner example output includes " [Data]: ..." with a space
        let descriptor = TaskDescriptor::parse(" [Data]: read the file");
        assert_eq!(descriptor.role, SpecialistRole::Data);
        assert_eq!(descriptor.description, "read the file");
    }

    #[test]
    fn test_resolve_priority_order() {
        // Coder wins over later names when a tag matches more than one
        assert_eq!(
            SpecialistRole::resolve("CoderVision"),
            SpecialistRole::Coder
        );
        assert_eq!(SpecialistRole::resolve("VisionData"), SpecialistRole::Vision);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert_eq!(SpecialistRole::resolve("coder"), SpecialistRole::Researcher);
        assert_eq!(SpecialistRole::resolve("Coder"), SpecialistRole::Coder);
    }

    #[test]
    fn test_resolve_idempotent() {
        let first = SpecialistRole::resolve("DataCruncher");
        let second = SpecialistRole::resolve("DataCruncher");
        assert_eq!(first, second);
        assert_eq!(first.instructions(), second.instructions());
    }

    #[test]
    fn test_instructions_nonempty_for_all_roles() {
        for role in [
            SpecialistRole::Coder,
            SpecialistRole::Vision,
            SpecialistRole::Data,
            SpecialistRole::Researcher,
        ] {
            assert!(!role.instructions().is_empty());
        }
    }

    proptest! {
        #[test]
        fn prop_undelimited_input_is_researcher(raw in "[^\\]]*") {
            // No ']' at all means no "]:" delimiter
            let descriptor = TaskDescriptor::parse(&raw);
            prop_assert_eq!(descriptor.role, SpecialistRole::Researcher);
            prop_assert_eq!(descriptor.description, raw.clone());
            prop_assert_eq!(descriptor.raw, raw);
        }
    }
}
