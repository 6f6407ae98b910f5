//! LLM provider abstraction layer
//!
//! This module provides a provider-agnostic interface for LLM interactions.
//! The pipeline consumes providers exclusively through the [`LlmProvider`]
//! trait so tests can substitute scripted implementations.

pub mod provider;
pub mod providers;

pub use provider::*;
pub use providers::*;
