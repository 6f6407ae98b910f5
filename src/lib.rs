//! agentline - assembly-line multi-specialist agent pipeline
//!
//! Coordinates a small team of specialized AI workers to complete a
//! multi-step request: a planner decomposes the request into ordered
//! role-tagged tasks, each task runs through a role-appropriate worker, a
//! verifier gates every output, and the router advances or retries until
//! the queue is done.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agentline::config::PipelineConfig;
//! use agentline::llm::create_provider;
//! use agentline::pipeline::Pipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::load_from_file("agentline.toml".as_ref())?;
//! let provider = create_provider(&config.llm.provider, config.api_key()?)?;
//! let pipeline = Pipeline::new(provider, &config);
//!
//! let result = pipeline.run("summarize this quarter's revenue").await?;
//! println!("{}", result.final_answer);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod llm;
pub mod observability;
pub mod pipeline;
pub mod testing;

pub use config::{ConfigError, PipelineConfig};
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineResult, SpecialistRole, TaskDescriptor};
