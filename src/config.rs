//! Configuration system for the assembly-line pipeline
//!
//! Configuration is loaded from a TOML file and threaded explicitly through
//! every component — the state machine never reads ambient process state.
//! Secrets stay out of the file: the config names an environment variable
//! and the key is resolved at call time.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Top-level pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    pub llm: LlmSection,
    #[serde(default)]
    pub pipeline: PipelineSection,
}

/// LLM section: which capability backend to call and how
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmSection {
    /// Provider name (e.g., "gemini")
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Environment variable containing the API key
    pub api_key_env: String,
    /// Sampling temperature (default: 0.2)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Optional max output tokens
    pub max_tokens: Option<u32>,
}

/// Pipeline section: orchestration tunables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineSection {
    /// Maximum executor attempts per task before the pipeline fails
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Candidate locations for the auxiliary reference document, first hit wins
    #[serde(default = "default_reference_paths")]
    pub reference_paths: Vec<String>,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            reference_paths: default_reference_paths(),
        }
    }
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_attempts() -> u32 {
    3
}

fn default_reference_paths() -> Vec<String> {
    vec![
        "reference_data.csv".to_string(),
        "data/reference_data.csv".to_string(),
        "/app/reference_data.csv".to_string(),
    ]
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "llm.model must not be empty".to_string(),
            ));
        }
        if self.pipeline.max_attempts == 0 {
            return Err(ConfigError::InvalidConfig(
                "pipeline.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the LLM API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.llm.api_key_env)
            .map_err(|_| ConfigError::EnvVarNotFound(self.llm.api_key_env.clone()))
    }

    /// Create a test configuration for unit testing
    #[cfg(test)]
    pub fn test_config() -> Self {
        let toml_content = r#"
[llm]
provider = "gemini"
model = "gemini-2.0-flash"
api_key_env = "GEMINI_API_KEY"
"#;
        toml::from_str(toml_content).expect("Test config should parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let toml_content = r#"
[llm]
provider = "gemini"
model = "gemini-2.0-flash"
api_key_env = "GEMINI_API_KEY"
temperature = 0.5
max_tokens = 2048

[pipeline]
max_attempts = 5
reference_paths = ["a.csv", "/data/b.csv"]
"#;

        let config: PipelineConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.temperature, 0.5);
        assert_eq!(config.llm.max_tokens, Some(2048));
        assert_eq!(config.pipeline.max_attempts, 5);
        assert_eq!(config.pipeline.reference_paths.len(), 2);
    }

    #[test]
    fn test_minimal_config_defaults() {
        let toml_content = r#"
[llm]
provider = "gemini"
model = "gemini-2.0-flash"
api_key_env = "GEMINI_API_KEY"
"#;

        let config: PipelineConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.llm.max_tokens, None);
        assert_eq!(config.pipeline.max_attempts, 3);
        assert_eq!(
            config.pipeline.reference_paths[0],
            "reference_data.csv".to_string()
        );
    }

    #[test]
    fn test_zero_max_attempts_rejected() {
        let toml_content = r#"
[llm]
provider = "gemini"
model = "gemini-2.0-flash"
api_key_env = "GEMINI_API_KEY"

[pipeline]
max_attempts = 0
"#;

        let config: PipelineConfig = toml::from_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_model_rejected() {
        let toml_content = r#"
[llm]
provider = "gemini"
model = "  "
api_key_env = "GEMINI_API_KEY"
"#;

        let config: PipelineConfig = toml::from_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }
}
