//! agentline - Main entry point
//!
//! Host boundary for the assembly-line pipeline: loads configuration, wires
//! the LLM provider, runs one request end to end, and prints the result as
//! JSON. Any internal failure becomes a uniform non-zero exit.

use agentline::config::PipelineConfig;
use agentline::llm::create_provider;
use agentline::observability::init_default_logging;
use agentline::pipeline::Pipeline;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

/// Assembly-line multi-specialist agent pipeline
#[derive(Parser)]
#[command(name = "agentline")]
#[command(about = "Plan, execute, and verify multi-step AI requests")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one request through the pipeline
    Run {
        /// The request text; reads stdin when omitted
        request: Vec<String>,
    },
    /// Validate configuration
    Config {
        /// Show the resolved configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();

    let config = match load_configuration(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run { request } => run_request(config, request).await,
        Commands::Config { show } => handle_config_command(config, show),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_configuration(
    config_path: &Option<PathBuf>,
) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Ok(PipelineConfig::load_from_file(path)?)
        }
        None => {
            let default_paths = ["agentline.toml", "config/agentline.toml"];

            for path_str in default_paths {
                let path = PathBuf::from(path_str);
                if path.exists() {
                    info!("Loading configuration from: {}", path.display());
                    return Ok(PipelineConfig::load_from_file(&path)?);
                }
            }

            Err(format!(
                "No configuration file found. Tried: {}",
                default_paths.join(", ")
            )
            .into())
        }
    }
}

async fn run_request(
    config: PipelineConfig,
    request: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request_text = if request.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer.trim().to_string()
    } else {
        request.join(" ")
    };

    if request_text.is_empty() {
        return Err("Empty request".into());
    }

    let provider = create_provider(&config.llm.provider, config.api_key()?)?;
    let pipeline = Pipeline::new(provider, &config);

    let result = pipeline.run(&request_text).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn handle_config_command(
    config: PipelineConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    info!("Configuration is valid");

    if show {
        println!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}
