//! Fungi CLI - Command-line front-end for the fungi prediction service
//!
//! Submits a photo to a running prediction service and renders the
//! predicted species and confidence.

mod commands;
mod config;
mod output;
mod view;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fungi_client::PredictClient;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "fungi-cli")]
#[command(author, version, about = "Fungi species classification CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Prediction service URL
    #[arg(short, long, env = "FUNGI_SERVER")]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "FUNGI_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a fungi photo
    Classify {
        /// Path to the image file
        image: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(cli.server.as_deref(), cli.no_color);

    // Create output context
    let ctx = OutputContext::new(cli.output, merged.no_color, cli.quiet);

    // Execute command
    match &cli.command {
        Commands::Classify { image } => {
            let client = create_client(&merged.server)?;
            commands::classify(&client, image, &ctx).await
        }
    }
}

/// Create a prediction client for the given server URL
fn create_client(server: &str) -> Result<PredictClient> {
    PredictClient::new(server).context("Failed to create prediction client")
}
