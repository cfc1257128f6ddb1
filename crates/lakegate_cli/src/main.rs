mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lakegate_core::PipelineConfig;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lakegate")]
#[command(version, about = "Warehouse transformation and quality-gate CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the warehouse database file
    #[arg(short, long, global = true, env = "LAKEGATE_DB")]
    database: Option<String>,

    /// Path to a pipeline configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the trusted-layer tables if they do not exist
    Init,

    /// Rebuild every refined table from the trusted layer
    Transform {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Run the validation gate against one or both layers
    Validate {
        /// Layer to validate: trusted, refined, all
        #[arg(short, long, default_value = "all")]
        layer: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Full pipeline: validate trusted, transform, validate refined
    Run {
        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let mut config = match cli.config.as_deref() {
        Some(path) => PipelineConfig::load(Path::new(path))?,
        None => PipelineConfig::default(),
    };
    // The flag (or LAKEGATE_DB) outranks the configuration file.
    if let Some(database) = cli.database {
        config.database = database;
    }

    // Execute command
    match cli.command {
        Commands::Init => commands::init::execute(&config).await,

        Commands::Transform { format } => commands::transform::execute(&config, &format).await,

        Commands::Validate { layer, format } => {
            commands::validate::execute(&config, &layer, &format).await
        }

        Commands::Run { format } => commands::run::execute(&config, &format).await,
    }
}
