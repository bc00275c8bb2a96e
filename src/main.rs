use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use sensehat_snake::config::Config;
use sensehat_snake::modes::{HelloMode, ScannerMode, SnakeMode};

#[derive(Parser)]
#[command(name = "sensehat_snake")]
#[command(version, about = "Snake and friends on an 8x8 LED matrix")]
struct Cli {
    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Program to run
    #[arg(long, default_value = "snake")]
    mode: Mode,

    /// Path of the configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Seed for apple placement, overrides the configuration file
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal shows the matrix)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with the arrow keys
    Snake,
    /// Show a greeting
    Hello,
    /// Sweep a light across the matrix
    Scanner,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    sensehat_snake::logging::setup(cli.verbosity, cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path).await?,
        None => Config::default(),
    };
    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }
    tracing::debug!(?config, "Configuration loaded");

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Snake => {
            let mut snake_mode = SnakeMode::new(config.game, config.display);
            snake_mode.run().await?;
        }
        Mode::Hello => {
            let mut hello_mode = HelloMode::new(config.display);
            hello_mode.run().await?;
        }
        Mode::Scanner => {
            let mut scanner_mode = ScannerMode::new(config.display);
            scanner_mode.run().await?;
        }
    }

    Ok(())
}
