use anyhow::{Context, Result};
use clap::Parser;
use duel_snake::game::{FoodSpawner, GameConfig};
use duel_snake::modes::VersusMode;
use duel_snake::persistence::HighScoreFile;
use duel_snake::persistence::high_scores::DEFAULT_SCORE_FILE;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duel_snake")]
#[command(version, about = "Two-player split-screen Snake")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells (split evenly between the players)
    #[arg(long)]
    cols: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    rows: Option<usize>,

    /// Where high scores are kept
    #[arg(long, default_value = DEFAULT_SCORE_FILE)]
    scores: PathBuf,

    /// Seed for food placement, for reproducible matches
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "duel_snake=info".into()),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {:?}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config: {:?}", path))?
        }
        None => GameConfig::default(),
    };

    if let Some(cols) = cli.cols {
        config.grid_width = cols;
    }
    if let Some(rows) = cli.rows {
        config.grid_height = rows;
    }

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = load_config(&cli)?;
    info!(
        cols = config.grid_width,
        rows = config.grid_height,
        "Duel Snake v{}",
        env!("CARGO_PKG_VERSION")
    );

    let spawner = match cli.seed {
        Some(seed) => FoodSpawner::seeded(seed),
        None => FoodSpawner::new(),
    };

    let mut versus_mode = VersusMode::new(config, HighScoreFile::new(cli.scores), spawner);
    versus_mode.run().await?;

    Ok(())
}
