use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use snake_arcade::game::{Difficulty, GameConfig};
use snake_arcade::metrics::SessionHistory;
use snake_arcade::modes::ArcadeMode;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Snake with obstacles, ranks and a session high-score table")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Game ticks per second (overrides the config file)
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Start straight at this difficulty (1-5) instead of showing the menu
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Write logs to this file; the terminal is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    let level: u8 = s.parse().map_err(|_| format!("not a number: {}", s))?;
    Difficulty::new(level).map_err(|e| e.to_string())
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = GameConfig::load_or_default(cli.config.as_deref())?;
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if let Some(tick_rate) = cli.tick_rate {
        config.tick_rate_hz = tick_rate;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = build_config(&cli)?;
    info!("Starting with {:?}", config);

    // Lives for the whole process; dropped on exit
    let session = SessionHistory::new();
    let mut mode = ArcadeMode::new(config, session);
    if let Some(difficulty) = cli.difficulty {
        mode.start_at(difficulty);
    }

    mode.run().await?;

    let session = mode.into_session();
    info!(
        "Exiting after {} games, best score {:?}",
        session.attempts(),
        session.high_score()
    );

    Ok(())
}
