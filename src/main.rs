use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use snake_tui::game::GameConfig;
use snake_tui::logger::init_file_logger;
use snake_tui::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// YAML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length in cells (overrides the config file)
    #[arg(long)]
    board_size: Option<usize>,

    /// Milliseconds between snake moves (overrides the config file)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Write logs to this file; filter with RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(board_size) = self.board_size {
            config.board_size = board_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.move_interval_ms = tick_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logger(path)?;
    }

    let config = cli.game_config()?;
    info!("Starting with {:?}", config);

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
    }

    Ok(())
}
