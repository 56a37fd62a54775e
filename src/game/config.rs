use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::Position;

/// Largest board the terminal renderer draws
pub const MAX_BOARD_SIZE: usize = 100;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board, in cells
    pub board_size: usize,
    /// Period of the movement trigger
    pub move_interval_ms: u64,
    /// Period of the elapsed-time trigger
    pub clock_interval_ms: u64,
    /// Maximum number of candidate cells drawn when placing food
    pub food_spawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 15,
            move_interval_ms: 200,
            clock_interval_ms: 1000,
            food_spawn_attempts: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Parse a YAML document; absent fields keep their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml_ng::from_str(content).context("Failed to parse game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.board_size >= 2,
            "board_size must be at least 2, got {}",
            self.board_size
        );
        ensure!(
            self.board_size <= MAX_BOARD_SIZE,
            "board_size must be at most {}, got {}",
            MAX_BOARD_SIZE,
            self.board_size
        );
        ensure!(self.move_interval_ms > 0, "move_interval_ms must be positive");
        ensure!(self.clock_interval_ms > 0, "clock_interval_ms must be positive");
        ensure!(
            self.food_spawn_attempts > 0,
            "food_spawn_attempts must be positive"
        );
        Ok(())
    }

    /// Where a fresh snake starts: the middle of the board
    pub fn start_position(&self) -> Position {
        let center = (self.board_size / 2) as i32;
        Position::new(center, center)
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }
}
