use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::GameError;

/// Largest grid side accepted; keeps cell coordinates well inside `i32`
pub const MAX_GRID_SIDE: usize = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Obstacles generated per difficulty level
    pub obstacles_per_level: usize,
    /// Simulation ticks per second
    pub tick_rate_hz: u32,
    /// Random samples tried before a placement falls back to scanning for free cells
    pub placement_attempts: u32,
    /// Number of history rows shown on the game over screen
    pub history_display: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        // 800x600 window at 20px cells
        Self {
            grid_width: 40,
            grid_height: 30,
            obstacles_per_level: 5,
            tick_rate_hz: 10,
            placement_attempts: 10_000,
            history_display: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width < 3 || self.grid_height < 3 {
            return Err(GameError::InvalidConfig(format!(
                "grid must be at least 3x3, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(GameError::InvalidConfig(format!(
                "grid sides are limited to {}, got {}x{}",
                MAX_GRID_SIDE, self.grid_width, self.grid_height
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(GameError::InvalidConfig(
                "tick_rate_hz must be positive".to_string(),
            ));
        }
        if self.placement_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "placement_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Time between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }

    /// Number of obstacles placed at the given difficulty
    pub fn obstacle_count(&self, difficulty: Difficulty) -> usize {
        difficulty.level() as usize * self.obstacles_per_level
    }
}

/// Difficulty level, 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, GameError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(GameError::InvalidDifficulty(level))
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// All selectable levels in ascending order
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (Self::MIN..=Self::MAX).map(Difficulty)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
