use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const GRID_WIDTH: i16 = 10;
pub const GRID_HEIGHT: i16 = 10;
pub const CELL_SIZE: i16 = 30;
pub const MAX_LEVEL: u32 = 10;
pub const APPLES_PER_LEVEL: u32 = 15;
pub const REPEAT_MULTIPLIER: u32 = 5;
pub const INITIAL_SNAKE_LEN: i16 = 3;
pub const MAX_NAME_LEN: usize = 16;

pub const WINDOW_WIDTH: f32 = 500.0;
pub const WINDOW_HEIGHT: f32 = 400.0;

pub const DEFAULT_LEADERBOARD_FILE: &str = "leaderboard.json";

// Upper bounds accepted from a config file
pub const MAX_BOARD_PX: i32 = 4096;
pub const MAX_MOVES_PER_SECOND: u32 = 1000;

// Moves per second for levels 1..=MAX_LEVEL
const LEVEL_FREQUENCIES: [u32; MAX_LEVEL as usize] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Tunables for a game session. Every field falls back to the compiled-in
/// default when missing from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_width: i16,
    pub grid_height: i16,
    pub cell_size: i16,
    pub max_level: u32,
    pub apples_per_level: u32,
    /// Speed-up applied while a direction key is held down.
    pub repeat_multiplier: u32,
    /// Moves per second, indexed by `level - 1`.
    pub level_frequencies: Vec<u32>,
    pub leaderboard_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            max_level: MAX_LEVEL,
            apples_per_level: APPLES_PER_LEVEL,
            repeat_multiplier: REPEAT_MULTIPLIER,
            level_frequencies: LEVEL_FREQUENCIES.to_vec(),
            leaderboard_file: PathBuf::from(DEFAULT_LEADERBOARD_FILE),
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        let config: GameConfig = serde_json::from_str(&contents)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width < INITIAL_SNAKE_LEN {
            return Err(Error::InvalidConfig(format!(
                "grid width {} cannot hold the initial snake",
                self.grid_width
            )));
        }
        if self.cell_size <= 0 {
            return Err(Error::InvalidConfig("cell_size must be positive".to_string()));
        }
        let (width_px, height_px) = (
            i32::from(self.grid_width) * i32::from(self.cell_size),
            i32::from(self.grid_height) * i32::from(self.cell_size),
        );
        if width_px > MAX_BOARD_PX || height_px > MAX_BOARD_PX {
            return Err(Error::InvalidConfig(format!(
                "board of {}x{} px exceeds {} px",
                width_px, height_px, MAX_BOARD_PX
            )));
        }
        if self.max_level == 0 {
            return Err(Error::InvalidConfig("max_level must be at least 1".to_string()));
        }
        if self.apples_per_level == 0 {
            return Err(Error::InvalidConfig(
                "apples_per_level must be at least 1".to_string(),
            ));
        }
        // The longest snake in a level is the initial body plus one level's apples,
        // and at least one cell must stay free for the apple.
        let cells = self.grid_width as u64 * self.grid_height as u64;
        let longest = INITIAL_SNAKE_LEN as u64 + self.apples_per_level as u64;
        if longest >= cells {
            return Err(Error::InvalidConfig(format!(
                "a {}x{} grid is too small for {} apples per level",
                self.grid_width, self.grid_height, self.apples_per_level
            )));
        }
        if self.repeat_multiplier == 0 {
            return Err(Error::InvalidConfig(
                "repeat_multiplier must be at least 1".to_string(),
            ));
        }
        if self.level_frequencies.len() < self.max_level as usize {
            return Err(Error::InvalidConfig(format!(
                "level_frequencies has {} entries but max_level is {}",
                self.level_frequencies.len(),
                self.max_level
            )));
        }
        if self.level_frequencies.iter().any(|&freq| freq == 0) {
            return Err(Error::InvalidConfig(
                "level_frequencies must all be non-zero".to_string(),
            ));
        }
        if let Some(freq) = self
            .level_frequencies
            .iter()
            .find(|&&freq| freq > MAX_MOVES_PER_SECOND)
        {
            return Err(Error::InvalidConfig(format!(
                "level frequency {} exceeds {} moves per second",
                freq, MAX_MOVES_PER_SECOND
            )));
        }
        Ok(())
    }

    /// Moves per second for `level`, clamped to the table.
    pub fn frequency_for(&self, level: u32) -> u32 {
        let index = level.clamp(1, self.max_level) as usize - 1;
        self.level_frequencies
            .get(index)
            .or(self.level_frequencies.last())
            .copied()
            .unwrap_or(1)
    }

    pub fn board_width_px(&self) -> f32 {
        f32::from(self.grid_width) * f32::from(self.cell_size)
    }

    pub fn board_height_px(&self) -> f32 {
        f32::from(self.grid_height) * f32::from(self.cell_size)
    }
}
