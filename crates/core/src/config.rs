//! Game configuration.
//!
//! Defaults reproduce the classic 10x20 board with a 600ms starting drop
//! interval. A TOML file may override any subset of keys:
//!
//! ```toml
//! width = 12
//! height = 24
//!
//! [speed]
//! start_ms = 500
//! decrement_ms = 4
//! min_ms = 80
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, DROP_DECREMENT_MS, DROP_MIN_MS, DROP_START_MS, PREVIEW_SIZE,
};

pub const MIN_BOARD_WIDTH: u8 = 4;
pub const MAX_BOARD_WIDTH: u8 = 40;
pub const MIN_BOARD_HEIGHT: u8 = 4;
pub const MAX_BOARD_HEIGHT: u8 = 60;
pub const MIN_PREVIEW_SIZE: u8 = 4;
pub const MAX_PREVIEW_SIZE: u8 = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board width {0} is outside 4..=40")]
    Width(u8),
    #[error("board height {0} is outside 4..=60")]
    Height(u8),
    #[error("preview size {0} is outside 4..=8")]
    PreviewSize(u8),
    #[error("minimum drop interval must be greater than zero")]
    ZeroMinInterval,
    #[error("minimum drop interval {min_ms}ms exceeds the starting interval {start_ms}ms")]
    InvertedSpeed { start_ms: u32, min_ms: u32 },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Gravity timing, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Drop interval with no rows cleared
    pub start_ms: u32,
    /// Reduction per cleared row
    pub decrement_ms: u32,
    /// Floor
    pub min_ms: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            start_ms: DROP_START_MS,
            decrement_ms: DROP_DECREMENT_MS,
            min_ms: DROP_MIN_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub speed: SpeedConfig,
    /// Size of the next-piece preview box, in cells
    pub preview_size: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            speed: SpeedConfig::default(),
            preview_size: PREVIEW_SIZE,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_WIDTH..=MAX_BOARD_WIDTH).contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if !(MIN_PREVIEW_SIZE..=MAX_PREVIEW_SIZE).contains(&self.preview_size) {
            return Err(ConfigError::PreviewSize(self.preview_size));
        }
        if self.speed.min_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.speed.min_ms > self.speed.start_ms {
            return Err(ConfigError::InvertedSpeed {
                start_ms: self.speed.start_ms,
                min_ms: self.speed.min_ms,
            });
        }
        Ok(())
    }
}
