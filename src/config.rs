//! Game tuning constants
//!
//! Everything that shapes gameplay feel lives in [`GameConfig`]. The defaults
//! are the shipped balance; hosts may override them from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Level;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// A `[min, max)` range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample in `[0, 1)` into the span
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        t * (self.max - self.min) + self.min
    }
}

/// Immutable per-game constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playing field size in pixels
    pub field_width: f32,
    pub field_height: f32,

    /// Player bounding size (diameter); the floor bound is `field_height - player_size`
    pub player_size: f32,
    /// Collision radius of the player circle
    pub player_radius: f32,
    /// Fixed horizontal position of the player
    pub player_x: f32,
    pub player_start_y: f32,

    /// Added to velocity every tick
    pub gravity: f32,
    /// Velocity a jump sets (negative = up)
    pub jump_impulse: f32,

    /// Obstacle speed per level, indexed easy/medium/hard
    pub speed: [f32; 3],
    /// Obstacles per level, indexed easy/medium/hard
    pub obstacle_count: [u32; 3],

    /// Distance past the right edge where obstacles spawn
    pub spawn_margin: f32,
    /// Keeps spawned obstacles off the top and bottom edges
    pub spawn_inset: f32,
    /// Extra x offset between consecutive obstacles of a fresh wave
    pub spawn_spacing: f32,
    pub length: Span,
    pub width: Span,
    /// Vertical bob magnitudes; one is picked per obstacle
    pub bob: [f32; 2],
    /// Multiplier applied to the vertical direction each tick
    pub vertical_step: f32,

    /// Obstacles left of this x get recycled
    pub recycle_threshold: f32,
    /// Points awarded per recycled obstacle
    pub recycle_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 400.0,
            field_height: 300.0,

            player_size: 16.0,
            player_radius: 8.0,
            player_x: 50.0,
            player_start_y: 150.0,

            gravity: 0.4,
            jump_impulse: -6.0,

            speed: [2.0, 3.0, 4.0],
            obstacle_count: [3, 5, 7],

            spawn_margin: 50.0,
            spawn_inset: 50.0,
            spawn_spacing: 200.0,
            length: Span::new(40.0, 80.0),
            width: Span::new(10.0, 20.0),
            bob: [0.5, 1.0],
            vertical_step: 0.5,

            recycle_threshold: -50.0,
            recycle_reward: 10,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(ConfigError::Invalid("field dimensions must be positive"));
        }
        if self.player_size <= 0.0 || self.player_size >= self.field_height {
            return Err(ConfigError::Invalid("player size must fit inside the field"));
        }
        if self.player_radius <= 0.0 {
            return Err(ConfigError::Invalid("player radius must be positive"));
        }
        if self.jump_impulse >= 0.0 {
            return Err(ConfigError::Invalid("jump impulse must point upward"));
        }
        if self.speed[0] <= 0.0 {
            return Err(ConfigError::Invalid("obstacles must move toward the player"));
        }
        if self.speed.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::Invalid("speed must not decrease with level"));
        }
        if 2.0 * self.spawn_inset >= self.field_height {
            return Err(ConfigError::Invalid("spawn inset leaves no room to spawn"));
        }
        if self.length.min >= self.length.max || self.width.min >= self.width.max {
            return Err(ConfigError::Invalid("size ranges are empty or inverted"));
        }
        if self.width.max > self.length.min {
            return Err(ConfigError::Invalid("obstacles must be longer than wide"));
        }
        Ok(())
    }

    pub fn speed(&self, level: Level) -> f32 {
        self.speed[level.index()]
    }

    pub fn obstacle_count(&self, level: Level) -> usize {
        self.obstacle_count[level.index()] as usize
    }

    /// Lowest y the player may occupy before hitting the floor
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.field_height - self.player_size
    }

    /// Where new and recycled obstacles enter
    #[inline]
    pub fn spawn_x(&self) -> f32 {
        self.field_width + self.spawn_margin
    }

    /// Vertical range obstacles spawn in
    pub fn spawn_y(&self) -> Span {
        Span::new(self.spawn_inset, self.field_height - self.spawn_inset)
    }
}
