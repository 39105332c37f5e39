//! Tunable constants for the playfield, physics and payouts.
//!
//! Every value has a default matching the arcade feel of the game; a TOML
//! file may override any subset of them.

use crate::error::{FlapsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical playfield size. Rendering scales it to the terminal.
    pub width: f64,
    pub height: f64,

    pub gravity: f64,
    /// Velocity set by a flap. Negative is up.
    pub flap_impulse: f64,

    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,

    pub obstacle_width: f64,
    pub gap_height: f64,
    /// Minimum distance between the gap and the top or bottom edge.
    pub gap_margin: f64,
    pub obstacle_speed: f64,
    pub spawn_interval_ms: f64,
    /// Obstacles are dropped once their right edge is this far past x = 0.
    pub offscreen_threshold: f64,

    /// Shrinks both boxes before the overlap test.
    pub forgiveness: f64,
    pub reward_per_obstacle: u64,

    /// Elapsed milliseconds that count as one physics step.
    pub frame_reference_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            gravity: 0.3,
            flap_impulse: -6.0,
            player_x: 100.0,
            player_width: 80.0,
            player_height: 60.0,
            obstacle_width: 80.0,
            gap_height: 300.0,
            gap_margin: 50.0,
            obstacle_speed: 1.5,
            spawn_interval_ms: 3000.0,
            offscreen_threshold: 100.0,
            forgiveness: 5.0,
            reward_per_obstacle: 100,
            frame_reference_ms: 16.0,
        }
    }
}

impl GameConfig {
    /// Reads a TOML file; missing keys fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: GameConfig = toml::from_str(&text)?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("width", self.width),
            ("height", self.height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("frame_reference_ms", self.frame_reference_ms),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(FlapsError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.gap_margin < 0.0 || self.forgiveness < 0.0 {
            return Err(FlapsError::Config(
                "gap_margin and forgiveness cannot be negative".into(),
            ));
        }
        if self.gap_height + 2.0 * self.gap_margin > self.height {
            return Err(FlapsError::Config(format!(
                "gap of {} with margins of {} does not fit a playfield {} high",
                self.gap_height, self.gap_margin, self.height
            )));
        }
        Ok(())
    }

    /// Vertical room the gap's top edge may move within.
    pub fn gap_range(&self) -> f64 {
        self.height - self.gap_height - 2.0 * self.gap_margin
    }

    pub fn player_start_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Converts elapsed milliseconds into physics steps.
    pub fn steps(&self, elapsed_ms: f64) -> f64 {
        elapsed_ms / self.frame_reference_ms
    }
}
