use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a two-player match
///
/// Timing values are stored in milliseconds so the struct reads naturally
/// from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns in the play area (split evenly between players)
    pub grid_width: usize,
    /// Number of rows in the play area
    pub grid_height: usize,
    /// Length of each snake when a game starts
    pub initial_snake_length: usize,
    /// Column offset of the starting head from the left edge of its half
    pub spawn_offset: usize,

    // Speed progression
    /// Tick interval at the start of every game
    pub initial_delay_ms: u64,
    /// How much the tick interval shrinks per food eaten
    pub speed_step_ms: u64,
    /// The tick interval never drops below this
    pub min_delay_ms: u64,

    // Session pacing
    /// Countdown value shown when a game is (re)started
    pub countdown_from: u32,
    pub countdown_period_ms: u64,
    /// Summary opacity gained per fade step
    pub fade_step: f32,
    pub fade_period_ms: u64,
    pub blink_period_ms: u64,
    pub intro_period_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // 1000x600 px canvas with 20 px cells
            grid_width: 50,
            grid_height: 30,
            initial_snake_length: 4,
            spawn_offset: 4,
            initial_delay_ms: 160,
            speed_step_ms: 6,
            min_delay_ms: 50,
            countdown_from: 3,
            countdown_period_ms: 1000,
            fade_step: 0.08,
            fade_period_ms: 50,
            blink_period_ms: 400,
            intro_period_ms: 150,
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

    /// Derive the grid from a pixel canvas and a square cell size
    pub fn from_canvas(pixel_width: usize, pixel_height: usize, cell_size: usize) -> Self {
        Self::new(pixel_width / cell_size.max(1), pixel_height / cell_size.max(1))
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(20, 10)
    }

    /// Reject configurations the simulation cannot start from
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= 2 && self.grid_width % 2 == 0,
            "grid width must be a positive even number, got {}",
            self.grid_width
        );
        ensure!(self.grid_height > 0, "grid height must be positive");
        ensure!(
            self.initial_snake_length >= 4,
            "snakes start with at least 4 segments, got {}",
            self.initial_snake_length
        );
        ensure!(
            self.spawn_offset + 1 >= self.initial_snake_length,
            "spawn offset {} leaves no room for a {}-segment body",
            self.spawn_offset,
            self.initial_snake_length
        );
        // Player two mirrors the offset from the right edge, body trailing left.
        ensure!(
            self.spawn_offset + self.initial_snake_length <= self.grid_width / 2,
            "spawn offset {} does not fit a {}-segment body in a {}-column half",
            self.spawn_offset,
            self.initial_snake_length,
            self.grid_width / 2
        );
        ensure!(
            self.min_delay_ms > 0 && self.min_delay_ms <= self.initial_delay_ms,
            "minimum delay must be in 1..={} ms",
            self.initial_delay_ms
        );
        ensure!(self.fade_step > 0.0, "fade step must be positive");
        ensure!(
            self.countdown_period_ms > 0
                && self.fade_period_ms > 0
                && self.blink_period_ms > 0
                && self.intro_period_ms > 0,
            "task periods must be non-zero"
        );
        Ok(())
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn speed_step(&self) -> Duration {
        Duration::from_millis(self.speed_step_ms)
    }

    pub fn countdown_period(&self) -> Duration {
        Duration::from_millis(self.countdown_period_ms)
    }

    pub fn fade_period(&self) -> Duration {
        Duration::from_millis(self.fade_period_ms)
    }

    pub fn blink_period(&self) -> Duration {
        Duration::from_millis(self.blink_period_ms)
    }

    pub fn intro_period(&self) -> Duration {
        Duration::from_millis(self.intro_period_ms)
    }
}
