use std::time::Duration;

use anyhow::{ensure, Result};

use crate::snake::Position;

/// Playfield geometry and pacing for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Width of the playfield in logical units
    pub width: i32,
    /// Height of the playfield in logical units
    pub height: i32,
    /// Grid pitch: movement step and square size
    pub pitch: i32,
    /// Frames per second the loop is paced at
    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            pitch: 10,
            ticks_per_second: 15,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.pitch > 0, "grid pitch must be positive, got {}", self.pitch);
        ensure!(
            self.width > 0 && self.height > 0,
            "playfield must not be empty, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.width % self.pitch == 0 && self.height % self.pitch == 0,
            "playfield {}x{} is not a multiple of the grid pitch {}",
            self.width,
            self.height,
            self.pitch
        );
        ensure!(self.ticks_per_second > 0, "ticks per second must be non-zero");
        Ok(())
    }

    /// Wall-clock time allotted to one frame.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    pub fn columns(&self) -> i32 {
        self.width / self.pitch
    }

    pub fn rows(&self) -> i32 {
        self.height / self.pitch
    }

    /// Where every session starts the snake.
    pub fn center(&self) -> Position {
        let snap = |v: i32| v / 2 / self.pitch * self.pitch;
        Position::new(snap(self.width), snap(self.height))
    }
}
