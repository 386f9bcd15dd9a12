use anyhow::Result;

use crate::snake::Position;

/// Palette roles. Backends decide what actual colors they map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Background,
    Food,
    Snake,
    Message,
    Score,
}

/// Frame buffer the game loop draws into. Coordinates are logical units;
/// anything outside the playfield is clipped.
pub trait Screen {
    fn clear(&mut self, shade: Shade) -> Result<()>;

    fn fill_square(&mut self, top_left: Position, size: i32, shade: Shade) -> Result<()>;

    fn draw_text(&mut self, at: Position, text: &str, shade: Shade) -> Result<()>;

    /// Make everything drawn since the last call visible.
    fn present(&mut self) -> Result<()>;
}
