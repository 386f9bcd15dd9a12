use std::io::{stdout, Stdout, Write};

use anyhow::{ensure, Context, Result};
use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::config::GameConfig;
use crate::screen::{Screen, Shade};
use crate::snake::Position;

// Terminal glyphs are roughly twice as tall as they are wide
const CELL_WIDTH: u16 = 2;

const TITLE: &str = "Snake Game";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Shade,
    bg: Shade,
}

impl Cell {
    fn blank(shade: Shade) -> Self {
        Cell { ch: ' ', fg: shade, bg: shade }
    }
}

/// Draws the playfield into the top-left corner of the terminal.
///
/// Drawing only touches the back buffer; `present` writes the cells that
/// changed since the previous frame and flushes once.
pub struct TermScreen<W: Write = Stdout> {
    out: W,
    pitch: i32,
    columns: u16,
    rows: u16,
    back: Vec<Cell>,
    shown: Option<Vec<Cell>>,
}

impl TermScreen<Stdout> {
    pub fn new(config: &GameConfig) -> Self {
        TermScreen::with_writer(config, stdout())
    }
}

impl<W: Write> TermScreen<W> {
    pub fn with_writer(config: &GameConfig, out: W) -> Self {
        let columns = config.columns() as u16 * CELL_WIDTH;
        let rows = config.rows() as u16;
        let back = vec![Cell::blank(Shade::Background); columns as usize * rows as usize];
        TermScreen { out, pitch: config.pitch, columns, rows, back, shown: None }
    }

    pub fn setup(&mut self) -> Result<()> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        ensure!(
            width >= self.columns && height >= self.rows,
            "terminal is {}x{}, the playfield needs at least {}x{}",
            width,
            height,
            self.columns,
            self.rows
        );

        terminal::enable_raw_mode().context("Error setting raw mode")?;
        self.enter_screen()
    }

    fn enter_screen(&mut self) -> Result<()> {
        execute!(
            self.out,
            terminal::SetTitle(TITLE),
            EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
        .context("Error entering alt screen")
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    fn color(shade: Shade) -> Color {
        match shade {
            Shade::Background => Color::Rgb { r: 192, g: 192, b: 192 },
            Shade::Food => Color::Rgb { r: 0, g: 255, b: 255 },
            Shade::Snake | Shade::Score => Color::Rgb { r: 51, g: 102, b: 0 },
            Shade::Message => Color::Rgb { r: 255, g: 0, b: 0 },
        }
    }

    /// Terminal (column, row) of a logical position, if it lands on the playfield.
    fn cell_of(&self, pos: Position) -> Option<(u16, u16)> {
        let col = pos.x.div_euclid(self.pitch) * CELL_WIDTH as i32;
        let row = pos.y.div_euclid(self.pitch);
        self.index_of(col, row).map(|_| (col as u16, row as u16))
    }

    fn index_of(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.columns as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.columns as usize + col as usize)
    }

    fn put(&mut self, col: i32, row: i32, f: impl FnOnce(&mut Cell)) {
        if let Some(i) = self.index_of(col, row) {
            f(&mut self.back[i]);
        }
    }
}

impl<W: Write> Screen for TermScreen<W> {
    fn clear(&mut self, shade: Shade) -> Result<()> {
        self.back.iter_mut().for_each(|cell| *cell = Cell::blank(shade));
        Ok(())
    }

    fn fill_square(&mut self, top_left: Position, size: i32, shade: Shade) -> Result<()> {
        let squares = (size / self.pitch).max(1);
        let col0 = top_left.x.div_euclid(self.pitch) * CELL_WIDTH as i32;
        let row0 = top_left.y.div_euclid(self.pitch);

        for row in row0..row0 + squares {
            for col in col0..col0 + squares * CELL_WIDTH as i32 {
                self.put(col, row, |cell| *cell = Cell::blank(shade));
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, at: Position, text: &str, shade: Shade) -> Result<()> {
        let (col, row) = match self.cell_of(at) {
            Some((col, row)) => (col as i32, row as i32),
            None => return Ok(()),
        };

        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, |cell| {
                cell.ch = ch;
                cell.fg = shade;
            });
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        for (i, cell) in self.back.iter().enumerate() {
            let unchanged = self.shown.as_ref().map_or(false, |shown| shown[i] == *cell);
            if unchanged {
                continue;
            }

            let col = (i % self.columns as usize) as u16;
            let row = (i / self.columns as usize) as u16;
            let colors = Colors::new(Self::color(cell.fg), Self::color(cell.bg));
            queue!(self.out, cursor::MoveTo(col, row), SetColors(colors), Print(cell.ch))
                .context("Error drawing cell")?;
        }

        queue!(self.out, ResetColor).context("Error resetting colors")?;
        self.out.flush().context("Error flushing")?;
        self.shown = Some(self.back.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> TermScreen<Vec<u8>> {
        TermScreen::with_writer(&GameConfig::default(), Vec::new())
    }

    fn cell(screen: &TermScreen<Vec<u8>>, col: i32, row: i32) -> Cell {
        screen.back[screen.index_of(col, row).unwrap()]
    }

    #[test]
    fn test_buffer_covers_playfield() {
        let screen = screen();
        assert_eq!((screen.columns, screen.rows), (120, 40));
        assert_eq!(screen.back.len(), 120 * 40);
    }

    #[test]
    fn test_square_spans_two_columns() {
        let mut screen = screen();
        screen.fill_square(Position::new(300, 200), 10, Shade::Snake).unwrap();

        assert_eq!(cell(&screen, 60, 20), Cell::blank(Shade::Snake));
        assert_eq!(cell(&screen, 61, 20), Cell::blank(Shade::Snake));
        assert_eq!(cell(&screen, 62, 20), Cell::blank(Shade::Background));
        assert_eq!(cell(&screen, 60, 21), Cell::blank(Shade::Background));
    }

    #[test]
    fn test_off_playfield_drawing_is_clipped() {
        let mut screen = screen();
        screen.fill_square(Position::new(600, 200), 10, Shade::Snake).unwrap();
        screen.fill_square(Position::new(-10, 0), 10, Shade::Snake).unwrap();
        screen.draw_text(Position::new(0, 400), "Score: 1", Shade::Score).unwrap();

        assert!(screen.back.iter().all(|c| *c == Cell::blank(Shade::Background)));
    }

    #[test]
    fn test_text_keeps_background() {
        let mut screen = screen();
        screen.draw_text(Position::new(0, 0), "Score: 3", Shade::Score).unwrap();

        let text: String = (0..8).map(|col| cell(&screen, col, 0).ch).collect();
        assert_eq!(text, "Score: 3");
        assert_eq!(cell(&screen, 0, 0).bg, Shade::Background);
        assert_eq!(cell(&screen, 0, 0).fg, Shade::Score);
    }

    #[test]
    fn test_text_truncated_at_right_edge() {
        let mut screen = screen();
        screen.draw_text(Position::new(590, 0), "abcdef", Shade::Message).unwrap();
        assert_eq!(cell(&screen, 118, 0).ch, 'a');
        assert_eq!(cell(&screen, 119, 0).ch, 'b');
    }

    #[test]
    fn test_entering_sets_title() {
        let mut screen = screen();
        screen.enter_screen().unwrap();
        assert!(String::from_utf8_lossy(&screen.out).contains(TITLE));
    }

    #[test]
    fn test_present_only_writes_changes() {
        let mut screen = screen();
        screen.present().unwrap();
        let first = screen.out.len();
        assert!(first > 0);

        screen.out.clear();
        screen.present().unwrap();
        let idle = screen.out.len();

        screen.out.clear();
        screen.fill_square(Position::new(0, 0), 10, Shade::Food).unwrap();
        screen.present().unwrap();
        let one_square = screen.out.len();

        assert!(idle < one_square);
        assert!(one_square < first);
    }
}
