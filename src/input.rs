use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

/// What a key press means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Quit,
    /// Ctrl+C: leave immediately, whatever the state
    Interrupt,
}

/// Source of player commands, drained once per frame.
pub trait InputSource {
    /// Every command queued since the last call, oldest first. Never blocks.
    fn poll_commands(&mut self) -> Result<Vec<Command>>;
}

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Interrupt);
    }

    match key.code {
        KeyCode::Up => Some(Command::Turn(Direction::Up)),
        KeyCode::Down => Some(Command::Turn(Direction::Down)),
        KeyCode::Left => Some(Command::Turn(Direction::Left)),
        KeyCode::Right => Some(Command::Turn(Direction::Right)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Reads key presses from the terminal event queue.
#[derive(Default)]
pub struct Keyboard;

impl Keyboard {
    pub fn new() -> Self {
        Keyboard
    }
}

impl InputSource for Keyboard {
    fn poll_commands(&mut self) -> Result<Vec<Command>> {
        let mut commands = vec![];

        while event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                commands.extend(command_for_key(key));
            }
        }

        Ok(commands)
    }
}
