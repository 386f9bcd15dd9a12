//! Terminal Snake and a Titanic survival predictor.
//!
//! - Game loop, state machine and its seams (game, screen, clock, input)
//! - Crossterm backends for the seams (term, input::Keyboard, clock::SleepClock)
//! - Passenger encoding and logistic-regression inference (predictor)

pub mod clock;
pub mod config;
pub mod game;
pub mod input;
pub mod predictor;
pub mod screen;
pub mod snake;
pub mod term;
