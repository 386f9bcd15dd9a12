use anyhow::Result;
use log::{debug, info};
use rand::Rng;

use crate::clock::FrameClock;
use crate::config::GameConfig;
use crate::input::{Command, InputSource};
use crate::screen::{Screen, Shade};
use crate::snake::{Position, Snake};

const LOST_MESSAGE: &str = "You lost !! Press P to play again or Q to quit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOverPrompt,
    Terminated,
}

/// One play: a snake and the food it is chasing.
pub struct Session {
    snake: Snake,
    food: Position,
}

impl Session {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        Session { snake: Snake::new(config.center()), food: spawn_food(config, rng) }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }
}

/// Uniformly random grid square. The snake's body is not avoided.
pub fn spawn_food<R: Rng>(config: &GameConfig, rng: &mut R) -> Position {
    let x = rng.gen_range(0..config.columns()) * config.pitch;
    let y = rng.gen_range(0..config.rows()) * config.pitch;
    Position::new(x, y)
}

/// Owns everything the game needs for its whole lifetime and runs it frame
/// by frame until the player quits.
pub struct SnakeGame<S, I, C, R> {
    config: GameConfig,
    screen: S,
    input: I,
    clock: C,
    rng: R,
    state: GameState,
    session: Session,
}

impl<S: Screen, I: InputSource, C: FrameClock, R: Rng> SnakeGame<S, I, C, R> {
    pub fn new(config: GameConfig, screen: S, input: I, clock: C, mut rng: R) -> Self {
        let session = Session::new(&config, &mut rng);
        info!("New session, food at {:?}", session.food);
        SnakeGame { config, screen, input, clock, rng, state: GameState::Running, session }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_screen(self) -> S {
        self.screen
    }

    pub fn run(&mut self) -> Result<()> {
        while self.state != GameState::Terminated {
            self.frame()?;
        }
        Ok(())
    }

    /// Runs a single iteration of whichever state the game is in.
    pub fn frame(&mut self) -> Result<()> {
        match self.state {
            GameState::Running => self.running_frame()?,
            GameState::GameOverPrompt => self.prompt_frame()?,
            GameState::Terminated => return Ok(()),
        }

        if self.state != GameState::Terminated {
            self.clock.tick(self.config.frame_budget());
        }
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn running_frame(&mut self) -> Result<()> {
        let pitch = self.config.pitch;

        for command in self.input.poll_commands()? {
            match command {
                Command::Turn(dir) => self.session.snake.set_direction(dir, pitch),
                Command::Interrupt => {
                    self.terminate();
                    return Ok(());
                }
                Command::Restart | Command::Quit => {}
            }
        }

        // The head was placed last frame, so it gets one frame on screen out of bounds
        if self.session.snake.is_out_of_bounds(self.config.width, self.config.height) {
            let snake = &self.session.snake;
            info!("Snake left the playfield at {:?}, score {}", snake.head(), snake.score());
            self.state = GameState::GameOverPrompt;
            return Ok(());
        }

        let session = &mut self.session;
        session.snake.advance();

        self.screen.clear(Shade::Background)?;
        self.screen.fill_square(session.food, pitch, Shade::Food)?;

        session.snake.record_head();
        for segment in session.snake.body() {
            self.screen.fill_square(*segment, pitch, Shade::Snake)?;
        }

        draw_score(&mut self.screen, session.snake.score())?;
        self.screen.present()?;

        if session.snake.head() == session.food {
            session.food = spawn_food(&self.config, &mut self.rng);
            session.snake.grow();
            debug!("Food eaten, score {}, next food at {:?}", session.snake.score(), session.food);
        }

        Ok(())
    }

    fn prompt_frame(&mut self) -> Result<()> {
        let message_at = Position::new(self.config.width / 6, self.config.height / 3);

        self.screen.clear(Shade::Background)?;
        self.screen.draw_text(message_at, LOST_MESSAGE, Shade::Message)?;
        draw_score(&mut self.screen, self.session.snake.score())?;
        self.screen.present()?;

        for command in self.input.poll_commands()? {
            match command {
                Command::Quit | Command::Interrupt => {
                    self.terminate();
                    break;
                }
                Command::Restart => {
                    self.session = Session::new(&self.config, &mut self.rng);
                    self.state = GameState::Running;
                    info!("Restarted, food at {:?}", self.session.food);
                    break;
                }
                Command::Turn(_) => {}
            }
        }

        Ok(())
    }

    fn terminate(&mut self) {
        info!("Quitting with score {}", self.session.snake.score());
        self.state = GameState::Terminated;
    }
}

fn draw_score<S: Screen>(screen: &mut S, score: usize) -> Result<()> {
    screen.draw_text(Position::new(0, 0), &format!("Score: {}", score), Shade::Score)
}
