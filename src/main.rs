use std::env;
use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::Result;
use log::{error, info, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};
use simplelog::{Config, WriteLogger};

use snake::clock::SleepClock;
use snake::config::GameConfig;
use snake::game::SnakeGame;
use snake::input::Keyboard;
use snake::term::TermScreen;

const LOG_FILE: &str = "snake.log";

/// Appends to the log in `dir`, or `None` when it cannot be opened.
fn open_log(dir: &Path) -> Option<File> {
    OpenOptions::new().create(true).append(true).open(dir.join(LOG_FILE)).ok()
}

/// Combines the game's outcome with the terminal teardown's, keeping both errors.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(e), Err(r)) => Err(e.context(format!("terminal restore also failed: {:#}", r))),
        (Err(e), Ok(())) => Err(e),
        (Ok(()), restored) => restored,
    }
}

fn main() -> Result<()> {
    // The terminal belongs to the playfield, so logs go to a file; no log is fine too
    if let Some(file) = open_log(&env::temp_dir()) {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }

    let config = GameConfig::default();
    config.validate()?;
    info!("Starting snake on a {}x{} playfield", config.width, config.height);

    let mut screen = TermScreen::new(&config);
    if let Err(e) = screen.setup() {
        return finish(Err(e), screen.restore());
    }

    let mut game = SnakeGame::new(config, screen, Keyboard::new(), SleepClock::new(), StdRng::from_entropy());
    let result = game.run();

    // Leave the alternate screen before anything gets printed
    let result = finish(result, game.into_screen().restore());
    if let Err(e) = &result {
        error!("Game aborted: {:#}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::fs;
    use std::process;

    #[test]
    fn test_log_appends_instead_of_truncating() {
        let dir = env::temp_dir().join(format!("snake-log-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(LOG_FILE), "earlier run\n").unwrap();

        assert!(open_log(&dir).is_some());
        let contents = fs::read_to_string(dir.join(LOG_FILE)).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(contents, "earlier run\n");
    }

    #[test]
    fn test_unopenable_log_is_skipped() {
        assert!(open_log(Path::new("/nonexistent/snake-log-dir")).is_none());
    }

    #[test]
    fn test_finish_keeps_both_errors() {
        let err = finish(Err(anyhow!("draw failed")), Err(anyhow!("raw mode stuck"))).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("draw failed"));
        assert!(msg.contains("raw mode stuck"));

        let err = finish(Ok(()), Err(anyhow!("raw mode stuck"))).unwrap_err();
        assert!(err.to_string().contains("raw mode stuck"));

        assert!(finish(Err(anyhow!("draw failed")), Ok(())).is_err());
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
