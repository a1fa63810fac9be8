use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Settings;
use crate::input::{self, Command};
use crate::session::{GameSession, State, TickOutcome};
use crate::store::HighScoreFile;
use crate::term::TermManager;

// How long to block on input while paused; nothing else needs to happen.
const PAUSED_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct SnakeGame {
    settings: Settings,
    term: TermManager,
    store: HighScoreFile,
    session: GameSession,
    paused: bool,
}

impl SnakeGame {
    pub fn new(settings: Settings, term: TermManager, store: HighScoreFile, high_score: u32) -> Self {
        let session = GameSession::new(settings.grid, high_score);
        SnakeGame { settings, term, store, session, paused: false }
    }

    /// Takes over the terminal until the player quits, and gives it back even on error.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.intro_then_play();
        self.term.restore()?;
        result
    }

    fn intro_then_play(&mut self) -> Result<()> {
        if self.show_intro()? == Flow::Quit {
            return Ok(());
        }

        self.play()
    }

    fn show_intro(&mut self) -> Result<Flow> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "Enter to restart after a crash",
            "CTRL+C or Q to quit",
            "",
            "Press any key to begin"
        ];

        self.term.clear()?;
        self.term.show_message(lines)?;

        let key = self.term.read_key_blocking()?;
        if input::command_for(&key) == Some(Command::Quit) {
            return Ok(Flow::Quit);
        }

        self.term.hide_message()?;
        Ok(Flow::Continue)
    }

    fn play(&mut self) -> Result<()> {
        self.term.clear()?;
        self.redraw()?;

        let mut ticker = Ticker::new(self.settings.tick_interval);

        loop {
            let timeout = if self.paused { PAUSED_POLL } else { ticker.time_left() };

            if let Some(key) = self.term.poll_key(timeout)? {
                if let Some(cmd) = input::command_for(&key) {
                    if self.handle_command(cmd, &mut ticker)? == Flow::Quit {
                        info!(score = self.session.score(), "player quit");
                        return Ok(());
                    }
                }
            }

            if !self.paused && ticker.fire() {
                self.step()?;
            }
        }
    }

    fn handle_command(&mut self, cmd: Command, ticker: &mut Ticker) -> Result<Flow> {
        match cmd {
            Command::Quit => return Ok(Flow::Quit),
            Command::Turn(dir) => self.session.request_direction(dir),
            Command::TogglePause => {
                if self.session.state() == State::Running {
                    self.toggle_pause(ticker)?;
                }
            },
            Command::Restart => {
                if self.session.state() == State::Over {
                    self.session.restart();
                    self.term.hide_message()?;
                    // Old session's schedule must not leak into the new one
                    ticker.reset();
                    self.redraw()?;
                }
            },
        }

        Ok(Flow::Continue)
    }

    fn step(&mut self) -> Result<()> {
        match self.session.tick() {
            // Leave the game over message alone.
            TickOutcome::Idle => Ok(()),
            TickOutcome::Moved | TickOutcome::Ate => self.redraw(),
            TickOutcome::GameOver { score, new_high_score } => {
                self.redraw()?;
                self.game_over(score, new_high_score)
            },
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, score: u32, new_high_score: bool) -> Result<()> {
        if new_high_score {
            if let Err(e) = self.store.save(score) {
                warn!(error = %e, "could not persist high score");
            }
        }

        let score_line = format!("Score: {}", score);
        let best_line = if new_high_score {
            "New high score!".to_string()
        } else {
            format!("High score: {}", self.session.high_score())
        };

        self.term.show_message(&[
            "Game over!",
            &score_line,
            &best_line,
            "",
            "Press Enter to play again,",
            "or CTRL+C to quit."
        ])?;

        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        self.term.clear_board()?;
        self.term.draw_borders()?;
        self.session.draw(&mut self.term, &self.settings.palette)?;
        self.term.draw_status(self.session.score(), self.session.high_score())?;
        self.term.flush()?;
        Ok(())
    }

    fn toggle_pause(&mut self, ticker: &mut Ticker) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
            self.redraw()?;
            ticker.reset();
        }

        self.paused = !self.paused;
        Ok(())
    }
}

/// Fixed-rate schedule for game steps.
struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    fn new(interval: Duration) -> Self {
        Ticker { interval, next: Instant::now() + interval }
    }

    fn time_left(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }

    /// True once per elapsed interval. A late tick does not cause a burst of catch-up ticks.
    fn fire(&mut self) -> bool {
        let now = Instant::now();
        if now < self.next {
            return false;
        }

        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }

    fn reset(&mut self) {
        self.next = Instant::now() + self.interval;
    }
}
