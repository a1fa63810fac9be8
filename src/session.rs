use std::io;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use crate::food::Food;
use crate::grid::Grid;
use crate::render::{Palette, RenderSink};
use crate::snake::{Direction, Snake};

const START_DIRECTION: Direction = Direction::Right;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened, the session is over.
    Idle,
    Moved,
    Ate,
    GameOver { score: u32, new_high_score: bool },
}

/// One game from start to game over, plus the high score that outlives it.
pub struct GameSession<R: Rng = ThreadRng> {
    grid: Grid,
    snake: Snake,
    food: Food,
    score: u32,
    high_score: u32,
    state: State,
    rng: R,
}

impl GameSession<ThreadRng> {
    pub fn new(grid: Grid, high_score: u32) -> Self {
        Self::with_rng(grid, high_score, rand::thread_rng())
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(grid: Grid, high_score: u32, mut rng: R) -> Self {
        let snake = Snake::new(grid.center(), START_DIRECTION);
        let food = Food::spawn(grid, &mut rng);
        info!(columns = grid.columns, rows = grid.rows, high_score, "session started");

        GameSession { grid, snake, food, score: 0, high_score, state: State::Running, rng }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state == State::Over {
            return TickOutcome::Idle;
        }

        self.snake.advance();

        let mut outcome = TickOutcome::Moved;
        if self.snake.try_eat(&self.food) {
            self.food = Food::spawn(self.grid, &mut self.rng);
            self.score += 1;
            outcome = TickOutcome::Ate;
            debug!(score = self.score, food = ?self.food.cell(), "food eaten");
        }

        if self.snake.detect_collision(self.grid) {
            self.state = State::Over;

            let new_high_score = self.score > self.high_score;
            if new_high_score {
                self.high_score = self.score;
            }

            info!(score = self.score, high_score = self.high_score, head = ?self.snake.head(), "game over");
            return TickOutcome::GameOver { score: self.score, new_high_score };
        }

        outcome
    }

    /// Turns are dropped while the game is over; a restart always heads right.
    pub fn request_direction(&mut self, direction: Direction) {
        match self.state {
            State::Running => self.snake.set_direction(direction),
            State::Over => debug!(?direction, "turn ignored, game is over"),
        }
    }

    pub fn restart(&mut self) {
        self.snake = Snake::new(self.grid.center(), START_DIRECTION);
        self.food = Food::spawn(self.grid, &mut self.rng);
        self.score = 0;
        self.state = State::Running;
        info!(high_score = self.high_score, "session restarted");
    }

    pub fn draw<S: RenderSink>(&self, sink: &mut S, palette: &Palette) -> io::Result<()> {
        self.snake.draw(sink, palette)?;
        self.food.draw(sink)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn state(&self) -> State {
        self.state
    }

    #[cfg(test)]
    fn place_food(&mut self, food: Food) {
        self.food = food;
    }
}
