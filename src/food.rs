use std::io;

use rand::Rng;

use crate::grid::{Cell, Grid};
use crate::render::{RenderSink, FOOD_COLOR};

/// A single piece of food. Never moves; eating it means spawning a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    cell: Cell,
}

impl Food {
    /// Picks any cell of the grid, including ones the snake is on.
    pub fn spawn<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Self {
        let x = rng.gen_range(0..grid.columns as i32);
        let y = rng.gen_range(0..grid.rows as i32);
        Food { cell: Cell::new(x, y) }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn draw<S: RenderSink>(&self, sink: &mut S) -> io::Result<()> {
        sink.fill_cell(self.cell, FOOD_COLOR)
    }

    #[cfg(test)]
    pub fn at(cell: Cell) -> Self {
        Food { cell }
    }
}
