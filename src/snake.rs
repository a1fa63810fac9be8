use std::collections::VecDeque;
use std::io;

use crate::food::Food;
use crate::grid::{Cell, Grid};
use crate::render::{Palette, RenderSink};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

pub struct Snake {
    // Head at the front.
    body: VecDeque<Cell>,
    direction: Direction,
    // Growth is deferred: eating raises this, the next advance() catches up.
    target_len: usize,
}

impl Snake {
    pub fn new(pos: Cell, direction: Direction) -> Self {
        Snake { body: VecDeque::from(vec![pos]), direction, target_len: 1 }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    pub fn advance(&mut self) {
        let (dx, dy) = self.direction.delta();
        let new_head = self.head().offset(dx, dy);

        self.body.push_front(new_head);
        if self.body.len() > self.target_len {
            self.body.pop_back();
        }
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        if !new_direction.is_opposite(self.direction) {
            self.direction = new_direction;
        }
    }

    pub fn try_eat(&mut self, food: &Food) -> bool {
        if self.head() != food.cell() {
            return false;
        }

        self.target_len += 1;
        true
    }

    pub fn detect_collision(&self, grid: Grid) -> bool {
        let head = self.head();
        !grid.contains(head) || self.body.iter().skip(1).any(|cell| *cell == head)
    }

    pub fn draw<S: RenderSink>(&self, sink: &mut S, palette: &Palette) -> io::Result<()> {
        for (i, cell) in self.body.iter().enumerate() {
            let color = if i == 0 { palette.head } else { palette.tail };
            sink.fill_cell(*cell, color)?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Cell>, direction: Direction) -> Self {
        let target_len = body.len();
        Snake { body: body.into(), direction, target_len }
    }
}
