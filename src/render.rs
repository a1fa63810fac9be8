use std::io;

use crossterm::style::Color;

use crate::grid::Cell;

pub const FOOD_COLOR: Color = Color::Red;

/// Anything that can paint whole board cells.
pub trait RenderSink {
    fn fill_cell(&mut self, cell: Cell, color: Color) -> io::Result<()>;
}

/// Colors used for the snake. Food is always [`FOOD_COLOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub head: Color,
    pub tail: Color,
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Keeps every fill in call order.
    #[derive(Default)]
    pub struct RecordingSink {
        pub fills: Vec<(Cell, Color)>,
    }

    impl RenderSink for RecordingSink {
        fn fill_cell(&mut self, cell: Cell, color: Color) -> io::Result<()> {
            self.fills.push((cell, color));
            Ok(())
        }
    }
}
