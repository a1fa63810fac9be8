use crate::TermInt;

/// A position on the board. Coordinates are signed so a head that has just
/// left the board is still representable until collision detection sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: TermInt,
    pub rows: TermInt,
}

impl Grid {
    pub const fn new(columns: TermInt, rows: TermInt) -> Self {
        Grid { columns, rows }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.columns as i32 && cell.y >= 0 && cell.y < self.rows as i32
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.columns as i32 / 2, self.rows as i32 / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let grid = Grid::new(20, 20);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(19, 19)));
        assert!(!grid.contains(Cell::new(-1, 5)));
        assert!(!grid.contains(Cell::new(20, 5)));
        assert!(!grid.contains(Cell::new(5, 20)));
        assert!(!grid.contains(Cell::new(5, -1)));
    }

    #[test]
    fn test_center_of_default_grid() {
        assert_eq!(Grid::new(20, 20).center(), Cell::new(10, 10));
        assert_eq!(Grid::new(7, 3).center(), Cell::new(3, 1));
    }
}
