//! Square grid of cell codes tracking ships or shots.

use core::fmt;

use crate::common::BoardError;
use crate::config::MAX_BOARD_SIZE;
use crate::protocol::{BoardValue, Ship};

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<BoardValue>,
}

impl Board {
    /// Create a `size`×`size` board filled with water.
    ///
    /// `size` is clamped to [`MAX_BOARD_SIZE`].
    pub fn new(size: usize) -> Self {
        let size = size.min(MAX_BOARD_SIZE);
        let cells = size.checked_mul(size).unwrap_or_default();
        Board {
            size,
            cells: vec![BoardValue::Water; cells],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Set every cell back to water.
    pub fn reset(&mut self) {
        self.cells.fill(BoardValue::Water);
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<BoardValue, BoardError> {
        self.index(row, col).map(|i| self.cells[i])
    }

    pub fn set(&mut self, row: usize, col: usize, value: BoardValue) -> Result<(), BoardError> {
        let i = self.index(row, col)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Whether `ship` lies inside the grid and covers only water.
    pub fn check_placement(&self, ship: &Ship) -> Result<(), BoardError> {
        if ship.length == 0 || ship.length > self.size {
            return Err(BoardError::ShipOutOfBounds);
        }
        for (r, c) in ship.cells() {
            match self.get(r, c) {
                Ok(BoardValue::Water) => {}
                Ok(_) => return Err(BoardError::ShipOverlaps),
                Err(_) => return Err(BoardError::ShipOutOfBounds),
            }
        }
        Ok(())
    }

    /// Write `value` into every in-bounds cell of `ship`, returning how many were written.
    pub fn mark_ship(&mut self, ship: &Ship, value: BoardValue) -> usize {
        let mut marked = 0;
        // at most `size` cells of a straight ship can be on the grid
        for (r, c) in ship.cells().take(self.size) {
            if self.set(r, c, value).is_ok() {
                marked += 1;
            }
        }
        marked
    }

    /// Iterate over cells in row-major order as `(row, col, value)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, BoardValue)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (i / self.size, i % self.size, *v))
    }

    /// Number of cells currently holding `value`.
    pub fn count(&self, value: BoardValue) -> usize {
        self.cells.iter().filter(|&&v| v == value).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for value in row {
                write!(f, "{}", value.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {} }}", self.size)?;
        write!(f, "{}", self)
    }
}
