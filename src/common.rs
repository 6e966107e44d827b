//! Common types for Battleship boards.

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the square grid.
    OutOfBounds { row: usize, col: usize, size: usize },
    /// Ship would extend past the edge of the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps a cell that is not water.
    ShipOverlaps,
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col, size } => write!(
                f,
                "Cell ({}, {}) is outside the {}x{} board",
                row, col, size, size
            ),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
        }
    }
}

impl std::error::Error for BoardError {}
