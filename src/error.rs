use thiserror::Error;

use crate::maze::Coord;

/// Errors raised while building a maze.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze must be at least 2x2 to hold the entry cell, got {rows}x{cols}")]
    TooSmall { rows: u16, cols: u16 },
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    Parse { row: usize, col: usize, ch: char },
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("maze has more than {} rows or columns", u16::MAX)]
    TooLarge,
}

/// Errors raised by an invalid walk configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("turn probability must be within 0..=1000, got {0}")]
    TurnProbabilityOutOfRange(u32),
}

/// Errors raised when a traversal cannot produce a path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("start cell {0:?} is not open")]
    StartBlocked(Coord),
    #[error("no path from {start:?} to {target:?}")]
    Unreachable { start: Coord, target: Coord },
}
