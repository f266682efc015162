//! Error types for the 8-puzzle solver.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the crate.
///
/// Search itself never fails: exhausting the frontier or hitting a deadline are
/// reported as [`crate::solver::SearchOutcome`] values. These errors cover the
/// inputs handed to the search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board: tile {value} at ({row}, {col}) is outside 0..=8")]
    TileOutOfRange { value: u8, row: usize, col: usize },

    #[error("invalid board: tile {value} appears more than once")]
    DuplicateTile { value: u8 },

    #[error("invalid board: expected exactly one blank, found {found}")]
    BlankCount { found: usize },

    #[error("invalid board: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("unknown evaluator '{token}' (expected one of: F1, F2, F3, UC)")]
    UnknownEvaluator { token: String },

    #[error("failed to read board file {path}: {message}")]
    BoardFile { path: PathBuf, message: String },
}

impl Error {
    /// Returns `true` for every variant describing a malformed board.
    pub fn is_invalid_board(&self) -> bool {
        matches!(
            self,
            Error::TileOutOfRange { .. }
                | Error::DuplicateTile { .. }
                | Error::BlankCount { .. }
                | Error::InvalidBoardLength { .. }
                | Error::InvalidCellCharacter { .. }
        )
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
