//! Error types for board construction.

/// Errors that can occur while parsing a board from text.
///
/// Validation runs in a fixed order and reports the first failure:
/// rectangularity, then enclosure, then walkability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Some row has a different length than the first row.
    #[error("board is not rectangular: row {row} has length {len}, expected {expected}")]
    NonRectangular {
        /// Index of the offending row.
        row: usize,
        /// Its actual length.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },

    /// A cell on the outer border is not a wall. The board must be fully
    /// enclosed so players can never step off the grid.
    #[error("board is not enclosed: border cell at ({row}, {col}) is not a wall")]
    NotEnclosed {
        /// Row of the offending border cell.
        row: usize,
        /// Column of the offending border cell.
        col: usize,
    },

    /// The board has no floor cell at all — nowhere to place a player.
    #[error("board has no walkable cell")]
    Unwalkable,
}
