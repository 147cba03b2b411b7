//! Error types for game construction and rule transitions.

use skirmish_board::{BoardError, Coordinate, Dimensions};

use crate::PlayerId;

/// Errors reported when creating a game. Nothing is constructed on error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An option carried a value of the wrong shape (e.g. a player cap
    /// below 2, or a zero dimension cap).
    #[error("invalid option: {0}")]
    InvalidOption(&'static str),

    /// The supplied board is larger than the configured dimension cap.
    #[error("board dimensions {dimensions} exceed the maximum of {max}")]
    MaxBoardDimensionExceeded {
        /// Dimensions of the offending board.
        dimensions: Dimensions,
        /// The configured cap on either axis.
        max: usize,
    },

    /// The board text failed validation.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors reported by rule transitions. The state is never mutated on
/// error — transitions validate fully before writing anything.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The player is not in this game.
    #[error("player {0} is not in this game")]
    InvalidPlayer(PlayerId),

    /// The player is dead and cannot act until respawned.
    #[error("player {0} is dead")]
    DeadPlayer(PlayerId),

    /// The destination is a wall or outside the board.
    #[error("destination {0} is not walkable")]
    UnwalkableDestination(Coordinate),

    /// The destination is walkable but not adjacent to the player's
    /// current position (4-connected; the current cell itself counts).
    #[error("destination {0} is not reachable in one step")]
    UnreachableDestination(Coordinate),

    /// The game is at its configured player cap.
    #[error("game is full")]
    MaxPlayers,

    /// The player is already in the game. The game actor treats this as a
    /// reconnect and never surfaces it to callers.
    #[error("player {0} already spawned")]
    AlreadySpawned(PlayerId),
}
