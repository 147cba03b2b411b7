//! Error types for the session layer.

use skirmish_game::GameError;

/// Errors that can occur in a play session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// No game with this name is registered in the fleet.
    #[error("no game named {0:?}")]
    InvalidGame(String),

    /// The game actor rejected or could not serve the request.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The session has no usable cached view (no frame received yet, or
    /// the viewer is no longer present in the latest frame).
    #[error("session has no current view of the game")]
    Desynced,

    /// The session actor has terminated — its reconnect attempts were
    /// exhausted, or every handle was dropped.
    #[error("session is closed")]
    Closed,
}
