//! Error types for the game actor layer.

use skirmish_state::ActionError;

use crate::GameId;

/// Errors returned by game actor requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A rule transition rejected the request. The game state is
    /// unchanged.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The game actor is gone (shut down or crashed) or its mailbox
    /// could not be reached.
    #[error("game {0} is unavailable")]
    Unavailable(GameId),
}
