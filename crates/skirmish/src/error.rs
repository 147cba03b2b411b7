//! Unified error type for the Skirmish engine.

use skirmish_board::BoardError;
use skirmish_fleet::FleetError;
use skirmish_game::GameError;
use skirmish_session::SessionError;
use skirmish_state::{ActionError, ConfigError};

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `skirmish` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SkirmishError {
    /// A board parsing/validation error.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// A game construction error (invalid options, oversized board).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A rule transition error (invalid player, unwalkable cell, ...).
    #[error(transparent)]
    Action(#[from] ActionError),

    /// A game actor error (rejected request, actor unavailable).
    #[error(transparent)]
    Game(#[from] GameError),

    /// A fleet registry error (cap reached, name taken).
    #[error(transparent)]
    Fleet(#[from] FleetError),

    /// A session error (unknown game, session closed).
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_board_error() {
        let err = BoardError::Unwalkable;
        let wrapped: SkirmishError = err.into();
        assert!(matches!(wrapped, SkirmishError::Board(_)));
        assert!(wrapped.to_string().contains("walkable"));
    }

    #[test]
    fn test_from_fleet_error() {
        let err = FleetError::NameTaken("arena".into());
        let wrapped: SkirmishError = err.into();
        assert!(matches!(wrapped, SkirmishError::Fleet(_)));
        assert!(wrapped.to_string().contains("arena"));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::Closed;
        let wrapped: SkirmishError = err.into();
        assert!(matches!(wrapped, SkirmishError::Session(_)));
    }

    #[test]
    fn test_from_action_error() {
        let err = ActionError::MaxPlayers;
        let wrapped: SkirmishError = err.into();
        assert!(matches!(wrapped, SkirmishError::Action(_)));
    }
}
