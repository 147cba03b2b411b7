//! Error types for the fleet registry.

use skirmish_state::ConfigError;

/// Errors that can occur during fleet operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FleetError {
    /// The fleet is at its configured cap on concurrent games.
    #[error("fleet is at its maximum number of games")]
    MaxGames,

    /// A live game is already registered under this name.
    #[error("game name {0:?} is already taken")]
    NameTaken(String),

    /// No game is registered under this name.
    #[error("no game named {0:?}")]
    GameNotFound(String),

    /// The game's options failed validation; nothing was started.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
