//! Player identity and liveness.

use std::fmt;

use serde::{Deserialize, Serialize};
use skirmish_board::Coordinate;

/// A player's identity, supplied by the caller.
///
/// The engine does no authentication: whatever string the caller hands in
/// *is* the player. Two sessions presenting the same string are the same
/// player (that is how reconnection works).
///
/// Newtype wrapper so a player id can't be confused with a game name or
/// any other string in a signature. `#[serde(transparent)]` keeps the
/// wire shape a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Creates a player id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Whether a player is currently alive or waiting on a respawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Alive,
    Dead,
}

impl PlayerStatus {
    /// Returns `true` for [`PlayerStatus::Alive`].
    pub fn is_alive(self) -> bool {
        matches!(self, PlayerStatus::Alive)
    }
}

/// One player's record in a game: where they stand and whether they live.
///
/// Invariant (owned by [`GameState`](crate::GameState)): `position` is
/// always a walkable cell of the game's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Current position on the board.
    pub position: Coordinate,
    /// Liveness; dead players occupy a cell but cannot act.
    pub status: PlayerStatus,
}
