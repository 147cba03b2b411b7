//! Coalesced board snapshots and the broadcast frame.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use skirmish_board::{Coordinate, Dimensions};

use crate::{PlayerId, PlayerStatus};

/// One cell of a coalesced board: either bare geometry, or the players
/// standing on it.
///
/// Cells with no players keep their geometry (`Wall` / `Floor`); a cell
/// with at least one player becomes the map of its occupants. Walls never
/// carry players — a player on a wall is a corrupt state and coalescing
/// panics rather than produce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoalescedCell {
    Wall,
    Floor,
    /// The players on this cell with their liveness.
    Players(HashMap<PlayerId, PlayerStatus>),
}

impl CoalescedCell {
    /// The occupant map, if this cell holds players.
    pub fn players(&self) -> Option<&HashMap<PlayerId, PlayerStatus>> {
        match self {
            CoalescedCell::Players(players) => Some(players),
            _ => None,
        }
    }

    /// How many occupants of this cell are alive. Zero for bare cells.
    pub fn alive_count(&self) -> usize {
        self.players().map_or(0, |players| {
            players.values().filter(|status| status.is_alive()).count()
        })
    }
}

/// The per-cell view of a whole game: every coordinate of the board,
/// with players folded into the cells they occupy.
///
/// The key set always equals the board's cell map's key set.
pub type CoalescedBoard = HashMap<Coordinate, CoalescedCell>;

/// A versioned snapshot broadcast to every subscriber of a game.
///
/// `sequence` is assigned by the game actor from a strictly increasing
/// clock, so receivers resolve out-of-order delivery by dropping any
/// frame not newer than the last one they applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Strictly increasing across all frames emitted by one game actor.
    pub sequence: u64,
    /// The coalesced board at the moment the frame was cut.
    pub board_state: CoalescedBoard,
    /// Board dimensions, so receivers can render without the board.
    pub dimensions: Dimensions,
}

impl Frame {
    /// Scans the frame for the cell holding `player`.
    ///
    /// Returns their position and status, or `None` if the player is not
    /// in this frame (not joined, or evicted).
    pub fn find_player(&self, player: &PlayerId) -> Option<(Coordinate, PlayerStatus)> {
        self.board_state.iter().find_map(|(coord, cell)| {
            cell.players()
                .and_then(|players| players.get(player))
                .map(|status| (*coord, *status))
        })
    }
}

/// A frame-shaped snapshot without a sequence number, for callers that
/// want to inspect a game rather than subscribe to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    /// The coalesced board.
    pub board_state: CoalescedBoard,
    /// Board dimensions.
    pub dimensions: Dimensions,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players_cell(entries: &[(&str, PlayerStatus)]) -> CoalescedCell {
        CoalescedCell::Players(
            entries
                .iter()
                .map(|(id, status)| (PlayerId::new(*id), *status))
                .collect(),
        )
    }

    #[test]
    fn test_alive_count_ignores_dead_occupants() {
        let cell = players_cell(&[
            ("a", PlayerStatus::Alive),
            ("b", PlayerStatus::Dead),
            ("c", PlayerStatus::Alive),
        ]);
        assert_eq!(cell.alive_count(), 2);
        assert_eq!(CoalescedCell::Floor.alive_count(), 0);
        assert_eq!(CoalescedCell::Wall.alive_count(), 0);
    }

    #[test]
    fn test_find_player_locates_cell() {
        let mut board_state = CoalescedBoard::new();
        board_state.insert(Coordinate::new(0, 0), CoalescedCell::Wall);
        board_state.insert(Coordinate::new(1, 1), CoalescedCell::Floor);
        board_state.insert(
            Coordinate::new(1, 2),
            players_cell(&[("ada", PlayerStatus::Dead)]),
        );

        let frame = Frame {
            sequence: 1,
            board_state,
            dimensions: Dimensions { rows: 3, cols: 4 },
        };

        assert_eq!(
            frame.find_player(&PlayerId::new("ada")),
            Some((Coordinate::new(1, 2), PlayerStatus::Dead))
        );
        assert_eq!(frame.find_player(&PlayerId::new("ghost")), None);
    }
}
