//! The authoritative state of one game, and every rule transition.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use skirmish_board::{Board, Coordinate};

use crate::{
    ActionError, CoalescedBoard, CoalescedCell, ConfigError, PlayerId, PlayerRecord,
    PlayerStatus,
};

// ---------------------------------------------------------------------------
// GameOptions
// ---------------------------------------------------------------------------

/// Options for creating a [`GameState`].
#[derive(Debug, Clone, Default)]
pub struct GameOptions {
    /// The board to play on; the default arena when absent.
    pub board: Option<Board>,
    /// Population cap for `spawn_player`. Must be at least 2 when set.
    pub max_players: Option<usize>,
    /// Rejects boards whose rows or cols exceed this. Must be positive
    /// when set.
    pub max_board_dimension: Option<usize>,
}

impl GameOptions {
    /// Options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the board.
    pub fn board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    /// Sets the player cap.
    pub fn max_players(mut self, max: usize) -> Self {
        self.max_players = Some(max);
        self
    }

    /// Sets the board dimension cap.
    pub fn max_board_dimension(mut self, max: usize) -> Self {
        self.max_board_dimension = Some(max);
        self
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// One game's authoritative state: a board, a player table, and limits.
///
/// All rules live here as transitions on `&mut self` that validate before
/// they write, so an `Err` return leaves the state untouched. Randomness
/// is injected; nothing here reads clocks or does I/O. Exactly one game
/// actor owns each `GameState` at a time.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    players: HashMap<PlayerId, PlayerRecord>,
    max_players: Option<usize>,
}

impl GameState {
    /// Validates `options` and builds the initial state with an empty
    /// player table.
    pub fn new(options: GameOptions) -> Result<GameState, ConfigError> {
        if let Some(max) = options.max_players {
            if max < 2 {
                return Err(ConfigError::InvalidOption("max_players"));
            }
        }
        if options.max_board_dimension == Some(0) {
            return Err(ConfigError::InvalidOption("max_board_dimension"));
        }

        let board = options.board.unwrap_or_default();
        if let Some(max) = options.max_board_dimension {
            let dims = board.dimensions();
            if dims.rows > max || dims.cols > max {
                return Err(ConfigError::MaxBoardDimensionExceeded {
                    dimensions: dims,
                    max,
                });
            }
        }

        Ok(GameState {
            board,
            players: HashMap::new(),
            max_players: options.max_players,
        })
    }

    /// Places a new player at a uniformly random walkable cell, alive.
    ///
    /// # Errors
    /// - [`ActionError::MaxPlayers`] — the game is at its cap;
    /// - [`ActionError::AlreadySpawned`] — the id is already present.
    pub fn spawn_player(
        &mut self,
        player: PlayerId,
        rng: &mut impl Rng,
    ) -> Result<(), ActionError> {
        if let Some(max) = self.max_players {
            if self.players.len() >= max {
                return Err(ActionError::MaxPlayers);
            }
        }
        if self.players.contains_key(&player) {
            return Err(ActionError::AlreadySpawned(player));
        }

        let position = self.board.random_walkable_cell(rng);
        self.players.insert(
            player,
            PlayerRecord {
                position,
                status: PlayerStatus::Alive,
            },
        );
        Ok(())
    }

    /// Re-places an existing player at a new uniformly random walkable
    /// cell, alive. This is how dead players come back after the respawn
    /// delay.
    ///
    /// # Errors
    /// [`ActionError::InvalidPlayer`] — the id is not in the game.
    pub fn respawn_player(
        &mut self,
        player: &PlayerId,
        rng: &mut impl Rng,
    ) -> Result<(), ActionError> {
        if !self.players.contains_key(player) {
            return Err(ActionError::InvalidPlayer(player.clone()));
        }
        let position = self.board.random_walkable_cell(rng);
        let record = self
            .players
            .get_mut(player)
            .expect("presence checked above");
        record.position = position;
        record.status = PlayerStatus::Alive;
        Ok(())
    }

    /// Moves a player one step.
    ///
    /// Checks, in order: the player exists, is alive, the destination is
    /// walkable, and the destination is a 4-neighbor of their position
    /// (the current cell counts, so a same-cell move is a legal no-op).
    /// Any number of players may share a cell.
    pub fn move_player(
        &mut self,
        player: &PlayerId,
        destination: Coordinate,
    ) -> Result<(), ActionError> {
        let record = self
            .players
            .get(player)
            .ok_or_else(|| ActionError::InvalidPlayer(player.clone()))?;
        if !record.status.is_alive() {
            return Err(ActionError::DeadPlayer(player.clone()));
        }
        if !self.board.walkable(destination) {
            return Err(ActionError::UnwalkableDestination(destination));
        }
        if !self.board.neighbors(record.position, destination) {
            return Err(ActionError::UnreachableDestination(destination));
        }

        self.players
            .get_mut(player)
            .expect("presence checked above")
            .position = destination;
        Ok(())
    }

    /// Detonates an attack centered on the attacker's cell.
    ///
    /// Every *other* alive player inside the 8-connected blast radius
    /// dies; the attacker is never harmed by their own attack, and
    /// already-dead victims stay dead. Returns the ids newly killed by
    /// this call, for the actor to schedule respawns.
    pub fn player_attack(
        &mut self,
        player: &PlayerId,
    ) -> Result<Vec<PlayerId>, ActionError> {
        let record = self
            .players
            .get(player)
            .ok_or_else(|| ActionError::InvalidPlayer(player.clone()))?;
        if !record.status.is_alive() {
            return Err(ActionError::DeadPlayer(player.clone()));
        }

        let radius: HashSet<Coordinate> =
            self.board.blast_radius(record.position).into_iter().collect();

        let mut killed = Vec::new();
        for (id, victim) in &mut self.players {
            if id == player || !victim.status.is_alive() {
                continue;
            }
            if radius.contains(&victim.position) {
                victim.status = PlayerStatus::Dead;
                killed.push(id.clone());
            }
        }
        killed.sort();
        Ok(killed)
    }

    /// Removes the listed players unconditionally. Unknown ids are
    /// ignored. Used by the actor to evict disconnected players.
    pub fn drop_players(&mut self, players: &[PlayerId]) {
        for player in players {
            self.players.remove(player);
        }
    }

    /// Folds every player into the board's cell map.
    ///
    /// Floor cells with occupants become [`CoalescedCell::Players`];
    /// everything else keeps its geometry. The output's key set equals
    /// the board's cell map's key set.
    ///
    /// # Panics
    /// If a player is positioned on a wall. That state is unreachable
    /// through the transitions above; hitting it means the state is
    /// corrupt and the owning actor must die with it.
    pub fn coalesce(&self) -> CoalescedBoard {
        let mut board_state: CoalescedBoard = self
            .board
            .cell_map()
            .iter()
            .map(|(coord, cell)| {
                let coalesced = if cell.is_floor() {
                    CoalescedCell::Floor
                } else {
                    CoalescedCell::Wall
                };
                (*coord, coalesced)
            })
            .collect();

        for (id, record) in &self.players {
            let cell = board_state
                .get_mut(&record.position)
                .unwrap_or_else(|| {
                    panic!("player {id} is off the board at {}", record.position)
                });
            match cell {
                CoalescedCell::Players(players) => {
                    players.insert(id.clone(), record.status);
                }
                CoalescedCell::Floor => {
                    let mut players = HashMap::new();
                    players.insert(id.clone(), record.status);
                    *cell = CoalescedCell::Players(players);
                }
                CoalescedCell::Wall => {
                    panic!("player {id} is on a wall at {}", record.position)
                }
            }
        }

        board_state
    }

    /// The board this game is played on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The full player table.
    pub fn players(&self) -> &HashMap<PlayerId, PlayerRecord> {
        &self.players
    }

    /// One player's record, if present.
    pub fn player(&self, player: &PlayerId) -> Option<&PlayerRecord> {
        self.players.get(player)
    }

    /// Number of players currently in the game (alive or dead).
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

// =========================================================================
// Tests
// =========================================================================
