//! Game actor: an isolated Tokio task that owns one game's state.
//!
//! Each game runs in its own task, the sole writer of its `GameState`.
//! Requests arrive on a bounded mailbox and are processed strictly in
//! arrival order; the broadcast for request *n* is emitted before request
//! *n+1* is dequeued. Deferred work (respawns, monitor-down events) comes
//! back through the same mailbox as self-messages, so it interleaves with
//! requests at well-defined points.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use skirmish_board::Coordinate;
use skirmish_state::{
    ActionError, ConfigError, Frame, GameInfo, GameOptions, GameState, PlayerId,
};
use tokio::sync::{mpsc, oneshot};

use crate::{ClientId, ClientRef, GameConfig, GameError};

/// Counter for generating unique game ids.
static NEXT_GAME_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for one game actor instance.
///
/// Names are the fleet's business; the id distinguishes actor
/// *incarnations*, so a registry entry for a dead actor is never confused
/// with a fresh game registered under the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// Handle to one monitor installed on a subscribing client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MonitorId(u64);

/// Commands sent to a game actor through its mailbox.
///
/// The request variants carry a `oneshot` reply channel; the rest are
/// self-messages posted by the actor's own timers and monitors.
enum GameCommand {
    /// Add a player (or re-attach a returning one) and subscribe the
    /// client to frames.
    Join {
        player: PlayerId,
        client: ClientRef,
        reply: oneshot::Sender<Result<Frame, GameError>>,
    },

    /// Move a player one step.
    Move {
        player: PlayerId,
        destination: Coordinate,
        client: ClientRef,
        reply: oneshot::Sender<Result<(), GameError>>,
    },

    /// Detonate an attack around a player's cell.
    Attack {
        player: PlayerId,
        client: ClientRef,
        reply: oneshot::Sender<Result<(), GameError>>,
    },

    /// Snapshot the current board without broadcasting.
    Info {
        reply: oneshot::Sender<GameInfo>,
    },

    /// Self-message: the respawn timer for these players fired.
    Respawn { players: Vec<PlayerId> },

    /// Self-message: a monitored client's frame channel closed.
    MonitorDown { monitor: MonitorId },

    /// Shut down the actor.
    Shutdown,
}

/// Handle to a running game actor. Used to send requests to it.
///
/// Cheap to clone — an mpsc sender wrapper plus the game's id. The fleet
/// holds one per registered game; every session holds one for its game.
#[derive(Debug, Clone)]
pub struct GameHandle {
    game_id: GameId,
    sender: mpsc::Sender<GameCommand>,
}

impl GameHandle {
    /// Validates `options`, builds the initial state, and spawns the
    /// actor task. Construction errors surface here, synchronously —
    /// no task is spawned for an invalid game.
    ///
    /// Must be called within a Tokio runtime.
    pub fn spawn(options: GameOptions, config: GameConfig) -> Result<GameHandle, ConfigError> {
        let state = GameState::new(options)?;
        let game_id = GameId(NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::channel(config.mailbox_capacity);

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let actor = GameActor {
            game_id,
            state,
            subscribers: HashMap::new(),
            monitors: HashMap::new(),
            next_monitor: 1,
            rng,
            respawn_delay: config.respawn_delay,
            epoch: Instant::now(),
            last_sequence: 0,
            receiver: rx,
            self_sender: tx.clone(),
        };

        tokio::spawn(actor.run());

        Ok(GameHandle { game_id, sender: tx })
    }

    /// This game's unique id.
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Joins a player, attaching `client` as a frame subscriber.
    ///
    /// A player id already in the game is a reconnect: the new client is
    /// attached and the current frame returned, never an error. A full
    /// game replies [`ActionError::MaxPlayers`] with no side effects.
    pub async fn join(
        &self,
        player: PlayerId,
        client: ClientRef,
    ) -> Result<Frame, GameError> {
        self.request(|reply| GameCommand::Join { player, client, reply })
            .await?
    }

    /// Moves a player to `destination` (which must be a 4-neighbor of
    /// their position), attaching `client` as a subscriber.
    pub async fn move_to(
        &self,
        player: PlayerId,
        destination: Coordinate,
        client: ClientRef,
    ) -> Result<(), GameError> {
        self.request(|reply| GameCommand::Move {
            player,
            destination,
            client,
            reply,
        })
        .await?
    }

    /// Detonates an attack around the player's cell, attaching `client`
    /// as a subscriber. Kills schedule a deferred respawn.
    pub async fn attack(
        &self,
        player: PlayerId,
        client: ClientRef,
    ) -> Result<(), GameError> {
        self.request(|reply| GameCommand::Attack { player, client, reply })
            .await?
    }

    /// Snapshots the current board state without subscribing or
    /// broadcasting.
    pub async fn info(&self) -> Result<GameInfo, GameError> {
        self.request(|reply| GameCommand::Info { reply }).await
    }

    /// Tells the game to shut down. Subscribers observe the closure of
    /// their frame channels; no further requests will be served.
    pub async fn shutdown(&self) -> Result<(), GameError> {
        self.sender
            .send(GameCommand::Shutdown)
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))
    }

    /// Resolves once the actor is gone (shut down or crashed). Used by
    /// registry and session watchers as the death monitor.
    pub async fn closed(&self) {
        self.sender.closed().await;
    }

    /// Whether the actor is already gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Sends one command and awaits its oneshot reply, mapping channel
    /// failure on either leg to [`GameError::Unavailable`].
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> GameCommand,
    ) -> Result<T, GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))?;
        reply_rx
            .await
            .map_err(|_| GameError::Unavailable(self.game_id))
    }
}

/// The internal game actor. Runs inside a Tokio task.
struct GameActor {
    game_id: GameId,
    state: GameState,
    /// Frame subscribers per player. An entry may be empty (every client
    /// gone) — it is retained until the next respawn tick evicts the
    /// player (lazy eviction).
    subscribers: HashMap<PlayerId, HashMap<ClientId, ClientRef>>,
    /// Installed monitors, one per attached (player, client) pair.
    monitors: HashMap<MonitorId, (PlayerId, ClientId)>,
    next_monitor: u64,
    rng: StdRng,
    respawn_delay: Duration,
    /// Epoch for the sequence clock.
    epoch: Instant,
    last_sequence: u64,
    receiver: mpsc::Receiver<GameCommand>,
    /// The actor's own mailbox sender, for timers and monitors to post
    /// self-messages.
    self_sender: mpsc::Sender<GameCommand>,
}

impl GameActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::info!(game = %self.game_id, "game actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                GameCommand::Join { player, client, reply } => {
                    let result = self.handle_join(player, client);
                    let _ = reply.send(result);
                }
                GameCommand::Move {
                    player,
                    destination,
                    client,
                    reply,
                } => {
                    let result = self.handle_move(player, destination, client);
                    let _ = reply.send(result);
                }
                GameCommand::Attack { player, client, reply } => {
                    let result = self.handle_attack(player, client);
                    let _ = reply.send(result);
                }
                GameCommand::Info { reply } => {
                    let _ = reply.send(GameInfo {
                        board_state: self.state.coalesce(),
                        dimensions: self.state.board().dimensions(),
                    });
                }
                GameCommand::Respawn { players } => {
                    self.handle_respawn(players);
                }
                GameCommand::MonitorDown { monitor } => {
                    self.handle_monitor_down(monitor);
                }
                GameCommand::Shutdown => {
                    tracing::info!(game = %self.game_id, "game shutting down");
                    break;
                }
            }
        }

        tracing::info!(game = %self.game_id, "game actor stopped");
    }

    fn handle_join(
        &mut self,
        player: PlayerId,
        client: ClientRef,
    ) -> Result<Frame, GameError> {
        match self.state.spawn_player(player.clone(), &mut self.rng) {
            Ok(()) => {
                tracing::info!(
                    game = %self.game_id,
                    %player,
                    players = self.state.player_count(),
                    "player joined"
                );
            }
            // A returning player: re-attach the new client, don't fail.
            Err(ActionError::AlreadySpawned(_)) => {
                tracing::debug!(game = %self.game_id, %player, "player rejoined");
            }
            Err(err) => {
                tracing::debug!(game = %self.game_id, %player, error = %err, "join rejected");
                return Err(err.into());
            }
        }

        self.attach(player, client);
        Ok(self.broadcast())
    }

    fn handle_move(
        &mut self,
        player: PlayerId,
        destination: Coordinate,
        client: ClientRef,
    ) -> Result<(), GameError> {
        let result = self.state.move_player(&player, destination);
        if let Err(err) = &result {
            tracing::debug!(game = %self.game_id, %player, error = %err, "move rejected");
        }
        self.attach(player, client);
        self.broadcast();
        result.map_err(GameError::from)
    }

    fn handle_attack(
        &mut self,
        player: PlayerId,
        client: ClientRef,
    ) -> Result<(), GameError> {
        let result = self.state.player_attack(&player);
        self.attach(player.clone(), client);

        match result {
            Ok(killed) => {
                if !killed.is_empty() {
                    tracing::info!(
                        game = %self.game_id,
                        %player,
                        killed = killed.len(),
                        "attack landed"
                    );
                    self.schedule_respawn(killed);
                }
                self.broadcast();
                Ok(())
            }
            Err(err) => {
                tracing::debug!(game = %self.game_id, %player, error = %err, "attack rejected");
                self.broadcast();
                Err(err.into())
            }
        }
    }

    /// The respawn timer fired. Evict every player with no remaining
    /// subscriber, then revive the victims still present.
    fn handle_respawn(&mut self, players: Vec<PlayerId>) {
        let gone: Vec<PlayerId> = self
            .subscribers
            .iter()
            .filter(|(_, clients)| clients.is_empty())
            .map(|(player, _)| player.clone())
            .collect();
        if !gone.is_empty() {
            tracing::info!(
                game = %self.game_id,
                evicted = gone.len(),
                "evicting disconnected players"
            );
            self.state.drop_players(&gone);
            for player in &gone {
                self.subscribers.remove(player);
            }
        }

        for player in &players {
            match self.state.respawn_player(player, &mut self.rng) {
                Ok(()) => {}
                // The player left (or was just evicted) — nothing to do.
                Err(ActionError::InvalidPlayer(_)) => {}
                Err(err) => {
                    tracing::warn!(
                        game = %self.game_id,
                        %player,
                        error = %err,
                        "unexpected respawn failure"
                    );
                }
            }
        }

        self.broadcast();
    }

    fn handle_monitor_down(&mut self, monitor: MonitorId) {
        let Some((player, client_id)) = self.monitors.remove(&monitor) else {
            return;
        };
        if let Some(clients) = self.subscribers.get_mut(&player) {
            clients.remove(&client_id);
            // The (possibly empty) entry stays until the next respawn
            // tick — lazy eviction keeps a briefly-disconnected player
            // on the roster.
            tracing::debug!(
                game = %self.game_id,
                %player,
                client = %client_id,
                remaining = clients.len(),
                "subscriber went down"
            );
        }
    }

    /// Adds `client` to the player's subscriber set and installs a
    /// monitor on it, unless this exact client is already attached.
    fn attach(&mut self, player: PlayerId, client: ClientRef) {
        let clients = self.subscribers.entry(player.clone()).or_default();
        if clients.contains_key(&client.id()) {
            return;
        }

        let monitor = MonitorId(self.next_monitor);
        self.next_monitor += 1;
        self.monitors.insert(monitor, (player, client.id()));

        // The monitor: one spawned watcher per attached client, posting
        // exactly one MonitorDown when the client's channel closes.
        let watched = client.clone();
        let mailbox = self.self_sender.clone();
        tokio::spawn(async move {
            watched.closed().await;
            let _ = mailbox.send(GameCommand::MonitorDown { monitor }).await;
        });

        clients.insert(client.id(), client);
    }

    /// Posts `Respawn { players }` back to this mailbox after the
    /// configured delay. The timer lives in its own task, so it survives
    /// any client churn in between.
    fn schedule_respawn(&self, players: Vec<PlayerId>) {
        let delay = self.respawn_delay;
        let mailbox = self.self_sender.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = mailbox.send(GameCommand::Respawn { players }).await;
        });
    }

    /// Cuts one fresh frame and delivers it exactly once to every
    /// distinct client across all subscriber sets. Delivery is
    /// best-effort and non-blocking.
    fn broadcast(&mut self) -> Frame {
        let frame = Frame {
            sequence: self.next_sequence(),
            board_state: self.state.coalesce(),
            dimensions: self.state.board().dimensions(),
        };

        let mut delivered: HashSet<ClientId> = HashSet::new();
        for clients in self.subscribers.values() {
            for (client_id, client) in clients {
                if delivered.insert(*client_id) {
                    client.send(frame.clone());
                }
            }
        }

        tracing::trace!(
            game = %self.game_id,
            sequence = frame.sequence,
            clients = delivered.len(),
            "frame broadcast"
        );
        frame
    }

    /// Strictly increasing sequence: monotonic nanoseconds since the
    /// actor started, tie-broken by incrementing when the clock hasn't
    /// advanced past the last value.
    fn next_sequence(&mut self) -> u64 {
        let tick = self.epoch.elapsed().as_nanos() as u64;
        self.last_sequence = tick.max(self.last_sequence + 1);
        self.last_sequence
    }
}
