//! Play session actor: one task per connected client.

use skirmish_board::{Coordinate, Direction};
use skirmish_fleet::Fleet;
use skirmish_game::{ClientRef, FrameReceiver, GameHandle};
use skirmish_state::{render_view, Frame, GameInfo, PlayerId, PlayerStatus};
use tokio::sync::{mpsc, oneshot};

use crate::{SessionConfig, SessionError};

/// The viewer's cached `{position, status}`, as of the newest frame the
/// session has applied. Both are `None` when the player is not present in
/// that frame (evicted, or no frame yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerState {
    /// Where the viewer stands.
    pub position: Option<Coordinate>,
    /// Whether the viewer is alive.
    pub status: Option<PlayerStatus>,
}

/// Commands sent to the session actor by its handle.
enum SessionCommand {
    Step {
        direction: Direction,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
    Attack {
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
    PlayerState {
        reply: oneshot::Sender<ViewerState>,
    },
    GameInfo {
        reply: oneshot::Sender<Result<GameInfo, SessionError>>,
    },
    Render {
        reply: oneshot::Sender<Result<String, SessionError>>,
    },
}

/// Internal events: the game-down monitor and the reconnect timer post
/// here, never on the command mailbox, so dropping every handle still
/// shuts the actor down.
enum SessionEvent {
    /// The monitored game actor is gone.
    GameDown,
    /// A scheduled rejoin attempt is due.
    TryReconnect { attempt: u32 },
}

/// Handle to a running play session. Cheap to clone.
///
/// Dropping every handle closes the command mailbox and stops the actor.
#[derive(Clone)]
pub struct PlaySession {
    sender: mpsc::Sender<SessionCommand>,
}

impl PlaySession {
    /// Resolves `game_name` through the fleet, joins as `player_id`, and
    /// starts the session actor.
    ///
    /// Fails with [`SessionError::InvalidGame`] when the name is
    /// unknown, or with the game's join error (e.g. a full game).
    pub async fn start(
        fleet: Fleet,
        game_name: impl Into<String>,
        player_id: PlayerId,
        config: SessionConfig,
    ) -> Result<PlaySession, SessionError> {
        let game_name = game_name.into();
        let game = fleet
            .whereis(&game_name)
            .await
            .ok_or_else(|| SessionError::InvalidGame(game_name.clone()))?;

        let (client, frames) = ClientRef::channel();
        let frame = game.join(player_id.clone(), client.clone()).await?;

        let (command_tx, command_rx) = mpsc::channel(32);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        spawn_game_watcher(&game, &event_tx);

        let mut view = ViewCache::new(player_id.clone());
        view.reset(frame);

        let actor = SessionActor {
            fleet,
            game_name,
            player_id,
            config,
            game,
            client,
            frames,
            connected: true,
            view,
            commands: command_rx,
            events: event_rx,
            event_tx,
        };
        tokio::spawn(actor.run());

        Ok(PlaySession { sender: command_tx })
    }

    /// Moves one cell in `direction`. The destination is computed from
    /// the cached viewer position; the game actor is authoritative and
    /// replies verbatim.
    pub async fn step(&self, direction: Direction) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Step { direction, reply })
            .await?
    }

    /// Attacks around the viewer's cell.
    pub async fn attack(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Attack { reply }).await?
    }

    /// The cached viewer position and status.
    pub async fn player_state(&self) -> Result<ViewerState, SessionError> {
        self.request(|reply| SessionCommand::PlayerState { reply })
            .await
    }

    /// The cached board state and dimensions.
    pub async fn game_info(&self) -> Result<GameInfo, SessionError> {
        self.request(|reply| SessionCommand::GameInfo { reply })
            .await?
    }

    /// Renders the cached frame from this session's point of view.
    pub async fn render(&self) -> Result<String, SessionError> {
        self.request(|reply| SessionCommand::Render { reply }).await?
    }

    /// Sends one command and awaits its reply; a dead actor on either
    /// leg is [`SessionError::Closed`].
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }
}

/// Installs the liveness monitor on a game handle: one task that posts
/// exactly one `GameDown` when the actor terminates.
fn spawn_game_watcher(game: &GameHandle, events: &mpsc::UnboundedSender<SessionEvent>) {
    let watched = game.clone();
    let events = events.clone();
    tokio::spawn(async move {
        watched.closed().await;
        let _ = events.send(SessionEvent::GameDown);
    });
}

// ---------------------------------------------------------------------------
// View cache
// ---------------------------------------------------------------------------

/// The session's cached view of its game: the newest frame and the
/// viewer's place in it.
///
/// Frames apply only when strictly newer than the newest already applied,
/// so the exposed view never goes backwards no matter how deliveries are
/// ordered. `reset` is for (re)join frames, which start a fresh sequence
/// scale from a new actor incarnation.
struct ViewCache {
    player_id: PlayerId,
    latest_frame: Option<Frame>,
    latest_sequence: u64,
    viewer_position: Option<Coordinate>,
    viewer_status: Option<PlayerStatus>,
}

impl ViewCache {
    fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            latest_frame: None,
            latest_sequence: 0,
            viewer_position: None,
            viewer_status: None,
        }
    }

    /// Applies a broadcast frame. Stale and duplicate frames (sequence
    /// not newer than the last applied) are dropped silently.
    fn apply(&mut self, frame: Frame) {
        if frame.sequence <= self.latest_sequence && self.latest_frame.is_some() {
            tracing::trace!(
                sequence = frame.sequence,
                latest = self.latest_sequence,
                "stale frame dropped"
            );
            return;
        }
        self.store(frame);
    }

    /// Adopts a join frame unconditionally, restarting the sequence
    /// baseline at its value.
    fn reset(&mut self, frame: Frame) {
        self.store(frame);
    }

    fn store(&mut self, frame: Frame) {
        self.latest_sequence = frame.sequence;
        match frame.find_player(&self.player_id) {
            Some((position, status)) => {
                self.viewer_position = Some(position);
                self.viewer_status = Some(status);
            }
            // The viewer is not in this frame — evicted from the game.
            None => {
                self.viewer_position = None;
                self.viewer_status = None;
            }
        }
        self.latest_frame = Some(frame);
    }

    fn viewer_state(&self) -> ViewerState {
        ViewerState {
            position: self.viewer_position,
            status: self.viewer_status,
        }
    }
}

// ---------------------------------------------------------------------------
// Session actor
// ---------------------------------------------------------------------------

struct SessionActor {
    fleet: Fleet,
    game_name: String,
    player_id: PlayerId,
    config: SessionConfig,
    game: GameHandle,
    client: ClientRef,
    frames: FrameReceiver,
    /// Cleared when the frame stream or the game goes down; set again on
    /// a successful rejoin. Gates the frame branch of the select loop.
    connected: bool,
    view: ViewCache,
    commands: mpsc::Receiver<SessionCommand>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionActor {
    async fn run(mut self) {
        tracing::debug!(player = %self.player_id, game = %self.game_name, "session started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    // Every handle dropped: the session is over.
                    None => break,
                },
                frame = self.frames.recv(), if self.connected => match frame {
                    Some(frame) => self.view.apply(frame),
                    // Stream closed; the GameDown event drives reconnect.
                    None => self.connected = false,
                },
                Some(event) = self.events.recv() => {
                    if !self.handle_event(event).await {
                        break;
                    }
                }
            }
        }

        tracing::debug!(player = %self.player_id, game = %self.game_name, "session stopped");
    }

    async fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Step { direction, reply } => {
                let _ = reply.send(self.handle_step(direction).await);
            }
            SessionCommand::Attack { reply } => {
                let result = self
                    .game
                    .attack(self.player_id.clone(), self.client.clone())
                    .await
                    .map_err(SessionError::from);
                let _ = reply.send(result);
            }
            SessionCommand::PlayerState { reply } => {
                let _ = reply.send(self.view.viewer_state());
            }
            SessionCommand::GameInfo { reply } => {
                let result = self
                    .view
                    .latest_frame
                    .as_ref()
                    .map(|frame| GameInfo {
                        board_state: frame.board_state.clone(),
                        dimensions: frame.dimensions,
                    })
                    .ok_or(SessionError::Desynced);
                let _ = reply.send(result);
            }
            SessionCommand::Render { reply } => {
                let result = self
                    .view
                    .latest_frame
                    .as_ref()
                    .map(|frame| {
                        render_view(&frame.board_state, frame.dimensions, &self.player_id)
                    })
                    .ok_or(SessionError::Desynced);
                let _ = reply.send(result);
            }
        }
    }

    async fn handle_step(&mut self, direction: Direction) -> Result<(), SessionError> {
        let position = self.view.viewer_position.ok_or(SessionError::Desynced)?;
        // Stepping off the non-negative grid is impossible from a floor
        // cell of an enclosed board.
        let destination = position.step(direction).ok_or(SessionError::Desynced)?;
        self.game
            .move_to(self.player_id.clone(), destination, self.client.clone())
            .await
            .map_err(SessionError::from)
    }

    /// Handles an internal event. Returns `false` when the session must
    /// terminate (reconnect attempts exhausted).
    async fn handle_event(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::GameDown => {
                tracing::warn!(
                    player = %self.player_id,
                    game = %self.game_name,
                    "game actor down, scheduling reconnect"
                );
                self.connected = false;
                self.schedule_reconnect(1);
                true
            }
            SessionEvent::TryReconnect { attempt } => match self.try_rejoin().await {
                Ok(()) => {
                    tracing::info!(
                        player = %self.player_id,
                        game = %self.game_name,
                        attempt,
                        "rejoined game"
                    );
                    true
                }
                Err(error) => {
                    if attempt >= self.config.reconnect_attempts {
                        tracing::error!(
                            player = %self.player_id,
                            game = %self.game_name,
                            attempt,
                            %error,
                            "reconnect attempts exhausted, terminating session"
                        );
                        return false;
                    }
                    tracing::debug!(
                        player = %self.player_id,
                        game = %self.game_name,
                        attempt,
                        %error,
                        "reconnect attempt failed"
                    );
                    self.schedule_reconnect(attempt + 1);
                    true
                }
            },
        }
    }

    /// Posts `TryReconnect` back to this actor after the configured
    /// delay.
    fn schedule_reconnect(&self, attempt: u32) {
        let delay = self.config.reconnect_delay;
        let events = self.event_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::TryReconnect { attempt });
        });
    }

    /// One rejoin attempt: re-resolve the name, join with a fresh client
    /// channel, adopt the returned frame, and re-install the monitor.
    async fn try_rejoin(&mut self) -> Result<(), SessionError> {
        let game = self
            .fleet
            .whereis(&self.game_name)
            .await
            .ok_or_else(|| SessionError::InvalidGame(self.game_name.clone()))?;

        let (client, frames) = ClientRef::channel();
        let frame = game.join(self.player_id.clone(), client.clone()).await?;

        spawn_game_watcher(&game, &self.event_tx);
        self.game = game;
        self.client = client;
        self.frames = frames;
        self.connected = true;
        // A new actor incarnation starts a new sequence scale; the join
        // frame is the fresh baseline.
        self.view.reset(frame);
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
