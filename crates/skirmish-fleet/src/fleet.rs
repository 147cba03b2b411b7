//! Fleet registry: creates, tracks, and looks up named games.

use std::collections::HashMap;
use std::sync::Arc;

use skirmish_game::{GameConfig, GameHandle, GameId};
use skirmish_state::GameOptions;
use tokio::sync::Mutex;

use crate::FleetError;

/// Fleet-level configuration.
#[derive(Debug, Clone, Default)]
pub struct FleetConfig {
    /// Cap on concurrently registered games. `None` means unlimited.
    pub max_games: Option<usize>,
}

/// One registry entry. The id pins the actor *incarnation* so a stale
/// watcher for a dead game can never evict a fresh game that reused the
/// name.
struct Registration {
    game_id: GameId,
    handle: GameHandle,
}

/// The process-wide registry of live games, keyed by unique name.
///
/// Cheap to clone — clones share one registry. A single mutex-guarded
/// map is all the coordination this needs: every game has its own actor,
/// and the fleet only mediates creation and name lookup.
#[derive(Clone)]
pub struct Fleet {
    inner: Arc<FleetInner>,
}

struct FleetInner {
    games: Mutex<HashMap<String, Registration>>,
    max_games: Option<usize>,
}

impl Fleet {
    /// Creates an empty fleet.
    pub fn new(config: FleetConfig) -> Self {
        Self {
            inner: Arc::new(FleetInner {
                games: Mutex::new(HashMap::new()),
                max_games: config.max_games,
            }),
        }
    }

    /// Starts a new game actor and registers it under `name`.
    ///
    /// # Errors
    /// - [`FleetError::MaxGames`] — the fleet is at its cap;
    /// - [`FleetError::NameTaken`] — a live game already owns the name;
    /// - [`FleetError::Config`] — the game options failed validation.
    pub async fn create_game(
        &self,
        name: &str,
        options: GameOptions,
        config: GameConfig,
    ) -> Result<GameHandle, FleetError> {
        let mut games = self.inner.games.lock().await;

        if let Some(max) = self.inner.max_games {
            if games.len() >= max {
                return Err(FleetError::MaxGames);
            }
        }
        if games.contains_key(name) {
            return Err(FleetError::NameTaken(name.to_string()));
        }

        let handle = GameHandle::spawn(options, config)?;
        games.insert(
            name.to_string(),
            Registration {
                game_id: handle.game_id(),
                handle: handle.clone(),
            },
        );
        drop(games);

        tracing::info!(game = %handle.game_id(), name, "game registered");

        // Unregister the name when the actor terminates, however it
        // terminates — clean shutdown or crash.
        let fleet = self.clone();
        let watched = handle.clone();
        let watched_name = name.to_string();
        tokio::spawn(async move {
            watched.closed().await;
            fleet.unregister(&watched_name, watched.game_id()).await;
        });

        Ok(handle)
    }

    /// Looks up a live game by name.
    pub async fn whereis(&self, name: &str) -> Option<GameHandle> {
        self.inner
            .games
            .lock()
            .await
            .get(name)
            .map(|registration| registration.handle.clone())
    }

    /// Shuts down the named game and frees its name immediately.
    pub async fn stop_game(&self, name: &str) -> Result<(), FleetError> {
        let registration = self
            .inner
            .games
            .lock()
            .await
            .remove(name)
            .ok_or_else(|| FleetError::GameNotFound(name.to_string()))?;

        tracing::info!(game = %registration.game_id, name, "stopping game");
        // Best effort: the actor may already be gone.
        let _ = registration.handle.shutdown().await;
        Ok(())
    }

    /// Number of registered games.
    pub async fn game_count(&self) -> usize {
        self.inner.games.lock().await.len()
    }

    /// Names of all registered games.
    pub async fn game_names(&self) -> Vec<String> {
        self.inner.games.lock().await.keys().cloned().collect()
    }

    /// Removes `name` iff it still maps to this exact actor incarnation.
    async fn unregister(&self, name: &str, game_id: GameId) {
        let mut games = self.inner.games.lock().await;
        if games
            .get(name)
            .is_some_and(|registration| registration.game_id == game_id)
        {
            games.remove(name);
            tracing::info!(game = %game_id, name, "game unregistered");
        }
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new(FleetConfig::default())
    }
}
