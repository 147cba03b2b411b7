//! Actor-level configuration for a game.

use std::time::Duration;

/// Configuration for a game actor.
///
/// Rule-level options (board, player cap, dimension cap) live in
/// [`GameOptions`](skirmish_state::GameOptions); this struct only
/// configures the actor around the rules.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// How long a kill waits before the victims respawn.
    pub respawn_delay: Duration,

    /// Mailbox capacity. A full mailbox applies backpressure to callers
    /// (bounded channel).
    pub mailbox_capacity: usize,

    /// Seed for the actor's RNG. `None` seeds from the OS; tests pin a
    /// seed for deterministic spawn positions.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            respawn_delay: Duration::from_secs(5),
            mailbox_capacity: 64,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// A config with the given respawn delay and defaults elsewhere.
    /// Tests typically pass 100 ms here.
    pub fn with_respawn_delay(respawn_delay: Duration) -> Self {
        Self {
            respawn_delay,
            ..Self::default()
        }
    }
}
