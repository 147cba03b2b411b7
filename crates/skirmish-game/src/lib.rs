//! The per-game authoritative actor for Skirmish.
//!
//! Each game runs in its own Tokio task, communicating with the outside
//! world through an mpsc mailbox. This is the actor model: no shared
//! mutable state, just message passing. The actor is the sole writer of
//! its [`GameState`](skirmish_state::GameState) and the only place in the
//! stack where time, timers and randomness appear.
//!
//! Responsibilities:
//! - serialize client requests (join / move / attack) over a bounded
//!   mailbox and apply them as pure state transitions;
//! - track subscribing clients per player, with a liveness monitor per
//!   attached client;
//! - broadcast a freshly coalesced, strictly-sequenced [`Frame`] to every
//!   distinct subscriber after each request;
//! - schedule deferred respawns as self-messages, surviving client churn;
//! - lazily evict players with no remaining subscribers at the respawn
//!   tick, freeing their slot.

mod client;
mod config;
mod error;
mod game;

pub use client::{ClientId, ClientRef, FrameReceiver};
pub use config::GameConfig;
pub use error::GameError;
pub use game::{GameHandle, GameId};
