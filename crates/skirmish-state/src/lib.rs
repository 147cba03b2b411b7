//! Pure game rules for Skirmish.
//!
//! Everything in this crate is allocation-pure: no I/O, no clocks, no
//! randomness except through an injected [`rand::Rng`]. The game actor
//! (one layer up) is the only place where time, timers and client
//! references appear.
//!
//! - **Players** ([`PlayerId`], [`PlayerStatus`], [`PlayerRecord`]) —
//!   who is on the board and whether they are alive.
//! - **State** ([`GameState`]) — one game's authoritative state and every
//!   rule transition: spawn, respawn, move, attack, drop.
//! - **Frames** ([`Frame`], [`CoalescedBoard`], [`CoalescedCell`]) — the
//!   versioned per-cell snapshot broadcast to subscribers.
//! - **Rendering** ([`render_view`]) — the human-readable picture of a
//!   coalesced board from one player's point of view.
//!
//! # Transition contract
//!
//! Transitions take `&mut GameState` and return a `Result`. An `Err`
//! never mutates: every transition validates first and returns before
//! touching the state, so an error leaves the state exactly as it was.

mod error;
mod frame;
mod player;
mod render;
mod state;

pub use error::{ActionError, ConfigError};
pub use frame::{CoalescedBoard, CoalescedCell, Frame, GameInfo};
pub use player::{PlayerId, PlayerRecord, PlayerStatus};
pub use render::render_view;
pub use state::{GameOptions, GameState};
