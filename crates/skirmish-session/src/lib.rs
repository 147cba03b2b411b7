//! Per-client play sessions for Skirmish.
//!
//! A [`PlaySession`] is the client's agent inside the process: a small
//! actor that holds a handle to one game, consumes its broadcast frames
//! in monotonic order, and translates directional commands into the
//! absolute coordinates the game actor expects.
//!
//! ```text
//! caller ──commands──▶ PlaySession ──requests──▶ GameActor
//!                          ▲                        │
//!                          └───────frames───────────┘
//! ```
//!
//! The session also owns the client side of liveness: it watches its game
//! actor and, if the actor dies, silently rejoins through the fleet —
//! retrying a configurable number of times before giving up. The game
//! actor stays authoritative throughout; the session never pre-validates
//! a move, it only computes the target cell from its cached view.

mod config;
mod error;
mod session;

pub use config::SessionConfig;
pub use error::SessionError;
pub use session::{PlaySession, ViewerState};
