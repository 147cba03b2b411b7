//! The fleet: a process-wide registry of named, live games.
//!
//! The fleet is the only cross-actor shared resource in the engine. It
//! maintains a unique-name index over running game actors, enforces an
//! optional cap on concurrent games, and unregisters a name automatically
//! when its actor terminates — whatever the cause.
//!
//! ```text
//! Fleet (name -> GameHandle)
//!   ├── create_game("arena", ...)   start + register, or MaxGames / NameTaken
//!   ├── whereis("arena")            lookup by name
//!   └── stop_game("arena")          shut down + unregister
//! ```

mod error;
mod fleet;

pub use error::FleetError;
pub use fleet::{Fleet, FleetConfig};
