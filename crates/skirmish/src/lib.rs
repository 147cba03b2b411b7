//! # Skirmish
//!
//! Authoritative back-end engine for a small multi-player grid game.
//!
//! Many independent games run concurrently in one process. Each game is
//! an isolated actor owning its state; per-client sessions translate
//! directional commands, consume broadcast frames, and transparently
//! rejoin if their game is replaced. A process-wide fleet keeps the
//! unique-name index of live games.
//!
//! ## Quick start
//!
//! ```rust
//! use skirmish::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), SkirmishError> {
//! let fleet = Fleet::default();
//! fleet
//!     .create_game("arena", GameOptions::default(), GameConfig::default())
//!     .await?;
//!
//! let session = PlaySession::start(
//!     fleet,
//!     "arena",
//!     PlayerId::new("ada"),
//!     SessionConfig::default(),
//! )
//! .await?;
//!
//! session.step(Direction::Up).await.ok();
//! session.attack().await?;
//! println!("{}", session.render().await?);
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::SkirmishError;

/// Re-exports everything a consumer of the engine needs.
///
/// ```rust
/// use skirmish::prelude::*;
/// ```
pub mod prelude {
    // Meta-crate
    pub use crate::SkirmishError;

    // Board types
    pub use skirmish_board::{
        Board, BoardError, Cell, Coordinate, Dimensions, Direction,
    };

    // Game rules and frames
    pub use skirmish_state::{
        render_view, ActionError, CoalescedBoard, CoalescedCell, ConfigError,
        Frame, GameInfo, GameOptions, GameState, PlayerId, PlayerRecord,
        PlayerStatus,
    };

    // Game actor
    pub use skirmish_game::{
        ClientId, ClientRef, FrameReceiver, GameConfig, GameError, GameHandle,
        GameId,
    };

    // Fleet registry
    pub use skirmish_fleet::{Fleet, FleetConfig, FleetError};

    // Sessions
    pub use skirmish_session::{
        PlaySession, SessionConfig, SessionError, ViewerState,
    };
}
