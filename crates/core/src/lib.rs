//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and state. It has no dependency on the
//! terminal or any other I/O, so the same session runs headless in tests and
//! behind any renderer.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shapes as 4x4 rotation masks, plus colors and sizes
//! - [`board`]: grid of locked cells with row removal
//! - [`placement`]: piece geometry and the collision predicate
//! - [`rng`]: shuffle bag of 28 (four of each kind) and spawn placement
//! - [`scoring`]: lock and line-clear points, drop-interval progression
//! - [`dirty`]: per-region redraw flags
//! - [`config`]: board size and speed settings
//! - [`session`]: the idle/playing state machine
//! - [`snapshot`]: read-only copies for renderers
//!
//! # Game Rules
//!
//! - Input is queued and applied one action per tick
//! - Rotation advances UP → RIGHT → DOWN → LEFT with no wall kicks
//! - A piece that cannot move down locks: +10, then rows clear for
//!   100 / 200 / 400 / 800 points
//! - Each cleared row shortens the drop interval by 5ms, down to 100ms
//! - A freshly promoted piece that collides ends the game
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use blocktris_core::GameSession;
//! use blocktris_types::Command;
//!
//! let mut game = GameSession::new(12345);
//! assert!(game.handle(Command::Start));
//!
//! game.handle(Command::Left);
//! game.handle(Command::Rotate);
//! game.tick(Duration::from_millis(16));
//!
//! assert!(game.is_playing());
//! assert_eq!(game.pending_actions(), 1);
//! ```

pub mod board;
pub mod config;
pub mod dirty;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, GameConfig, SpeedConfig};
pub use dirty::DirtyFlags;
pub use pieces::{get_shape, piece_type, Piece, PieceType, CATALOG};
pub use placement::{for_each_cell, is_occupied, is_unoccupied};
pub use rng::PieceBag;
pub use scoring::{drop_interval_ms, line_clear_score};
pub use session::{EndReason, GameSession, LockEvent, Status};
pub use snapshot::{GameSnapshot, PieceSnapshot};
