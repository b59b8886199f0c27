//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the pixel-grid falling-block game. It has no
//! dependencies on terminals or I/O, so a seed replays a whole round.
//!
//! # Module Structure
//!
//! - [`catalog`]: per-shape geometry (footprints, clearances, cell offsets)
//! - [`piece`]: the falling piece, its moves and rotation
//! - [`field`]: locked fragments, collision and row clearing
//! - [`rng`]: seeded look-ahead shape selection
//! - [`game_state`]: phases, fall timer, scoring and locking
//! - [`snapshot`]: fixed-size copies of the state for renderers
//!
//! # Game Rules
//!
//! | Rule | Value |
//! |------|-------|
//! | Field | 9 columns x 20 rows, cell = 30 px |
//! | Spawn | top-left cell, rotation state 0 |
//! | Gravity | one row once 250 ms have elapsed |
//! | Drop | +1 per downward move (forced or manual) |
//! | Line clear | +50 per row with 9 or more cells |
//! | Loss | a locked cell in row 0 or 1 |
//!
//! A full row removes every fragment whose span covers it; fragments that start
//! above the row then fall until they rest on the floor.
//!
//! # Example
//!
//! ```
//! use pixel_tetris_core::GameState;
//! use pixel_tetris_types::Command;
//!
//! let mut game = GameState::new(12345);
//! game.apply_command(Command::Start);
//! game.apply_command(Command::MoveRight);
//! game.apply_command(Command::MoveDown);
//!
//! assert_eq!(game.score(), 1);
//! ```
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with elapsed time.

pub mod catalog;
pub mod field;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use pixel_tetris_types as types;

// Re-export commonly used types for convenience
pub use catalog::{boundary_clearance, footprint, occupied_offsets};
pub use field::{Fragment, LineClearOutcome, LockedField};
pub use game_state::{GameState, LockEvent, RoundState, Rules};
pub use piece::Piece;
pub use rng::{ShapeQueue, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot, Grid};
