//! Pixel Tetris (workspace facade crate).
//!
//! The game is split into dedicated crates under `crates/`; this package re-exports
//! them as `pixel_tetris::{core,input,term,types}` and adds the pieces only the
//! binary needs: configuration and the JSON-lines event log.

pub use pixel_tetris_core as core;
pub use pixel_tetris_input as input;
pub use pixel_tetris_term as term;
pub use pixel_tetris_types as types;

pub mod config;
pub mod event_log;
