//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. The mapping takes the
//! current phase because Space and Esc mean different things on different screens.
//! One command is produced per key press; there is no auto-repeat handling.

pub mod map;

pub use pixel_tetris_types as types;

pub use map::{handle_key_event, should_quit};
