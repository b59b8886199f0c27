//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay. It renders
//! snapshots into a simple framebuffer that is then diffed and flushed to the
//! terminal through crossterm.
//!
//! The 9x20 field is drawn with 2x1 characters per cell to compensate for the
//! typical terminal glyph aspect ratio. Pixel coordinates (30 px cells) are kept in
//! the core types for pixel-based front ends; the terminal only needs cell indices.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use pixel_tetris_core as core;
pub use pixel_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{shape_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
