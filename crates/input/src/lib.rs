//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s. There is no
//! auto-repeat handling here: every key press (or terminal repeat) is one
//! intent, applied by the game loop before the next frame.

pub mod map;

pub use tui_bitris_types as types;

pub use map::{handle_key_event, should_quit};
