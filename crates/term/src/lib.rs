//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal gameplay. The game view draws a core
//! snapshot into a framebuffer; the renderer flushes framebuffers to the
//! terminal with crossterm, rewriting only what changed.
//!
//! Goals:
//! - Keep `core` free of I/O
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_bitris_core as core;
pub use tui_bitris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
