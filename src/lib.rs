//! TUI Bitris (workspace facade crate).
//!
//! Exposes `tui_bitris::{core,input,term,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use tui_bitris_core as core;
pub use tui_bitris_input as input;
pub use tui_bitris_term as term;
pub use tui_bitris_types as types;
