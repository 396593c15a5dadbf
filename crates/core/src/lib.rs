//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the field, the pieces and the tick state machine.
//! It has no dependencies on terminal I/O, which makes it:
//!
//! - **Deterministic**: the same seed produces the same game
//! - **Testable**: every rule can be exercised without a terminal
//! - **Small**: the whole field is 25 bytes and `Copy`
//!
//! # Module Structure
//!
//! - [`catalog`]: rotation masks for the seven tetrominoes and the score table
//! - [`field`]: bit-packed 10x20 field with row operations
//! - [`piece`]: falling piece state and its cell coordinate mapping
//! - [`placement`]: collision test and stamping
//! - [`scoring`]: line clears, lines/level progression and score deltas
//! - [`rng`]: NES-style spawn policy on a seeded LCG
//! - [`game`]: the `Falling -> Locking -> SpawnCheck -> GameOver` state machine
//! - [`snapshot`]: read-only frame data for renderers
//!
//! # Game Rules
//!
//! - **No kicks**: a rotation or move that collides is discarded
//! - **Spawn area**: pieces enter at (3, -2); cells above the field are legal
//! - **Scoring**: 40/100/300/1200 x (level + 1) for 1-4 lines
//! - **Level**: one level per 10 lines
//!
//! # Example
//!
//! ```
//! use tui_bitris_core::{Game, TickOutcome};
//! use tui_bitris_core::types::Intent;
//!
//! let mut game = Game::new(12345);
//!
//! game.apply_intent(Intent::MoveLeft);
//! game.apply_intent(Intent::RotateCw);
//!
//! // Gravity until the first piece locks.
//! loop {
//!     match game.tick().unwrap() {
//!         TickOutcome::Dropped => continue,
//!         _ => break,
//!     }
//! }
//! assert_eq!(game.field().occupied_count(), 4);
//! ```

pub mod catalog;
pub mod field;
pub mod game;
pub mod piece;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_bitris_types as types;

// Re-export commonly used types for convenience
pub use catalog::shape_encoding;
pub use field::{Field, FieldError};
pub use game::{Game, Phase, Step, TickOutcome};
pub use piece::Piece;
pub use placement::{collides, erase, stamp};
pub use rng::{SimpleRng, SpawnPolicy};
pub use scoring::{calculate_level, calculate_line_score, clear_lines, LineClear, Progress};
pub use snapshot::Snapshot;
