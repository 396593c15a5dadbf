//! Game module - the tick state machine
//!
//! One [`Game`] owns the field, the falling piece, the progress counters and
//! the spawn policy. It moves through four phases:
//!
//! - `Falling`: gravity tries to move the piece down one row.
//! - `Locking`: the blocked piece is stamped and full rows are cleared.
//!   A piece that locks with cells still above row 0 ends the game.
//! - `SpawnCheck`: a new piece is drawn; if it collides the game is over.
//! - `GameOver`: terminal.
//!
//! The field never contains the falling piece: it holds locked cells only,
//! so candidates can be tested against it directly.

use tracing::{debug, info, trace};

use crate::field::{Field, FieldError};
use crate::piece::Piece;
use crate::placement::{collides, stamp};
use crate::rng::SpawnPolicy;
use crate::scoring::{clear_lines, LineClear, Progress};
use crate::snapshot::Snapshot;
use crate::types::{speed_ms, Intent};

/// Phase of the tick state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Falling,
    Locking,
    SpawnCheck,
    GameOver,
}

/// One state transition, as reported by [`Game::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Gravity moved the piece down; still falling
    Dropped,
    /// The piece cannot move down; it locks on the next step
    Blocked,
    /// The piece became part of the field
    Locked(LineClear),
    /// A new piece entered the spawn area
    Spawned(Piece),
    /// The new piece collided at spawn; the game is over
    ToppedOut(Piece),
    /// Nothing happens after game over
    Idle,
}

/// What a whole gravity tick did, as reported by [`Game::tick`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The piece fell one row
    Dropped,
    /// The piece locked and the next one spawned
    Locked(LineClear),
    /// The piece locked and the next one could not spawn
    GameOver(LineClear),
    /// The game was already over
    Finished,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    field: Field,
    piece: Piece,
    phase: Phase,
    progress: Progress,
    spawn: SpawnPolicy,
    /// Pieces that entered the field, including the first one
    pieces_spawned: u32,
    quit_requested: bool,
}

impl Game {
    /// Start a game on an empty field
    pub fn new(seed: u32) -> Self {
        Self::with_field(seed, Field::new())
    }

    /// Start a game on a prepared field.
    ///
    /// The first piece spawns immediately; a blocked spawn area ends the game
    /// before it begins.
    pub fn with_field(seed: u32, field: Field) -> Self {
        let mut spawn = SpawnPolicy::new(seed);
        let piece = Piece::spawn(spawn.draw());
        let mut game = Self {
            field,
            piece,
            phase: Phase::SpawnCheck,
            progress: Progress::new(),
            spawn,
            pieces_spawned: 0,
            quit_requested: false,
        };
        game.check_spawn(piece);
        game
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines()
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn seed(&self) -> u32 {
        self.spawn.seed()
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Whether a `Quit` intent was received
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Gravity timeout for the current level, in milliseconds
    pub fn speed_ms(&self) -> u32 {
        speed_ms(self.level())
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field: self.field,
            piece: self.piece,
            phase: self.phase,
            lines: self.progress.lines(),
            score: self.progress.score(),
            level: self.progress.level(),
            seed: self.spawn.seed(),
            pieces_spawned: self.pieces_spawned,
        }
    }

    /// Apply one player intent.
    ///
    /// Moves and rotations are committed only if the candidate does not
    /// collide; otherwise they are dropped silently. Returns whether the
    /// piece changed. Nothing moves outside the `Falling` phase.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if intent == Intent::Quit {
            self.quit_requested = true;
            return false;
        }
        if self.phase != Phase::Falling {
            return false;
        }

        let Some(candidate) = self.piece.with_intent(intent) else {
            return false;
        };

        if collides(&self.field, &candidate) {
            trace!(intent = intent.as_str(), "intent rejected");
            return false;
        }

        self.piece = candidate;
        true
    }

    /// Advance gravity by one tick.
    ///
    /// Runs the state machine until the piece is falling again or the game
    /// is over: a blocked drop locks, clears lines and spawns within the same
    /// tick. A lock that leaves cells above the field reports `GameOver`.
    pub fn tick(&mut self) -> Result<TickOutcome, FieldError> {
        let mut clear = LineClear::default();
        loop {
            match self.step()? {
                Step::Dropped => return Ok(TickOutcome::Dropped),
                Step::Blocked => {}
                Step::Locked(c) if self.phase == Phase::GameOver => {
                    return Ok(TickOutcome::GameOver(c))
                }
                Step::Locked(c) => clear = c,
                Step::Spawned(_) => return Ok(TickOutcome::Locked(clear)),
                Step::ToppedOut(_) => return Ok(TickOutcome::GameOver(clear)),
                Step::Idle => return Ok(TickOutcome::Finished),
            }
        }
    }

    /// Perform exactly one state transition
    pub fn step(&mut self) -> Result<Step, FieldError> {
        match self.phase {
            Phase::Falling => {
                let candidate = self.piece.dropped();
                if collides(&self.field, &candidate) {
                    self.phase = Phase::Locking;
                    Ok(Step::Blocked)
                } else {
                    self.piece = candidate;
                    Ok(Step::Dropped)
                }
            }
            Phase::Locking => {
                let clear = self.lock()?;
                // Cells above row 0 cannot be stored: the stack has topped out.
                if self.piece.cells().iter().any(|&(_, y)| y < 0) {
                    self.phase = Phase::GameOver;
                    info!(
                        score = self.progress.score(),
                        lines = self.progress.lines(),
                        "locked above the field, game over"
                    );
                } else {
                    self.phase = Phase::SpawnCheck;
                }
                Ok(Step::Locked(clear))
            }
            Phase::SpawnCheck => {
                let piece = Piece::spawn(self.spawn.draw());
                if self.check_spawn(piece) {
                    Ok(Step::Spawned(piece))
                } else {
                    Ok(Step::ToppedOut(piece))
                }
            }
            Phase::GameOver => Ok(Step::Idle),
        }
    }

    /// Stamp the piece at its current position and clear the rows it spans
    fn lock(&mut self) -> Result<LineClear, FieldError> {
        let piece = self.piece;
        stamp(&mut self.field, &piece, true)?;
        debug!(
            shape = piece.shape.as_str(),
            rotation = piece.rotation.index(),
            x = piece.x,
            y = piece.y,
            "piece locked"
        );

        let clear = clear_lines(&mut self.field, &mut self.progress, piece.y)?;
        if clear.cleared() > 0 {
            self.progress.add_score(clear.score_delta);
            info!(
                cleared = clear.cleared(),
                score_delta = clear.score_delta,
                lines = self.progress.lines(),
                score = self.progress.score(),
                "lines cleared"
            );
        }
        if clear.level_up {
            info!(level = self.progress.level(), "level up");
        }
        Ok(clear)
    }

    /// Make `piece` current and decide between `Falling` and `GameOver`
    fn check_spawn(&mut self, piece: Piece) -> bool {
        self.piece = piece;
        if collides(&self.field, &piece) {
            self.phase = Phase::GameOver;
            info!(
                score = self.progress.score(),
                lines = self.progress.lines(),
                level = self.progress.level(),
                pieces = self.pieces_spawned,
                "game over"
            );
            return false;
        }

        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.phase = Phase::Falling;
        debug!(shape = piece.shape.as_str(), "piece spawned");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ShapeKind, FIELD_HEIGHT};

    fn game_with_piece(field: Field, piece: Piece) -> Game {
        let mut game = Game::with_field(1, field);
        game.piece = piece;
        game
    }

    #[test]
    fn test_new_game_is_falling() {
        let game = Game::new(12345);
        assert_eq!(game.phase(), Phase::Falling);
        assert_eq!(game.pieces_spawned(), 1);
        assert!(game.field().is_empty());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_step_sequence_through_lock() {
        let piece = Piece {
            y: FIELD_HEIGHT - 4,
            ..Piece::spawn(ShapeKind::O)
        };
        let mut game = game_with_piece(Field::new(), piece);

        assert_eq!(game.step().unwrap(), Step::Blocked);
        assert_eq!(game.phase(), Phase::Locking);
        assert!(matches!(game.step().unwrap(), Step::Locked(_)));
        assert_eq!(game.phase(), Phase::SpawnCheck);
        assert_eq!(game.field().occupied_count(), 4);
        assert!(matches!(game.step().unwrap(), Step::Spawned(_)));
        assert_eq!(game.phase(), Phase::Falling);
    }

    #[test]
    fn test_intents_ignored_while_locking() {
        let piece = Piece {
            y: FIELD_HEIGHT - 4,
            ..Piece::spawn(ShapeKind::O)
        };
        let mut game = game_with_piece(Field::new(), piece);
        game.step().unwrap();
        assert!(!game.apply_intent(Intent::MoveLeft));
        assert_eq!(game.piece(), piece);
    }

    #[test]
    fn test_quit_sets_flag_without_moving() {
        let mut game = Game::new(3);
        let before = game.piece();
        assert!(!game.apply_intent(Intent::Quit));
        assert!(game.quit_requested());
        assert_eq!(game.piece(), before);
    }

    #[test]
    fn test_blocked_rotation_is_rejected() {
        // Horizontal I on the floor; a locked cell above its middle leaves no
        // room for the vertical orientation.
        let field = Field::from_rows(&[".....#....", "##........"]).unwrap();
        let piece = Piece {
            y: FIELD_HEIGHT - 3,
            ..Piece::spawn(ShapeKind::I)
        };
        let mut game = game_with_piece(field, piece);

        assert!(!game.apply_intent(Intent::RotateCw));
        assert_eq!(game.piece(), piece);
        assert!(!game.apply_intent(Intent::RotateCcw));
        assert_eq!(game.piece(), piece);
        assert_eq!(*game.field(), field);
    }

    #[test]
    fn test_lock_above_field_ends_game() {
        // Column 0 stacked up to row 2; a vertical I against the wall locks
        // with two of its cells still above the field.
        let mut field = Field::new();
        for y in 2..FIELD_HEIGHT {
            field.set(0, y, true).unwrap();
        }
        let piece = Piece {
            rotation: crate::types::Rotation::R1,
            x: -2,
            y: -2,
            ..Piece::spawn(ShapeKind::I)
        };
        let mut game = game_with_piece(field, piece);
        let filled = field.occupied_count();

        let outcome = game.tick().unwrap();

        assert!(matches!(outcome, TickOutcome::GameOver(ref c) if c.cleared() == 0));
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.field().occupied_count(), filled + 2);
        assert_eq!(game.tick().unwrap(), TickOutcome::Finished);
    }

    #[test]
    fn test_tick_after_game_over_is_finished() {
        let field = Field::from_rows(&["##########"; 20]).unwrap();
        let mut game = Game::with_field(1, field);
        assert!(game.game_over());
        assert_eq!(game.tick().unwrap(), TickOutcome::Finished);
        assert_eq!(game.step().unwrap(), Step::Idle);
    }
}
