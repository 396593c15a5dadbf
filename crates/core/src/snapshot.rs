use crate::field::{Field, FieldError};
use crate::game::Phase;
use crate::piece::Piece;
use crate::placement::stamp;

/// Read-only copy of everything a renderer needs for one frame.
///
/// The field holds locked cells only; the falling piece is reported
/// separately so it can be drawn on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub field: Field,
    pub piece: Piece,
    pub phase: Phase,
    pub lines: u32,
    pub score: u32,
    pub level: u32,
    pub seed: u32,
    pub pieces_spawned: u32,
}

impl Snapshot {
    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Field with the falling piece stamped on a copy.
    ///
    /// After game over the blocked spawn piece is left out.
    pub fn composite(&self) -> Result<Field, FieldError> {
        let mut field = self.field;
        if !self.game_over() {
            stamp(&mut field, &self.piece, true)?;
        }
        Ok(field)
    }
}
