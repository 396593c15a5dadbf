//! Piece module - the falling tetromino and its coordinate mapping

use arrayvec::ArrayVec;

use crate::catalog::{self, WINDOW, WINDOW_CELLS};
use crate::types::{Intent, Rotation, ShapeKind, SPAWN_X, SPAWN_Y};

/// Falling piece: shape, rotation and the field position of its 4x4 window.
///
/// Plain `Copy` data; candidate moves are built by copying and adjusting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: ShapeKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at the spawn origin, above the visible field
    pub fn spawn(shape: ShapeKind) -> Self {
        Self {
            shape,
            rotation: Rotation::R0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Mask of the current shape and rotation
    #[inline(always)]
    pub fn mask(&self) -> u16 {
        catalog::shape_encoding(self.shape, self.rotation)
    }

    /// Field coordinates of local cell `index`, or `None` when the piece does
    /// not occupy that cell.
    ///
    /// ```
    /// use tui_bitris_core::Piece;
    /// use tui_bitris_core::types::ShapeKind;
    ///
    /// let piece = Piece::spawn(ShapeKind::O);
    /// assert_eq!(piece.cell_coordinates(0), None);
    /// assert_eq!(piece.cell_coordinates(9), Some((4, 0)));
    /// ```
    #[inline(always)]
    pub fn cell_coordinates(&self, index: u8) -> Option<(i8, i8)> {
        if index >= WINDOW_CELLS || self.mask() & (1 << index) == 0 {
            return None;
        }
        let index = index as i8;
        Some((index % WINDOW + self.x, index / WINDOW + self.y))
    }

    /// Field coordinates of the four occupied cells, in local index order
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        (0..WINDOW_CELLS)
            .filter_map(|i| self.cell_coordinates(i))
            .collect()
    }

    /// Lowest occupied field row
    pub fn bottom(&self) -> i8 {
        self.y + catalog::vertical_extent(self.mask()) - 1
    }

    /// Candidate shifted by (dx, dy)
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Candidate one row lower
    pub fn dropped(self) -> Self {
        self.shifted(0, 1)
    }

    /// Candidate with the next rotation index
    pub fn rotated_cw(self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..self
        }
    }

    /// Candidate with the previous rotation index
    pub fn rotated_ccw(self) -> Self {
        Self {
            rotation: self.rotation.rotate_ccw(),
            ..self
        }
    }

    /// Candidate produced by a movement intent; `None` for intents that do
    /// not move the piece.
    pub fn with_intent(self, intent: Intent) -> Option<Self> {
        match intent {
            Intent::MoveLeft => Some(self.shifted(-1, 0)),
            Intent::MoveRight => Some(self.shifted(1, 0)),
            Intent::RotateCw => Some(self.rotated_cw()),
            Intent::RotateCcw => Some(self.rotated_ccw()),
            Intent::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_defaults() {
        let piece = Piece::spawn(ShapeKind::L);
        assert_eq!(piece.rotation, Rotation::R0);
        assert_eq!(piece.x, 3);
        assert_eq!(piece.y, -2);
    }

    #[test]
    fn test_cell_coordinates_follow_mask() {
        let piece = Piece {
            shape: ShapeKind::T,
            rotation: Rotation::R0,
            x: 2,
            y: 5,
        };
        // T r0 occupies local 9, 10, 11 and 14.
        assert_eq!(piece.cell_coordinates(9), Some((3, 7)));
        assert_eq!(piece.cell_coordinates(11), Some((5, 7)));
        assert_eq!(piece.cell_coordinates(14), Some((4, 8)));
        assert_eq!(piece.cell_coordinates(8), None);
        assert_eq!(piece.cell_coordinates(16), None);
    }

    #[test]
    fn test_cells_has_four_entries() {
        for shape in ShapeKind::ALL {
            let piece = Piece::spawn(shape);
            assert_eq!(piece.cells().len(), 4, "{shape:?}");
        }
    }

    #[test]
    fn test_bottom_row() {
        let piece = Piece::spawn(ShapeKind::I);
        assert_eq!(piece.bottom(), 0);
        assert_eq!(piece.rotated_cw().bottom(), 1);
        assert_eq!(Piece::spawn(ShapeKind::T).bottom(), 1);
    }

    #[test]
    fn test_candidates_leave_original_untouched() {
        let piece = Piece::spawn(ShapeKind::S);
        let left = piece.with_intent(Intent::MoveLeft).unwrap();
        assert_eq!(left.x, piece.x - 1);
        assert_eq!(piece.x, SPAWN_X);
        assert_eq!(piece.with_intent(Intent::Quit), None);
        assert_eq!(piece.rotated_cw().rotated_ccw(), piece);
    }
}
