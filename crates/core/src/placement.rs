//! Collision and placement - testing and writing a piece against the field
//!
//! Both operations walk the 16 local cells through
//! [`Piece::cell_coordinates`], so collision and stamping can never disagree
//! about where a piece is.

use crate::catalog::WINDOW_CELLS;
use crate::field::{Field, FieldError};
use crate::piece::Piece;
use crate::types::{FIELD_HEIGHT, FIELD_WIDTH};

/// Whether the piece overlaps a wall, the floor or an occupied cell.
///
/// Cells above the field (`y < 0`) are legal: that is the spawn area.
/// The field must not contain the piece itself.
pub fn collides(field: &Field, piece: &Piece) -> bool {
    (0..WINDOW_CELLS)
        .filter_map(|i| piece.cell_coordinates(i))
        .any(|(x, y)| {
            if x < 0 || x >= FIELD_WIDTH || y >= FIELD_HEIGHT {
                return true;
            }
            y >= 0 && field.get(x, y).unwrap_or(true)
        })
}

/// Write the piece's cells into the field as `occupied`.
///
/// Cells in the spawn area above the field are not stored and are skipped.
/// Any other cell outside the field is a contract violation.
pub fn stamp(field: &mut Field, piece: &Piece, occupied: bool) -> Result<(), FieldError> {
    for i in 0..WINDOW_CELLS {
        if let Some((x, y)) = piece.cell_coordinates(i) {
            if y < 0 {
                continue;
            }
            field.set(x, y, occupied)?;
        }
    }
    Ok(())
}

/// Remove the piece's cells from the field
pub fn erase(field: &mut Field, piece: &Piece) -> Result<(), FieldError> {
    stamp(field, piece, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rotation, ShapeKind};

    #[test]
    fn test_spawn_area_is_legal() {
        let field = Field::new();
        let piece = Piece {
            shape: ShapeKind::I,
            rotation: Rotation::R1,
            x: 0,
            y: -3,
        };
        assert!(!collides(&field, &piece));
    }

    #[test]
    fn test_floor_collision() {
        let field = Field::new();
        let piece = Piece {
            shape: ShapeKind::O,
            rotation: Rotation::R0,
            x: 0,
            y: 16,
        };
        // O occupies window rows 2-3, so y = 16 rests on the floor.
        assert!(!collides(&field, &piece));
        assert!(collides(&field, &piece.dropped()));
    }

    #[test]
    fn test_stamp_skips_spawn_area() {
        let mut field = Field::new();
        let piece = Piece {
            shape: ShapeKind::I,
            rotation: Rotation::R1,
            x: 0,
            y: -2,
        };
        stamp(&mut field, &piece, true).unwrap();
        assert_eq!(field.occupied_count(), 2);
        assert!(field.get(2, 0).unwrap());
        assert!(field.get(2, 1).unwrap());
    }

    #[test]
    fn test_stamp_out_of_bounds_is_error() {
        let mut field = Field::new();
        let piece = Piece {
            shape: ShapeKind::I,
            rotation: Rotation::R0,
            x: 8,
            y: 0,
        };
        assert!(matches!(
            stamp(&mut field, &piece, true),
            Err(FieldError::OutOfBounds { .. })
        ));
    }
}
