//! Tetromino catalog - rotation masks for the seven shapes
//!
//! Each shape has four pre-authored 16-bit masks over a 4x4 window.
//! Bit `i` set means local cell `(i % 4, i / 4)` is occupied.
//! Rotation is a lookup into this table, never a computed transform.

use crate::types::{Rotation, ShapeKind, ROTATION_COUNT, SCORE_TABLE, SHAPE_COUNT};

/// Side length of the local piece window
pub const WINDOW: i8 = 4;

/// Number of cells in the local piece window
pub const WINDOW_CELLS: u8 = 16;

/// Rotation masks, indexed by `[shape id][rotation index]`
pub const SHAPES: [[u16; ROTATION_COUNT]; SHAPE_COUNT] = [
    [19968, 17984, 3648, 19520],  // T
    [36352, 25664, 3616, 17600],  // J
    [50688, 19584, 50688, 19584], // Z
    [26112, 26112, 26112, 26112], // O
    [27648, 35904, 27648, 35904], // S
    [11776, 17504, 3712, 50240],  // L
    [3840, 17476, 3840, 17476],   // I
];

/// Mask for a shape in a rotation
#[inline(always)]
pub fn shape_encoding(shape: ShapeKind, rotation: Rotation) -> u16 {
    SHAPES[shape.index()][rotation.index()]
}

/// Base score for `cleared` simultaneous lines, 0 beyond the table
pub fn score_multiplier(cleared: usize) -> u32 {
    SCORE_TABLE.get(cleared).copied().unwrap_or(0)
}

/// Number of occupied rows of the window, counted from the top of the window
/// to the lowest occupied row.
///
/// A piece with origin `y` rests on the floor when `y + extent == FIELD_HEIGHT`.
pub fn vertical_extent(mask: u16) -> i8 {
    (0..WINDOW)
        .rev()
        .find(|row| mask & (0xF << (row * WINDOW)) != 0)
        .map_or(0, |row| row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mask_has_four_cells() {
        for shape in ShapeKind::ALL {
            for r in 0..ROTATION_COUNT {
                let mask = shape_encoding(shape, Rotation::from_index(r));
                assert_eq!(mask.count_ones(), 4, "{shape:?} r{r}");
            }
        }
    }

    #[test]
    fn t_spawn_mask_layout() {
        // .... / .... / .### / ..#.
        let mask = shape_encoding(ShapeKind::T, Rotation::R0);
        let cells: Vec<u8> = (0..WINDOW_CELLS).filter(|&i| mask & (1 << i) != 0).collect();
        assert_eq!(cells, vec![9, 10, 11, 14]);
    }

    #[test]
    fn vertical_i_occupies_column_two() {
        let mask = shape_encoding(ShapeKind::I, Rotation::R1);
        assert_eq!(mask, 0b0100_0100_0100_0100);
        assert_eq!(vertical_extent(mask), 4);
    }

    #[test]
    fn spawn_masks_sit_in_lower_rows() {
        for shape in ShapeKind::ALL {
            let mask = shape_encoding(shape, Rotation::R0);
            // Spawning at y = -2 puts the first occupied row at the top of the field.
            assert_eq!(mask & 0x00FF, 0, "{shape:?}");
        }
    }

    #[test]
    fn symmetric_shapes_repeat_masks() {
        for shape in [ShapeKind::Z, ShapeKind::S, ShapeKind::I] {
            assert_eq!(
                shape_encoding(shape, Rotation::R0),
                shape_encoding(shape, Rotation::R2)
            );
            assert_eq!(
                shape_encoding(shape, Rotation::R1),
                shape_encoding(shape, Rotation::R3)
            );
        }
    }

    #[test]
    fn score_multiplier_table() {
        assert_eq!(score_multiplier(0), 0);
        assert_eq!(score_multiplier(1), 40);
        assert_eq!(score_multiplier(4), 1200);
        assert_eq!(score_multiplier(5), 0);
    }
}
