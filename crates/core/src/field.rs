//! Field module - the bit-packed playing field
//!
//! The field is a 10x20 grid of occupied/empty cells packed into bytes.
//! Cell (x, y) lives at bit index `y * WIDTH + x`: byte `index / 8`, bit `index % 8`.
//! Coordinates: x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Row 0 is the top of the field, row 19 is the floor.

use std::fmt;

use thiserror::Error;

use crate::types::{FIELD_HEIGHT, FIELD_WIDTH};

/// Number of cells on the field
const FIELD_CELLS: usize = (FIELD_WIDTH as usize) * (FIELD_HEIGHT as usize);

/// Bytes needed to store every cell, rounded up to whole bytes
const FIELD_BYTES: usize = FIELD_CELLS / 8 + if FIELD_CELLS % 8 != 0 { 1 } else { 0 };

/// Errors raised by field access.
///
/// Only reachable through a broken coordinate mapping: gameplay never
/// addresses cells outside the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("cell ({x}, {y}) is outside the field")]
    OutOfBounds { x: i8, y: i8 },
}

/// The playing field - one bit per cell
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    bits: [u8; FIELD_BYTES],
}

impl Field {
    /// Storage size in bytes
    pub const BYTES: usize = FIELD_BYTES;

    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            bits: [0; Self::BYTES],
        }
    }

    /// Bit index of (x, y), or an error when outside the field
    #[inline(always)]
    fn bit_index(x: i8, y: i8) -> Result<usize, FieldError> {
        if Self::in_bounds(x, y) {
            Ok((y as usize) * (FIELD_WIDTH as usize) + (x as usize))
        } else {
            Err(FieldError::OutOfBounds { x, y })
        }
    }

    /// Whether (x, y) addresses a cell of the field
    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        (0..FIELD_WIDTH).contains(&x) && (0..FIELD_HEIGHT).contains(&y)
    }

    pub fn width(&self) -> i8 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> i8 {
        FIELD_HEIGHT
    }

    /// Whether cell (x, y) is occupied
    pub fn get(&self, x: i8, y: i8) -> Result<bool, FieldError> {
        let bit = Self::bit_index(x, y)?;
        Ok(self.bits[bit / 8] & (1 << (bit % 8)) != 0)
    }

    /// Set or clear cell (x, y)
    pub fn set(&mut self, x: i8, y: i8, occupied: bool) -> Result<(), FieldError> {
        let bit = Self::bit_index(x, y)?;
        let mask = 1 << (bit % 8);
        if occupied {
            self.bits[bit / 8] |= mask;
        } else {
            self.bits[bit / 8] &= !mask;
        }
        Ok(())
    }

    /// Whether every cell of row y is occupied.
    /// Rows outside the field are never full.
    pub fn is_row_full(&self, y: i8) -> bool {
        (0..FIELD_WIDTH).all(|x| self.get(x, y).unwrap_or(false))
    }

    /// Whether row y has no occupied cell
    pub fn is_row_empty(&self, y: i8) -> bool {
        (0..FIELD_WIDTH).all(|x| !self.get(x, y).unwrap_or(false))
    }

    /// Overwrite row `dst` with row `src`, cell by cell.
    ///
    /// A `src` outside the field reads as an empty row; `dst` must be inside.
    /// Returns the number of occupied cells copied.
    pub fn copy_row(&mut self, dst: i8, src: i8) -> Result<u8, FieldError> {
        let mut copied = 0;
        for x in 0..FIELD_WIDTH {
            let occupied = self.get(x, src).unwrap_or(false);
            self.set(x, dst, occupied)?;
            copied += u8::from(occupied);
        }
        Ok(copied)
    }

    /// Mark every cell of row y unoccupied
    pub fn clear_row(&mut self, y: i8) -> Result<(), FieldError> {
        for x in 0..FIELD_WIDTH {
            self.set(x, y, false)?;
        }
        Ok(())
    }

    /// Remove row y and shift every row above it down by one.
    /// Row 0 becomes empty.
    pub fn collapse_row(&mut self, y: i8) -> Result<(), FieldError> {
        Self::bit_index(0, y)?;
        for row in (1..=y).rev() {
            self.copy_row(row, row - 1)?;
        }
        self.clear_row(0)
    }

    /// Empty the whole field
    pub fn clear(&mut self) {
        self.bits = [0; Self::BYTES];
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Iterate occupied cells as (x, y), top row first
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..FIELD_HEIGHT).flat_map(move |y| {
            (0..FIELD_WIDTH).filter_map(move |x| {
                if self.get(x, y).unwrap_or(false) {
                    Some((x, y))
                } else {
                    None
                }
            })
        })
    }

    /// Build a field from text rows where `#` marks an occupied cell.
    ///
    /// Rows are aligned to the bottom of the field, so the last row given is
    /// the floor. Any other character is an empty cell.
    ///
    /// ```
    /// use tui_bitris_core::Field;
    ///
    /// let field = Field::from_rows(&["#.........", "##########"]).unwrap();
    /// assert!(field.is_row_full(19));
    /// assert!(field.get(0, 18).unwrap());
    /// assert!(!field.get(1, 18).unwrap());
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, FieldError> {
        let mut field = Self::new();
        let top = FIELD_HEIGHT as isize - rows.len() as isize;
        for (i, row) in rows.iter().enumerate() {
            let y = top + i as isize;
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    let (x, y) = (clamp_coord(x as isize), clamp_coord(y));
                    field.set(x, y, true)?;
                }
            }
        }
        Ok(field)
    }
}

/// Squash out-of-range text coordinates into something `set` will reject
fn clamp_coord(v: isize) -> i8 {
    v.clamp(i8::MIN as isize, i8::MAX as isize) as i8
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..FIELD_HEIGHT {
            for x in 0..FIELD_WIDTH {
                let ch = if self.get(x, y).unwrap_or(false) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            if y + 1 < FIELD_HEIGHT {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field(")?;
        writeln!(f, "{self}")?;
        write!(f, ")")
    }
}
