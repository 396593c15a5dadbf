//! Scoring module - line clears, lines/level progression and score deltas
//!
//! Classic Nintendo scoring: a clear of N simultaneous lines is worth
//! `SCORE_TABLE[N] * (level + 1)`, with the level taken after the new lines
//! are counted. The level is always `lines / 10`.

use arrayvec::ArrayVec;

use crate::catalog::{score_multiplier, WINDOW};
use crate::field::{Field, FieldError};
use crate::types::{FIELD_HEIGHT, LINES_PER_LEVEL};

/// Cumulative lines and score. The level is derived from the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Progress {
    lines: u32,
    score: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from known totals
    pub fn from_totals(lines: u32, score: u32) -> Self {
        Self { lines, score }
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        calculate_level(self.lines)
    }

    /// Count newly cleared lines
    fn add_lines(&mut self, cleared: u32) {
        self.lines = self.lines.saturating_add(cleared);
    }

    /// Add a score delta
    pub fn add_score(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }
}

/// Result of one line-clear pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Rows that were full when reached, top to bottom
    pub rows: ArrayVec<i8, 4>,
    /// Points earned by this clear
    pub score_delta: u32,
    /// Whether the clear moved progress to a new level
    pub level_up: bool,
}

impl LineClear {
    pub fn cleared(&self) -> usize {
        self.rows.len()
    }
}

/// Level for a cumulative line count
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Score for clearing `cleared` lines at `level`.
/// Returns 0 for 0 lines or more than 4.
pub fn calculate_line_score(cleared: usize, level: u32) -> u32 {
    score_multiplier(cleared).saturating_mul(level.saturating_add(1))
}

/// Clear full rows in the window `[scan_from_row, scan_from_row + 4)`.
///
/// Only the rows a locking piece can span are scanned, clipped to the field.
/// Rows are visited top to bottom; each full row is collapsed (rows above it
/// shift down one, row 0 empties) before the next row is tested, so the row
/// that moves into a cleared slot has already been looked at.
///
/// Updates `progress.lines` and returns the score delta; the caller adds it
/// to the score.
pub fn clear_lines(
    field: &mut Field,
    progress: &mut Progress,
    scan_from_row: i8,
) -> Result<LineClear, FieldError> {
    let start = scan_from_row.max(0);
    let end = scan_from_row.saturating_add(WINDOW).min(FIELD_HEIGHT);

    let mut clear = LineClear::default();
    for y in start..end {
        if field.is_row_full(y) {
            field.collapse_row(y)?;
            clear.rows.push(y);
        }
    }

    if clear.rows.is_empty() {
        return Ok(clear);
    }

    let level_before = progress.level();
    progress.add_lines(clear.rows.len() as u32);
    let level = progress.level();

    clear.level_up = level > level_before;
    clear.score_delta = calculate_line_score(clear.rows.len(), level);
    Ok(clear)
}
