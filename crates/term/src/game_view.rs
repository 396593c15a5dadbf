//! GameView: maps a core [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{shape_encoding, Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameConfig, Rotation, ShapeKind, FIELD_HEIGHT, FIELD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Vertical placement of the playing field in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    /// Print shape/rotation/base mask/position under the field.
    debug: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            debug: false,
        }
    }
}

/// Frame origin and size, in terminal cells
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    /// View configured from the runner's settings
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.cell_width, 1).with_debug(config.debug)
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let field_w = (FIELD_WIDTH as u16) * self.cell_w;
        let field_h = (FIELD_HEIGHT as u16) * self.cell_h;
        let w = field_w + 2;
        let h = field_h + 2;
        // Leave room for the debug line under the frame.
        let total_h = if self.debug { h + 1 } else { h };

        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, field_w, field_h, ' ', bg);
        self.draw_border(fb, frame);

        // Locked cells.
        for y in 0..FIELD_HEIGHT {
            for x in 0..FIELD_WIDTH {
                if snap.field.get(x, y).unwrap_or(false) {
                    self.draw_locked_cell(fb, frame, x as u16, y as u16);
                } else {
                    self.draw_empty_cell(fb, frame, x as u16, y as u16);
                }
            }
        }

        // Falling piece. Cells in the spawn area are not visible.
        if !snap.game_over() {
            for (x, y) in snap.piece.cells() {
                if x >= 0 && x < FIELD_WIDTH && y >= 0 && y < FIELD_HEIGHT {
                    self.draw_piece_cell(fb, frame, x as u16, y as u16, snap.piece.shape);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if self.debug {
            self.draw_debug_line(fb, snap, frame);
        }

        if snap.game_over() {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_locked_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        // The field stores occupancy only, so locked cells share one color.
        let style = CellStyle::new(Rgb::new(170, 170, 180), PLAY_BG);
        self.fill_cell_rect(fb, frame, x, y, '▓', style);
    }

    fn draw_piece_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, shape: ShapeKind) {
        let style = CellStyle::new(shape_color(shape), PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, v) in [
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("SCORE", snap.score),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "PIECE", label);
        fb.put_str(panel_x, y.saturating_add(1), snap.piece.shape.as_str(), value);
    }

    fn draw_debug_line(&self, fb: &mut FrameBuffer, snap: &Snapshot, frame: Frame) {
        let y = frame.y.saturating_add(frame.h);
        let style = CellStyle::new(Rgb::new(140, 140, 140), SCREEN_BG).dim();
        let piece = snap.piece;

        // Mask of the unrotated shape, as an id for the shape.
        let line = format!(
            "shape {}[{}] mask {} x {} y {}",
            piece.shape.index(),
            piece.rotation.index(),
            shape_encoding(piece.shape, Rotation::R0),
            piece.x,
            piece.y
        );
        fb.put_str(frame.x, y, &line, style);
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold());
    }
}

fn shape_color(shape: ShapeKind) -> Rgb {
    match shape {
        ShapeKind::T => Rgb::new(200, 120, 220),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::Z => Rgb::new(220, 80, 80),
        ShapeKind::O => Rgb::new(240, 220, 80),
        ShapeKind::S => Rgb::new(100, 220, 120),
        ShapeKind::L => Rgb::new(255, 165, 0),
        ShapeKind::I => Rgb::new(80, 220, 220),
    }
}
