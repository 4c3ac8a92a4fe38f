//! GameView: maps an [`EngineSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//! Row 0 of the grid is drawn at the bottom of the frame.

use crate::engine::EngineSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Pos, TokenKind};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Front-end state drawn on top of the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay<'a> {
    pub cursor: Option<Pos>,
    pub hint: Option<(Pos, Pos)>,
    pub message: Option<&'a str>,
}

/// A lightweight terminal renderer for the token grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 leaves room for a centred letter and compensates glyph aspect ratio.
        Self {
            cell_w: 3,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &EngineSnapshot,
        overlay: &Overlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let columns = snap.grid.columns() as u16;
        let rows = snap.grid.rows() as u16;
        let frame_w = columns * self.cell_w + 2;
        let frame_h = rows * self.cell_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w + PANEL_WIDTH) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for pos in snap.grid.positions() {
            let mut style = match snap.grid.kind_at(pos) {
                Some(kind) => CellStyle {
                    bold: true,
                    ..CellStyle::plain(Rgb::new(20, 20, 20), kind_color(kind))
                },
                None => CellStyle {
                    dim: true,
                    ..CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG)
                },
            };
            let mut ch = snap.grid.kind_at(pos).map_or('·', |k| k.letter());

            if snap.is_flashing(pos) {
                style = CellStyle::plain(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255));
                ch = '*';
            }
            if overlay.hint.is_some_and(|(a, b)| a == pos || b == pos) {
                style.fg = Rgb::new(255, 255, 255);
                style.dim = false;
            }
            if snap.selected == Some(pos) {
                style.bg = Rgb::new(255, 255, 255);
                style.fg = Rgb::new(0, 0, 0);
            }
            if overlay.cursor == Some(pos) {
                style.reverse = true;
            }

            self.draw_cell(fb, start_x, start_y, rows, pos, ch, style);
        }

        self.draw_side_panel(fb, snap, overlay, viewport, start_x + frame_w + 2, start_y);

        if let Some(message) = overlay.message {
            let y = start_y.saturating_add(frame_h);
            let style = CellStyle {
                bold: true,
                ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
            };
            fb.put_str(start_x, y, message, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &EngineSnapshot,
        overlay: &Overlay<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    /// Top-left framebuffer coordinate of `pos` for a grid of `rows` rows.
    pub fn cell_origin(&self, start_x: u16, start_y: u16, rows: u16, pos: Pos) -> (u16, u16) {
        let screen_row = rows.saturating_sub(1).saturating_sub(pos.row as u16);
        (
            start_x + 1 + pos.col as u16 * self.cell_w,
            start_y + 1 + screen_row * self.cell_h,
        )
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        rows: u16,
        pos: Pos,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, rows, pos);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, ch, style);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

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

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &EngineSnapshot,
        overlay: &Overlay<'_>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(PANEL_WIDTH) > viewport.width {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("MOVES", snap.moves),
            ("LAST", snap.last_gain),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        if let Some((a, b)) = overlay.hint {
            fb.put_str(panel_x, y, "HINT", label);
            let x = fb.put_str(panel_x, y + 1, &a.to_string(), value);
            fb.put_str(x, y + 1, &format!("-{b}"), value);
            y = y.saturating_add(3);
        }

        if snap.busy || !snap.flash.is_empty() {
            fb.put_str(panel_x, y, "RESOLVING", CellStyle { dim: true, ..value });
        }
    }
}

const PANEL_WIDTH: u16 = 14;

fn kind_color(kind: TokenKind) -> Rgb {
    match kind {
        TokenKind::Cat => Rgb::new(240, 180, 80),
        TokenKind::Dog => Rgb::new(170, 120, 80),
        TokenKind::Monkey => Rgb::new(200, 120, 220),
        TokenKind::Panda => Rgb::new(230, 230, 230),
        TokenKind::Rabbit => Rgb::new(240, 140, 170),
        TokenKind::Fox => Rgb::new(230, 100, 50),
        TokenKind::Owl => Rgb::new(100, 180, 220),
        TokenKind::Bear => Rgb::new(120, 200, 120),
    }
}
