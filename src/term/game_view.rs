//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snapshot::{GameSnapshot, PieceView};
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, GamePhase, BOARD_HEIGHT, BOARD_WIDTH};

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

/// A lightweight terminal view of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells, with grid dots for the empty ones.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.board[y as usize][x as usize] {
                    Some(color) => self.draw_block(fb, start_x, start_y, x, y, color),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        // The falling piece, drawn over the board from its mask. Rows above
        // the top edge are simply not visible.
        if let Some(piece) = snap.current {
            self.draw_piece(fb, start_x, start_y, &piece);
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        match snap.phase {
            GamePhase::Ready => {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PRESS ENTER TO START"])
            }
            GamePhase::Paused => {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED"])
            }
            GamePhase::GameOver => {
                self.draw_overlay(
                    fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    &["GAME OVER", "", "PRESS ENTER"],
                );
                self.draw_overlay_score(fb, start_x, start_y, frame_w, frame_h, snap.score);
            }
            GamePhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(60, 60, 70), Rgb::new(0, 0, 0));
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        color: Color,
    ) {
        let style = CellStyle::new(color_rgb(color), Rgb::new(0, 0, 0)).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, piece: &PieceView) {
        for (r, c) in piece.mask.cells() {
            let x = piece.x + c as i8;
            let y = piece.y + r as i8;
            if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                self.draw_block(fb, start_x, start_y, x as u16, y as u16, piece.color);
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::default();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            self.draw_next_preview(fb, panel_x, y, &next);
        }
    }

    /// Small preview grid drawn straight from the next piece's mask.
    fn draw_next_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &PieceView) {
        let style = CellStyle::new(color_rgb(piece.color), Rgb::new(0, 0, 0)).bold();
        for (r, c) in piece.mask.cells() {
            let px = x + (c as u16) * self.cell_w;
            let py = y + r as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);

        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y.saturating_add(i as u16), text, style);
        }
    }

    /// Final score, centered on the blank middle line of the game-over
    /// overlay.
    fn draw_overlay_score(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        score: u32,
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();

        let mut digits: u16 = 1;
        let mut n = score / 10;
        while n > 0 {
            digits += 1;
            n /= 10;
        }

        let x = start_x.saturating_add(frame_w.saturating_sub(digits) / 2);
        let y = start_y.saturating_add(frame_h / 2).saturating_add(1);
        fb.put_u32(x, y, score, style);
    }
}

/// Palette for locked and falling blocks.
fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(0, 255, 255),
        Color::Blue => Rgb::new(0, 0, 255),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Yellow => Rgb::new(255, 255, 0),
        Color::Green => Rgb::new(0, 255, 0),
        Color::Purple => Rgb::new(128, 0, 128),
        Color::Red => Rgb::new(255, 0, 0),
    }
}
