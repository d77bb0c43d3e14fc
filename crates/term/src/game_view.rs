//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{for_each_cell, piece_type, GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::SCORE_DIGITS;

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

const COURT_BG: Rgb = Rgb::new(30, 30, 40);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the game.
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
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (snap.width as u16) * self.cell_w;
        let board_px_h = (snap.height as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_px_w,
            board_px_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), COURT_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for y in 0..snap.height as i8 {
            for x in 0..snap.width as i8 {
                match snap.cell(x, y) {
                    Some(kind) => {
                        let color = piece_type(kind).color;
                        self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '█', block(color));
                    }
                    None => {
                        let dot = CellStyle::new(Rgb::new(90, 90, 100), COURT_BG).dim();
                        self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '·', dot);
                    }
                }
            }
        }

        // Falling piece, only while playing.
        if snap.playing {
            if let Some(current) = snap.current {
                self.draw_piece(fb, start_x, start_y, snap, &current);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if !snap.playing {
            let mid_y = start_y.saturating_add(frame_h / 2);
            if snap.end_reason.is_some() {
                draw_centered(fb, start_x, frame_w, mid_y.saturating_sub(2), "GAME OVER");
            }
            draw_centered(fb, start_x, frame_w, mid_y, "PRESS SPACE");
            draw_centered(fb, start_x, frame_w, mid_y.saturating_add(1), "TO PLAY");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        snap: &GameSnapshot,
        piece: &PieceSnapshot,
    ) {
        let style = block(piece.color2).bold();
        for_each_cell(piece.kind, piece.x, piece.y, piece.rotation, |x, y| {
            if x >= 0 && x < snap.width as i8 && y >= 0 && y < snap.height as i8 {
                self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '█', style);
            }
        });
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

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);

        // Preview box, with the piece centered by its bounding size.
        let preview = snap.preview_size as u16;
        let box_w = preview * self.cell_w + 2;
        let box_h = preview * self.cell_h + 2;
        draw_border(fb, panel_x, y, box_w, box_h, value);
        if let Some(next) = snap.next {
            let padding = (snap.preview_size.saturating_sub(next.size) / 2) as i8;
            let style = block(next.color2);
            for_each_cell(next.kind, padding, padding, next.rotation, |cx, cy| {
                if cx >= 0 && cy >= 0 && (cx as u16) < preview && (cy as u16) < preview {
                    self.fill_cell_rect(fb, panel_x, y, cx as u16, cy as u16, '█', style);
                }
            });
        }
        y = y.saturating_add(box_h).saturating_add(1);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_padded_u32(panel_x, y, snap.displayed_score, SCORE_DIGITS, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ROWS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.rows, value);
    }
}

fn block(color: Rgb) -> CellStyle {
    CellStyle::new(color, COURT_BG)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

fn draw_centered(fb: &mut FrameBuffer, start_x: u16, frame_w: u16, y: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
    fb.put_str(x, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSession, Piece};
    use crate::types::{Command, PieceKind};

    fn frame_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn idle_shows_start_prompt() {
        let session = GameSession::new(1);
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(60, 24));
        let text = frame_text(&fb);
        assert!(text.contains("PRESS SPACE"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn playing_hides_prompt_and_shows_score() {
        let mut session = GameSession::new(1);
        session.handle(Command::Start);
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(60, 24));
        let text = frame_text(&fb);
        assert!(!text.contains("PRESS SPACE"));
        assert!(text.contains("SCORE"));
        assert!(text.contains("00000"));
        assert!(text.contains("ROWS"));
    }

    #[test]
    fn locked_cell_lands_at_expected_position() {
        let mut session = GameSession::new(1);
        session.handle(Command::Start);
        session.set_current(Piece::new(PieceKind::O, 0, 0));
        session.board_mut().set_cell(9, 19, Some(PieceKind::Z));

        let view = GameView::default();
        let viewport = Viewport::new(60, 24);
        let fb = view.render(&session.snapshot(), viewport);

        // Frame is 22x22 centered in 60x24: start (19, 1).
        let (sx, sy) = (19u16, 1u16);
        let cell = fb.get(sx + 1 + 9 * 2, sy + 1 + 19).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_type(PieceKind::Z).color);

        // The falling O uses its second color.
        let cell = fb.get(sx + 1, sy + 1).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, piece_type(PieceKind::O).color2);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let mut session = GameSession::new(1);
        session.handle(Command::Start);
        let fb = GameView::default().render(&session.snapshot(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
