//! Render tests: locked cells, the falling piece and the side panel as seen
//! through the framebuffer.

use std::time::Duration;

use blocktris::core::{piece_type, GameSession, Piece};
use blocktris::term::{FrameBuffer, GameView, Viewport};
use blocktris::types::{Command, PieceKind};

const VIEW: Viewport = Viewport {
    width: 60,
    height: 24,
};

// A 10x20 court with 2x1 cells is 22x22 with its border, centered in 60x24.
const COURT_X: u16 = 20;
const COURT_Y: u16 = 2;

fn screen_pos(x: u16, y: u16) -> (u16, u16) {
    (COURT_X + x * 2, COURT_Y + y)
}

fn text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_locked_piece_uses_base_color() {
    let mut game = GameSession::new(12345);
    game.handle(Command::Start);
    game.set_current(Piece::new(PieceKind::O, 4, 18));
    game.drop_piece();

    let fb = GameView::default().render(&game.snapshot(), VIEW);
    let color = piece_type(PieceKind::O).color;

    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        let (sx, sy) = screen_pos(x, y);
        for dx in 0..2 {
            let cell = fb.get(sx + dx, sy).unwrap();
            assert_eq!(cell.ch, '█', "({}, {})", x, y);
            assert_eq!(cell.style.fg, color);
        }
    }
}

#[test]
fn test_falling_piece_uses_highlight_color() {
    let mut game = GameSession::new(1);
    game.handle(Command::Start);
    game.set_current(Piece::new(PieceKind::O, 0, 5));

    let fb = GameView::default().render(&game.snapshot(), VIEW);
    let (sx, sy) = screen_pos(0, 5);
    let cell = fb.get(sx, sy).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!(cell.style.fg, piece_type(PieceKind::O).color2);
}

#[test]
fn test_idle_screen_prompts_to_start() {
    let game = GameSession::new(1);
    let screen = text(&GameView::default().render(&game.snapshot(), VIEW));
    assert!(screen.contains("PRESS SPACE"));
    assert!(screen.contains("TO PLAY"));
    assert!(!screen.contains("GAME OVER"));
}

#[test]
fn test_escape_shows_game_over_and_final_score() {
    let mut game = GameSession::new(1);
    game.handle(Command::Start);
    game.set_current(Piece::new(PieceKind::O, 0, 18));
    game.drop_piece();
    game.handle(Command::Escape);

    let screen = text(&GameView::default().render(&game.snapshot(), VIEW));
    assert!(screen.contains("GAME OVER"));
    assert!(screen.contains("00010"));
}

#[test]
fn test_score_panel_counts_up() {
    let mut game = GameSession::new(1);
    game.handle(Command::Start);
    game.set_current(Piece::new(PieceKind::O, 0, 18));
    game.drop_piece();

    let view = GameView::default();
    assert!(text(&view.render(&game.snapshot(), VIEW)).contains("00000"));

    for _ in 0..3 {
        game.tick(Duration::ZERO);
    }
    assert!(text(&view.render(&game.snapshot(), VIEW)).contains("00003"));
}

#[test]
fn test_dirty_flags_drive_redraws() {
    let mut game = GameSession::new(1);
    game.handle(Command::Start);
    assert!(game.take_dirty().any());
    assert!(!game.take_dirty().any());

    // Moving the piece dirties only the court.
    game.set_current(Piece::new(PieceKind::O, 4, 0));
    game.take_dirty();
    game.handle(Command::Left);
    game.tick(Duration::ZERO);
    let dirty = game.take_dirty();
    assert!(dirty.court);
    assert!(!dirty.next);
    assert!(!dirty.rows);
}
