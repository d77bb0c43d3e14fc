//! Integration tests for the game session: lifecycle, locking, scoring,
//! speed-up and end conditions.

use std::time::Duration;

use blocktris::core::{EndReason, GameConfig, GameSession, Piece, SpeedConfig, Status};
use blocktris::types::{Command, PieceKind, Rotation};

fn started(seed: u64) -> GameSession {
    let mut game = GameSession::new(seed);
    assert!(game.handle(Command::Start));
    game
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameSession::new(12345);
    assert_eq!(game.status(), Status::Idle);
    assert!(game.current().is_none());

    // Nothing but Start is accepted while idle.
    assert!(!game.handle(Command::Left));
    assert!(!game.handle(Command::Escape));

    assert!(game.handle(Command::Start));
    assert!(game.is_playing());
    assert!(game.current().is_some());
    assert!(game.next().is_some());
    assert_eq!(game.score(), 0);
    assert_eq!(game.rows(), 0);
    assert_eq!(game.drop_interval(), Duration::from_millis(600));

    // Start is ignored while playing.
    assert!(!game.handle(Command::Start));
}

#[test]
fn test_o_piece_drops_to_floor_and_locks() {
    let mut game = started(1);
    game.set_current(Piece::new(PieceKind::O, 4, 0));

    let mut lock = None;
    for _ in 0..40 {
        game.handle(Command::Drop);
        game.tick(Duration::ZERO);
        lock = game.take_last_event();
        if lock.is_some() {
            break;
        }
    }

    let lock = lock.expect("piece should lock");
    assert_eq!(lock.piece.y, 18);
    assert_eq!(lock.lines_cleared, 0);
    assert!(!lock.topped_out);

    let board = game.board();
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(board.get_cell(x, y), Some(PieceKind::O), "({}, {})", x, y);
    }
    assert_eq!(board.filled_count(), 4);
    assert_eq!(game.score(), 10);
    assert!(game.is_playing());
}

#[test]
fn test_three_row_clear_scores_and_speeds_up() {
    let mut game = started(9);
    {
        let board = game.board_mut();
        for y in 17..20 {
            for x in 1..10 {
                board.set_cell(x, y, Some(PieceKind::Z));
            }
        }
    }

    // Vertical I filling column 0 of rows 16..=19.
    let mut piece = Piece::new(PieceKind::I, -2, 16);
    piece.rotation = Rotation::Right;
    game.set_current(piece);
    game.drop_piece();

    let lock = game.take_last_event().expect("piece should lock");
    assert_eq!(lock.lines_cleared, 3);
    assert_eq!(lock.points, 410);
    assert_eq!(game.score(), 410);
    assert_eq!(game.rows(), 3);
    assert_eq!(game.drop_interval(), Duration::from_millis(585));

    // The I cell from row 16 is all that remains, on the floor.
    assert_eq!(game.board().get_cell(0, 19), Some(PieceKind::I));
    assert_eq!(game.board().filled_count(), 1);
}

#[test]
fn test_displayed_score_counts_up_one_per_tick() {
    let mut game = started(3);
    game.set_current(Piece::new(PieceKind::O, 0, 18));
    game.drop_piece();
    assert_eq!(game.score(), 10);
    assert_eq!(game.displayed_score(), 0);

    for expected in 1..=10 {
        game.tick(Duration::ZERO);
        assert_eq!(game.displayed_score(), expected);
    }
    game.tick(Duration::ZERO);
    assert_eq!(game.displayed_score(), 10);
}

#[test]
fn test_queued_actions_apply_one_per_tick() {
    let mut game = started(4);
    game.set_current(Piece::new(PieceKind::O, 4, 0));

    game.handle(Command::Left);
    game.handle(Command::Left);
    game.handle(Command::Right);
    assert_eq!(game.pending_actions(), 3);

    game.tick(Duration::ZERO);
    assert_eq!(game.current().map(|p| p.x), Some(3));
    game.tick(Duration::ZERO);
    assert_eq!(game.current().map(|p| p.x), Some(2));
    game.tick(Duration::ZERO);
    assert_eq!(game.current().map(|p| p.x), Some(3));
    assert_eq!(game.pending_actions(), 0);
}

#[test]
fn test_gravity_uses_accumulated_time() {
    let mut game = started(5);
    game.set_current(Piece::new(PieceKind::O, 4, 0));

    // Exactly the interval does not fire; gravity needs strictly more.
    assert!(!game.tick(Duration::from_millis(600)));
    assert!(game.tick(Duration::from_millis(1)));
    assert_eq!(game.current().map(|p| p.y), Some(1));
    assert_eq!(game.drop_timer(), Duration::from_millis(1));
}

#[test]
fn test_large_delta_is_clamped() {
    let mut game = started(6);
    game.set_current(Piece::new(PieceKind::O, 4, 0));

    assert!(game.tick(Duration::from_secs(30)));
    assert_eq!(game.current().map(|p| p.y), Some(1));
    assert_eq!(game.drop_timer(), Duration::from_millis(400));
}

#[test]
fn test_escape_ends_game_and_freezes_state() {
    let mut game = started(7);
    game.handle(Command::Left);

    assert!(game.handle(Command::Escape));
    assert_eq!(game.status(), Status::Idle);
    assert_eq!(game.end_reason(), Some(EndReason::Escape));
    assert_eq!(game.pending_actions(), 0);

    let before = game.current();
    assert!(!game.tick(Duration::from_secs(1)));
    assert_eq!(game.current(), before);
    assert!(!game.handle(Command::Drop));

    // A new game can start from the ended state.
    assert!(game.handle(Command::Start));
    assert!(game.is_playing());
    assert_eq!(game.end_reason(), None);
}

#[test]
fn test_top_out_when_next_piece_collides() {
    let mut game = started(8);
    {
        let board = game.board_mut();
        for y in 1..20 {
            for x in 0..9 {
                board.set_cell(x, y, Some(PieceKind::T));
            }
        }
    }
    game.set_current(Piece::new(PieceKind::O, 0, 0));
    game.drop_piece();

    let lock = game.take_last_event().expect("piece should lock");
    assert!(lock.topped_out);
    assert_eq!(game.status(), Status::Idle);
    assert_eq!(game.end_reason(), Some(EndReason::TopOut));
    assert_eq!(game.displayed_score(), game.score());
}

#[test]
fn test_drop_interval_floor() {
    let speed = SpeedConfig::default();
    assert_eq!(blocktris::core::drop_interval_ms(0, &speed), 600);
    assert_eq!(blocktris::core::drop_interval_ms(10, &speed), 550);
    assert_eq!(blocktris::core::drop_interval_ms(100, &speed), 100);
    assert_eq!(blocktris::core::drop_interval_ms(1000, &speed), 100);
}

#[test]
fn test_drop_interval_stops_at_floor_during_play() {
    let config = GameConfig {
        width: 4,
        height: 8,
        speed: SpeedConfig {
            start_ms: 110,
            decrement_ms: 5,
            min_ms: 100,
        },
        ..GameConfig::default()
    };
    let mut game = GameSession::with_config(config, 21).unwrap();
    game.handle(Command::Start);
    assert_eq!(game.drop_interval(), Duration::from_millis(110));

    // A flat I fills the whole row of a 4-wide court.
    let mut intervals = Vec::new();
    for _ in 0..4 {
        game.set_current(Piece::new(PieceKind::I, 0, 6));
        game.drop_piece();
        let lock = game.take_last_event().expect("piece should lock");
        assert_eq!(lock.lines_cleared, 1);
        intervals.push(game.drop_interval().as_millis());
    }

    assert_eq!(intervals, vec![105, 100, 100, 100]);
    assert_eq!(game.rows(), 4);
    assert!(game.is_playing());
}

#[test]
fn test_custom_config_board() {
    let config = GameConfig::from_toml_str(
        r#"
        width = 8
        height = 12

        [speed]
        start_ms = 300
        "#,
    )
    .unwrap();
    assert_eq!(config.speed.min_ms, 100);

    let mut game = GameSession::with_config(config, 11).unwrap();
    game.handle(Command::Start);
    assert_eq!(game.board().width(), 8);
    assert_eq!(game.board().height(), 12);
    assert_eq!(game.drop_interval(), Duration::from_millis(300));
}

#[test]
fn test_invalid_config_rejected() {
    let config = GameConfig {
        width: 2,
        ..GameConfig::default()
    };
    assert!(GameSession::with_config(config, 1).is_err());
}

#[test]
fn test_same_seed_same_game() {
    let mut a = started(42);
    let mut b = started(42);
    for i in 0..500 {
        let cmd = match i % 4 {
            0 => Command::Left,
            1 => Command::Rotate,
            2 => Command::Right,
            _ => Command::Drop,
        };
        a.handle(cmd);
        b.handle(cmd);
        a.tick(Duration::from_millis(16));
        b.tick(Duration::from_millis(16));
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
