//! Game session - the state machine tying board, pieces, bag and scoring together.
//!
//! A session is either [`Status::Idle`] (start prompt, last score frozen) or
//! [`Status::Playing`]. Input never mutates the board directly: gameplay
//! commands are queued and [`GameSession::tick`] drains at most one per tick,
//! before gravity runs. All board mutation is therefore serialized through the
//! tick.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info};

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::dirty::DirtyFlags;
use crate::pieces::Piece;
use crate::placement::{collides, is_unoccupied, place_piece};
use crate::rng::PieceBag;
use crate::scoring::{drop_interval_ms, line_clear_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{Action, Command, LOCK_POINTS, MAX_TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Playing,
}

/// Why the last game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// A fresh piece collided at its spawn position
    TopOut,
    /// The player aborted
    Escape,
}

/// Emitted every time a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// The piece as it was written into the board
    pub piece: Piece,
    pub lines_cleared: u32,
    /// Lock bonus plus line-clear points
    pub points: u32,
    pub topped_out: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    bag: PieceBag,
    status: Status,
    end_reason: Option<EndReason>,
    current: Option<Piece>,
    next: Option<Piece>,
    score: u32,
    /// Lags `score` by at most one point per tick while playing.
    displayed_score: u32,
    rows: u32,
    drop_timer: Duration,
    drop_interval: Duration,
    actions: VecDeque<Action>,
    last_event: Option<LockEvent>,
    dirty: DirtyFlags,
    /// Board revision the court flag last accounted for.
    board_revision: u64,
}

impl GameSession {
    /// Create an idle session with the default configuration
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// Create an idle session with a custom configuration
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let board = Board::with_size(config.width, config.height);
        let board_revision = board.revision();
        Self {
            config,
            board,
            bag: PieceBag::new(seed),
            status: Status::Idle,
            end_reason: None,
            current: None,
            next: None,
            score: 0,
            displayed_score: 0,
            rows: 0,
            drop_timer: Duration::ZERO,
            drop_interval: Duration::from_millis(drop_interval_ms(0, &config.speed) as u64),
            actions: VecDeque::new(),
            last_event: None,
            dirty: DirtyFlags::all(),
            board_revision,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn displayed_score(&self) -> u32 {
        self.displayed_score
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    pub fn drop_timer(&self) -> Duration {
        self.drop_timer
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup (puzzles, tests).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the falling piece, e.g. to set up a scenario.
    pub fn set_current(&mut self, piece: Piece) {
        self.current = Some(piece);
        self.dirty.mark_court();
    }

    pub fn set_next(&mut self, piece: Piece) {
        self.next = Some(piece);
        self.dirty.mark_next();
    }

    /// Number of queued actions not yet applied
    pub fn pending_actions(&self) -> usize {
        self.actions.len()
    }

    /// Handle one input command.
    ///
    /// Returns false when the command does not apply in the current state.
    pub fn handle(&mut self, command: Command) -> bool {
        match (self.status, command) {
            (Status::Idle, Command::Start) => {
                self.start();
                true
            }
            (Status::Playing, Command::Escape) => {
                self.end(EndReason::Escape);
                true
            }
            (Status::Playing, _) => match command.action() {
                Some(action) => {
                    self.actions.push_back(action);
                    true
                }
                None => false,
            },
            (Status::Idle, _) => false,
        }
    }

    /// Start a new game: fresh board, score, rows and timer, two fresh pieces.
    pub fn start(&mut self) {
        self.board.clear_all_cells();
        self.actions.clear();
        self.drop_timer = Duration::ZERO;
        self.score = 0;
        self.displayed_score = 0;
        self.set_rows(0);
        self.last_event = None;
        self.end_reason = None;
        self.current = Some(self.bag.spawn(self.config.width));
        self.next = Some(self.bag.spawn(self.config.width));
        self.status = Status::Playing;
        self.dirty.mark_all();

        info!(
            width = self.config.width,
            height = self.config.height,
            seed = self.bag.seed(),
            "game started"
        );
    }

    fn end(&mut self, reason: EndReason) {
        self.status = Status::Idle;
        self.end_reason = Some(reason);
        self.actions.clear();
        self.displayed_score = self.score;
        self.dirty.mark_score();
        self.dirty.mark_court();

        info!(?reason, score = self.score, rows = self.rows, "game over");
    }

    fn set_rows(&mut self, rows: u32) {
        self.rows = rows;
        self.drop_interval =
            Duration::from_millis(drop_interval_ms(rows, &self.config.speed) as u64);
        self.dirty.mark_rows();
    }

    /// Advance the session by `elapsed` (clamped to one second).
    ///
    /// In order: the displayed score counts up by one point, one queued action
    /// is applied, and gravity drops the piece once the accumulated time
    /// exceeds the drop interval. Returns true if gravity fired.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.is_playing() {
            return false;
        }

        let elapsed = elapsed.min(Duration::from_millis(MAX_TICK_MS as u64));

        if self.displayed_score < self.score {
            self.displayed_score += 1;
            self.dirty.mark_score();
        }

        if let Some(action) = self.actions.pop_front() {
            self.apply_action(action);
        }

        // The queued action may have topped out.
        if !self.is_playing() {
            return false;
        }

        self.drop_timer += elapsed;
        if self.drop_timer > self.drop_interval {
            self.drop_timer -= self.drop_interval;
            self.drop_piece();
            return true;
        }

        false
    }

    /// Apply an action immediately, bypassing the queue.
    ///
    /// Returns true if the piece changed (moved, rotated, or locked).
    pub fn apply_action(&mut self, action: Action) -> bool {
        if !self.is_playing() {
            return false;
        }
        match action {
            Action::Left => self.try_move(-1, 0),
            Action::Right => self.try_move(1, 0),
            Action::Rotate => self.try_rotate(),
            Action::Drop => {
                self.drop_piece();
                true
            }
        }
    }

    /// Try to move the current piece; rejected moves change nothing.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(current) = self.current else {
            return false;
        };

        let moved = current.shifted(dx, dy);
        if is_unoccupied(&self.board, moved.kind, moved.x, moved.y, moved.rotation) {
            self.current = Some(moved);
            self.dirty.mark_court();
            return true;
        }

        false
    }

    /// Try to advance the current piece's orientation, without kicks.
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };

        let rotated = current.rotated();
        if is_unoccupied(
            &self.board,
            rotated.kind,
            rotated.x,
            rotated.y,
            rotated.rotation,
        ) {
            self.current = Some(rotated);
            self.dirty.mark_court();
            return true;
        }

        false
    }

    /// Move the current piece down one row, locking it if it is blocked.
    pub fn drop_piece(&mut self) {
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
    }

    /// Lock the current piece, clear rows, promote the next piece and check
    /// for top-out.
    fn lock_piece(&mut self) {
        let Some(piece) = self.current else {
            return;
        };

        self.score = self.score.saturating_add(LOCK_POINTS);
        place_piece(&mut self.board, &piece);

        let lines_cleared = self.board.remove_complete_rows();
        let clear_points = line_clear_score(lines_cleared);
        if lines_cleared > 0 {
            self.set_rows(self.rows + lines_cleared);
            self.score = self.score.saturating_add(clear_points);
            debug!(
                lines_cleared,
                points = clear_points,
                rows = self.rows,
                interval_ms = self.drop_interval.as_millis() as u64,
                "rows cleared"
            );
        }

        self.current = self.next.take();
        self.next = Some(self.bag.spawn(self.config.width));
        self.dirty.mark_next();
        self.dirty.mark_court();
        self.actions.clear();

        let topped_out = self
            .current
            .map(|p| collides(&self.board, &p))
            .unwrap_or(true);

        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "piece locked");

        self.last_event = Some(LockEvent {
            piece,
            lines_cleared,
            points: LOCK_POINTS.saturating_add(clear_points),
            topped_out,
        });

        if topped_out {
            self.end(EndReason::TopOut);
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    fn sync_board_revision(&mut self) {
        let revision = self.board.revision();
        if revision != self.board_revision {
            self.board_revision = revision;
            self.dirty.mark_court();
        }
    }

    /// Regions changed since the renderer last consumed them
    pub fn dirty(&mut self) -> DirtyFlags {
        self.sync_board_revision();
        self.dirty
    }

    /// Return the dirty regions and clear them
    pub fn take_dirty(&mut self) -> DirtyFlags {
        self.sync_board_revision();
        self.dirty.take()
    }

    /// Mark every region dirty (e.g. after a terminal resize)
    pub fn mark_all_dirty(&mut self) {
        self.dirty.mark_all();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.current = self.current.map(PieceSnapshot::from);
        out.next = self.next.map(PieceSnapshot::from);
        out.score = self.score;
        out.displayed_score = self.displayed_score;
        out.rows = self.rows;
        out.playing = self.is_playing();
        out.end_reason = self.end_reason;
        out.drop_interval_ms = self.drop_interval.as_millis() as u32;
        out.preview_size = self.config.preview_size;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
