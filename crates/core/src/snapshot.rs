//! Read-only copies of session state for renderers.

use crate::pieces::{piece_type, Piece};
use crate::session::EndReason;
use crate::types::{Cell, PieceKind, Rgb, Rotation, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub size: u8,
    pub color: Rgb,
    pub color2: Rgb,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        let ty = piece_type(value.kind);
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            size: ty.size,
            color: ty.color,
            color2: ty.color2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major board cells
    pub cells: Vec<Cell>,
    pub current: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub score: u32,
    pub displayed_score: u32,
    pub rows: u32,
    pub playing: bool,
    pub end_reason: Option<EndReason>,
    pub drop_interval_ms: u32,
    pub preview_size: u8,
}

impl GameSnapshot {
    /// Cell at (x, y); `None` when empty or out of range
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![None; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
            current: None,
            next: None,
            score: 0,
            displayed_score: 0,
            rows: 0,
            playing: false,
            end_reason: None,
            drop_interval_ms: 0,
            preview_size: PREVIEW_SIZE,
        }
    }
}
