//! Placement and collision.
//!
//! [`for_each_cell`] is the single source of piece geometry: collision,
//! locking and rendering all go through it. [`is_occupied`] is the only
//! collision rule; there are no wall kicks and no soft bounds.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::pieces::{for_each_offset, piece_type, Piece};
use crate::types::{PieceKind, Rotation};

/// Visit the absolute board cells of `kind` at (x, y) in `rotation`.
///
/// Cells are visited row-major, most significant mask bit first. Coordinates
/// saturate at `i8::MAX`, which is off every board.
pub fn for_each_cell(
    kind: PieceKind,
    x: i8,
    y: i8,
    rotation: Rotation,
    mut visit: impl FnMut(i8, i8),
) {
    let mask = piece_type(kind).mask(rotation);
    for_each_offset(mask, |col, row| {
        visit(x.saturating_add(col), y.saturating_add(row))
    });
}

/// Absolute cells of a piece, in visit order
pub fn piece_cells(piece: &Piece) -> ArrayVec<(i8, i8), 4> {
    let mut cells = ArrayVec::new();
    for_each_cell(piece.kind, piece.x, piece.y, piece.rotation, |cx, cy| {
        let _ = cells.try_push((cx, cy));
    });
    cells
}

/// True if any cell of the piece is off the board or overlaps a filled cell.
pub fn is_occupied(board: &Board, kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> bool {
    let mut occupied = false;
    for_each_cell(kind, x, y, rotation, |cx, cy| {
        if board.is_out_of_bounds(cx, cy) || board.is_filled(cx, cy) {
            occupied = true;
        }
    });
    occupied
}

/// Negation of [`is_occupied`]
pub fn is_unoccupied(board: &Board, kind: PieceKind, x: i8, y: i8, rotation: Rotation) -> bool {
    !is_occupied(board, kind, x, y, rotation)
}

/// [`is_occupied`] for a [`Piece`]
pub fn collides(board: &Board, piece: &Piece) -> bool {
    is_occupied(board, piece.kind, piece.x, piece.y, piece.rotation)
}

/// Write every cell of the piece into the board.
///
/// Cells that fall outside the board are skipped.
pub fn place_piece(board: &mut Board, piece: &Piece) {
    for_each_cell(piece.kind, piece.x, piece.y, piece.rotation, |cx, cy| {
        board.set_cell(cx, cy, Some(piece.kind));
    });
}
