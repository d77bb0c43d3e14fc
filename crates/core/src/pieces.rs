//! Piece catalog - the seven shapes, their rotation masks and colors.
//!
//! Each orientation is a 16-bit mask over a 4x4 window. Bit 15 is the top-left
//! cell, bits run row-major with the most significant bit first:
//!
//! ```text
//! bit 15 14 13 12   row 0
//!     11 10  9  8   row 1
//!      7  6  5  4   row 2
//!      3  2  1  0   row 3
//! ```
//!
//! Masks are ordered UP, RIGHT, DOWN, LEFT so that advancing the rotation
//! index rotates the piece clockwise.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rgb, Rotation};

/// Offset of a single cell inside the 4x4 window: (column, row)
pub type MinoOffset = (i8, i8);

/// Decoded cells of one orientation.
pub type PieceShape = ArrayVec<MinoOffset, 4>;

/// Static definition of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceType {
    pub kind: PieceKind,
    /// Bounding size in cells (2-4); bounds the random spawn column.
    pub size: u8,
    /// One mask per [`Rotation`], indexed by [`Rotation::index`].
    pub masks: [u16; 4],
    /// Color of locked cells
    pub color: Rgb,
    /// Color of the falling piece and the preview
    pub color2: Rgb,
}

impl PieceType {
    pub fn mask(&self, rotation: Rotation) -> u16 {
        self.masks[rotation.index()]
    }
}

/// The catalog, indexed by [`PieceKind::index`].
pub static CATALOG: [PieceType; 7] = [
    PieceType {
        kind: PieceKind::I,
        size: 4,
        masks: [0x0F00, 0x2222, 0x00F0, 0x4444],
        color: Rgb::new(40, 160, 170),
        color2: Rgb::new(80, 220, 220),
    },
    PieceType {
        kind: PieceKind::J,
        size: 3,
        masks: [0x44C0, 0x8E00, 0x6440, 0x0E20],
        color: Rgb::new(50, 80, 170),
        color2: Rgb::new(80, 120, 220),
    },
    PieceType {
        kind: PieceKind::L,
        size: 3,
        masks: [0x4460, 0x0E80, 0xC440, 0x2E00],
        color: Rgb::new(200, 120, 0),
        color2: Rgb::new(255, 165, 0),
    },
    PieceType {
        kind: PieceKind::O,
        size: 2,
        masks: [0xCC00, 0xCC00, 0xCC00, 0xCC00],
        color: Rgb::new(190, 170, 50),
        color2: Rgb::new(240, 220, 80),
    },
    PieceType {
        kind: PieceKind::S,
        size: 3,
        masks: [0x06C0, 0x8C40, 0x6C00, 0x4620],
        color: Rgb::new(60, 170, 80),
        color2: Rgb::new(100, 220, 120),
    },
    PieceType {
        kind: PieceKind::T,
        size: 3,
        masks: [0x0E40, 0x4C40, 0x4E00, 0x4640],
        color: Rgb::new(150, 80, 170),
        color2: Rgb::new(200, 120, 220),
    },
    PieceType {
        kind: PieceKind::Z,
        size: 3,
        masks: [0x0C60, 0x4C80, 0xC600, 0x2640],
        color: Rgb::new(170, 50, 50),
        color2: Rgb::new(220, 80, 80),
    },
];

/// Look up the static definition of a piece kind
pub fn piece_type(kind: PieceKind) -> &'static PieceType {
    &CATALOG[kind.index()]
}

/// Visit the set bits of a mask as (column, row) offsets, MSB first.
pub fn for_each_offset(mask: u16, mut visit: impl FnMut(i8, i8)) {
    let mut col = 0i8;
    let mut row = 0i8;
    let mut bit = 0x8000u16;
    while bit > 0 {
        if mask & bit != 0 {
            visit(col, row);
        }
        col += 1;
        if col == 4 {
            col = 0;
            row += 1;
        }
        bit >>= 1;
    }
}

/// Decode a mask into cell offsets.
///
/// Catalog masks never set more than four bits; extra bits are dropped.
pub fn decode_mask(mask: u16) -> PieceShape {
    let mut shape = PieceShape::new();
    for_each_offset(mask, |col, row| {
        let _ = shape.try_push((col, row));
    });
    shape
}

/// Get the shape (cell offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    decode_mask(piece_type(kind).mask(rotation))
}

/// A live piece: kind, orientation and the board position of the top-left
/// corner of its 4x4 window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// A piece in its first (UP) orientation at the given position
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::Up,
            x,
            y,
        }
    }

    pub fn piece_type(&self) -> &'static PieceType {
        piece_type(self.kind)
    }

    /// Same piece moved by (dx, dy), saturating at the `i8` range
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Same piece at the next orientation
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(piece_type(kind).kind, kind);
        }
    }

    #[test]
    fn every_mask_has_four_cells() {
        for ty in CATALOG.iter() {
            for (i, mask) in ty.masks.iter().enumerate() {
                assert_eq!(mask.count_ones(), 4, "{} rotation {}", ty.kind.as_str(), i);
            }
        }
    }

    #[test]
    fn decode_scans_row_major_msb_first() {
        // 0x8001: top-left and bottom-right corners.
        let shape = decode_mask(0x8001);
        assert_eq!(shape.as_slice(), &[(0, 0), (3, 3)]);

        // 0x0F00: full second row.
        let shape = decode_mask(0x0F00);
        assert_eq!(shape.as_slice(), &[(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn decode_drops_bits_past_four() {
        assert_eq!(decode_mask(0xFFFF).len(), 4);
        assert!(decode_mask(0).is_empty());
    }

    #[test]
    fn cells_fit_inside_bounding_size() {
        for ty in CATALOG.iter() {
            for mask in ty.masks {
                // Spawning anywhere in [0, width - size] keeps every cell on the board.
                for (col, row) in decode_mask(mask) {
                    assert!(col < ty.size as i8, "{} col {}", ty.kind.as_str(), col);
                    assert!(row < ty.size as i8, "{} row {}", ty.kind.as_str(), row);
                }
            }
        }
    }

    #[test]
    fn piece_shift_and_rotate() {
        let p = Piece::new(PieceKind::T, 3, 0);
        assert_eq!(p.rotation, Rotation::Up);
        assert_eq!(p.shifted(-1, 2), Piece { x: 2, y: 2, ..p });
        assert_eq!(p.rotated().rotation, Rotation::Right);
        assert_eq!(p.rotated().rotated().rotated().rotated(), p);
    }

    #[test]
    fn piece_shift_saturates() {
        let p = Piece::new(PieceKind::I, i8::MAX, i8::MIN);
        let moved = p.shifted(1, -1);
        assert_eq!((moved.x, moved.y), (i8::MAX, i8::MIN));
    }
}
