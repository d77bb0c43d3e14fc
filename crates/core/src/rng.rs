//! RNG module - shuffle-bag piece generation
//!
//! The bag holds four copies of each of the seven kinds (28 entries). Each
//! draw removes one remaining entry uniformly at random; the bag is refilled
//! only once it is empty. Over any aligned run of 28 draws every kind appears
//! exactly four times.
//!
//! The RNG is seedable so games replay identically in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::{piece_type, Piece};
use crate::types::{PieceKind, BAG_COPIES};

/// Shuffle-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Remaining entries of the current bag
    bag: Vec<PieceKind>,
    rng: StdRng,
    seed: u64,
}

impl PieceBag {
    /// Create an empty bag; it fills on the first draw
    pub fn new(seed: u64) -> Self {
        Self {
            bag: Vec::with_capacity(PieceKind::ALL.len() * BAG_COPIES),
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    fn refill(&mut self) {
        self.bag.clear();
        for kind in PieceKind::ALL {
            for _ in 0..BAG_COPIES {
                self.bag.push(kind);
            }
        }
    }

    /// Draw the next kind
    pub fn draw(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        let idx = self.rng.gen_range(0..self.bag.len());
        self.bag.swap_remove(idx)
    }

    /// Draw a kind and place it on row 0 at a random column that keeps it on a
    /// board `board_width` wide, in its first orientation.
    pub fn spawn(&mut self, board_width: u8) -> Piece {
        let kind = self.draw();
        let size = piece_type(kind).size;
        let max_x = board_width.saturating_sub(size);
        let x = self.rng.gen_range(0..=max_x);
        Piece::new(kind, x as i8, 0)
    }

    /// Entries left before the next refill
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    /// Seed this bag was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
