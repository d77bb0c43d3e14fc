//! Board module - the grid of locked cells.
//!
//! Cells are stored in a flat row-major vector. Coordinates are (x, y) with x
//! growing to the right and y growing downwards; row 0 is the top.
//!
//! Every mutation bumps [`Board::revision`], which is how observers learn that
//! the court needs to be redrawn.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Largest width or height a board can have
pub const MAX_DIMENSION: u8 = i8::MAX as u8;

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    revision: u64,
}

impl Board {
    /// Create a new empty 10x20 board
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create an empty board of the given size.
    ///
    /// Each dimension is clamped to `1..=127` so every cell has an `i8`
    /// coordinate.
    pub fn with_size(width: u8, height: u8) -> Self {
        let width = width.clamp(1, MAX_DIMENSION);
        let height = height.clamp(1, MAX_DIMENSION);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            revision: 0,
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Mutation counter; changes whenever any cell may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Get the kind occupying (x, y).
    ///
    /// Out-of-range reads return `None`, same as an empty cell.
    pub fn get_cell(&self, x: i8, y: i8) -> Cell {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Set or clear the cell at (x, y).
    ///
    /// Returns false (and changes nothing) if out of bounds.
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Check if (x, y) is inside the board and filled
    pub fn is_filled(&self, x: i8, y: i8) -> bool {
        self.get_cell(x, y).is_some()
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Empty every cell
    pub fn clear_all_cells(&mut self) {
        self.cells.fill(None);
        self.touch();
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Remove row `n`, shifting every row above it down by one.
    ///
    /// Row 0 becomes empty. Out-of-range rows are ignored.
    pub fn remove_row(&mut self, n: usize) {
        if n >= self.height as usize {
            return;
        }

        let width = self.width as usize;
        for row in (1..=n).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(None);
        self.touch();
    }

    /// Remove every complete row and return how many were removed.
    ///
    /// Rows are scanned bottom to top. After a removal the same index is
    /// checked again, since the row above has just moved into it.
    pub fn remove_complete_rows(&mut self) -> u32 {
        let mut removed = 0;
        let mut y = self.height as usize;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                removed += 1;
            } else {
                y -= 1;
            }
        }
        removed
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill a whole row with `kind`
    pub fn fill_row(&mut self, y: i8, kind: PieceKind) {
        for x in 0..self.width as i8 {
            self.set_cell(x, y, Some(kind));
        }
    }

    /// Build a board from text rows for testing: `.` is empty, a piece id is filled.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u8;
        let width = rows[0].len() as u8;
        let mut board = Self::with_size(width, height);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width as usize);
            for (x, ch) in row.chars().enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                board.cells[y * width as usize + x] = cell;
            }
        }
        board
    }

    #[cfg(test)]
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as usize)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|cell| cell.map(|k| k.as_str()).unwrap_or("."))
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
