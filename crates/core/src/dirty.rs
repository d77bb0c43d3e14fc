//! Dirty flags for the render layer.
//!
//! The core only ever sets flags; the renderer consumes them with the
//! `take_*` methods after drawing.

/// One flag per renderable region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyFlags {
    /// Board cells or the falling piece
    pub court: bool,
    /// Next-piece preview
    pub next: bool,
    /// Displayed score
    pub score: bool,
    /// Cleared-rows counter
    pub rows: bool,
}

impl DirtyFlags {
    /// Every region dirty
    pub fn all() -> Self {
        Self {
            court: true,
            next: true,
            score: true,
            rows: true,
        }
    }

    pub fn any(&self) -> bool {
        self.court || self.next || self.score || self.rows
    }

    pub fn mark_court(&mut self) {
        self.court = true;
    }

    pub fn mark_next(&mut self) {
        self.next = true;
    }

    pub fn mark_score(&mut self) {
        self.score = true;
    }

    pub fn mark_rows(&mut self) {
        self.rows = true;
    }

    pub fn mark_all(&mut self) {
        *self = Self::all();
    }

    pub fn take_court(&mut self) -> bool {
        std::mem::take(&mut self.court)
    }

    pub fn take_next(&mut self) -> bool {
        std::mem::take(&mut self.next)
    }

    pub fn take_score(&mut self) -> bool {
        std::mem::take(&mut self.score)
    }

    pub fn take_rows(&mut self) -> bool {
        std::mem::take(&mut self.rows)
    }

    /// Return the current flags and clear them all
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
