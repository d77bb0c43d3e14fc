//! Shared types and constants.
//!
//! Pure data with no dependencies, usable from the core engine, the terminal
//! front-end and tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9) by default
//! - **Height**: 20 rows (indexed 0-19) by default
//! - Pieces spawn on row 0 at a random column that keeps them on the board
//!
//! # Timing
//!
//! All timing values are integer milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Nominal frame interval (~60 Hz) |
//! | `FALLBACK_TICK_MS` | 40 | Slowest frame interval (~24 Hz) |
//! | `MAX_TICK_MS` | 1000 | Largest delta a single tick may consume |
//! | `DROP_START_MS` | 600 | Drop interval with no rows cleared |
//! | `DROP_DECREMENT_MS` | 5 | Interval reduction per cleared row |
//! | `DROP_MIN_MS` | 100 | Drop interval floor |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{Command, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
//! assert_eq!(Rotation::Left.rotate_cw(), Rotation::Up);
//! assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Nominal frame interval in milliseconds (16ms ≈ 60 Hz)
pub const TICK_MS: u32 = 16;

/// Fallback frame interval in milliseconds (40ms ≈ 24 Hz)
pub const FALLBACK_TICK_MS: u32 = 40;

/// Largest elapsed time a single tick will account for.
///
/// Longer stalls are clamped so the game never catches up in one jump.
pub const MAX_TICK_MS: u32 = 1000;

/// Drop interval before any rows are cleared
pub const DROP_START_MS: u32 = 600;

/// Drop interval reduction per cleared row
pub const DROP_DECREMENT_MS: u32 = 5;

/// Drop interval floor
pub const DROP_MIN_MS: u32 = 100;

/// Points awarded every time a piece locks
pub const LOCK_POINTS: u32 = 10;

/// Points for a single-row clear; each extra row doubles it
pub const LINE_CLEAR_BASE_POINTS: u32 = 100;

/// Width and height (in cells) of the next-piece preview
pub const PREVIEW_SIZE: u8 = 5;

/// Copies of each piece kind in a full shuffle bag
pub const BAG_COPIES: usize = 4;

/// Digits shown for the displayed score
pub const SCORE_DIGITS: usize = 5;

/// The seven piece kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from its id (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Stable lowercase id
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Piece orientation.
///
/// Rotation advances UP → RIGHT → DOWN → LEFT → UP; the discriminant is the
/// index of the matching mask in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Rotation {
    /// Advance to the next orientation, wrapping LEFT back to UP.
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::Rotation;
    ///
    /// assert_eq!(Rotation::Up.rotate_cw(), Rotation::Right);
    /// assert_eq!(Rotation::Right.rotate_cw(), Rotation::Down);
    /// assert_eq!(Rotation::Down.rotate_cw(), Rotation::Left);
    /// assert_eq!(Rotation::Left.rotate_cw(), Rotation::Up);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::Up => Rotation::Right,
            Rotation::Right => Rotation::Down,
            Rotation::Down => Rotation::Left,
            Rotation::Left => Rotation::Up,
        }
    }

    /// Mask index (0-3)
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Up => "up",
            Rotation::Right => "right",
            Rotation::Down => "down",
            Rotation::Left => "left",
        }
    }
}

/// A queued gameplay action, drained one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Shift the current piece one column left
    Left,
    /// Shift the current piece one column right
    Right,
    /// Advance to the next orientation
    Rotate,
    /// Move down one row, locking the piece if it is blocked
    Drop,
}

/// Discrete input from the input source.
///
/// Gameplay commands become queued [`Action`]s; `Start` and `Escape` are
/// state transitions handled immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Rotate,
    Drop,
    Start,
    Escape,
}

impl Command {
    /// The queued action this command maps to, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            Command::Left => Some(Action::Left),
            Command::Right => Some(Action::Right),
            Command::Rotate => Some(Action::Rotate),
            Command::Drop => Some(Action::Drop),
            Command::Start | Command::Escape => None,
        }
    }

    /// Parse a command name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::Command;
    ///
    /// assert_eq!(Command::from_str("left"), Some(Command::Left));
    /// assert_eq!(Command::from_str("ESCAPE"), Some(Command::Escape));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "rotate" => Some(Command::Rotate),
            "drop" => Some(Command::Drop),
            "start" => Some(Command::Start),
            "escape" => Some(Command::Escape),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Rotate => "rotate",
            Command::Drop => "drop",
            Command::Start => "start",
            Command::Escape => "escape",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A cell on the board: `None` when empty, otherwise the kind that locked there.
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(DROP_START_MS, 600);
        assert_eq!(DROP_DECREMENT_MS, 5);
        assert_eq!(DROP_MIN_MS, 100);
        assert_eq!(MAX_TICK_MS, 1000);
        // 100 rows takes the interval from start down to the floor.
        assert_eq!((DROP_START_MS - DROP_MIN_MS) / DROP_DECREMENT_MS, 100);
    }

    #[test]
    fn bag_holds_four_of_each() {
        assert_eq!(PieceKind::ALL.len() * BAG_COPIES, 28);
    }
}
