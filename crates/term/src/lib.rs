//! Terminal front-end.
//!
//! A small game-oriented rendering layer: the session snapshot is drawn into
//! a framebuffer ([`GameView`]) which is then flushed to the terminal as a
//! diff against the previous frame ([`TerminalRenderer`]).
//!
//! Nothing in here mutates game state; it only reads snapshots.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, restore_terminal, TerminalRenderer};
