//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Commands are
//! handed to the session, which queues gameplay actions and drains them one
//! per tick, so there is no auto-repeat handling here.

pub mod map;

pub use blocktris_types as types;

pub use map::{handle_key_event, should_quit};
