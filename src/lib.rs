//! Blocktris (workspace facade crate).
//!
//! Re-exports the member crates under short names so binaries, tests and
//! benches can use `blocktris::{core,input,term,types}` without naming each
//! crate.

pub use blocktris_core as core;
pub use blocktris_input as input;
pub use blocktris_term as term;
pub use blocktris_types as types;
