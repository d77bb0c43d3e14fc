//! Scoring and difficulty progression.
//!
//! - Every lock is worth [`LOCK_POINTS`].
//! - Clearing `n` rows in one lock is worth `100 * 2^(n-1)`: 100, 200, 400, 800.
//! - Every cleared row shortens the drop interval by a fixed step, down to a floor.

use crate::config::SpeedConfig;
use crate::types::{LINE_CLEAR_BASE_POINTS, LOCK_POINTS};

/// Points for clearing `lines` rows with a single lock
pub fn line_clear_score(lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let multiplier = 1u32.checked_shl(lines - 1).unwrap_or(u32::MAX);
    LINE_CLEAR_BASE_POINTS.saturating_mul(multiplier)
}

/// Total points for one lock that cleared `lines` rows
pub fn lock_score(lines: u32) -> u32 {
    LOCK_POINTS.saturating_add(line_clear_score(lines))
}

/// Drop interval after `rows` cumulative cleared rows
pub fn drop_interval_ms(rows: u32, speed: &SpeedConfig) -> u32 {
    speed
        .start_ms
        .saturating_sub(speed.decrement_ms.saturating_mul(rows))
        .max(speed.min_ms)
}
