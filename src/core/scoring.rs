//! Scoring module - classic line-clear scoring, leveling, and gravity speed
//!
//! Classic rules: a clear of n rows is worth `LINE_SCORES[n] * level` with
//! level starting at 1. Level advances every `LINES_PER_LEVEL` cleared
//! lines, and each level shaves `DROP_STEP_MS` off the gravity interval
//! down to a floor of `MIN_DROP_MS`.

use crate::types::{BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS};

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines] * level
}

/// Level for a total line count; starts at 1 and advances every 10 lines
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (in milliseconds).
/// Strictly decreasing step function of level, floored at `MIN_DROP_MS`.
pub fn drop_interval_ms(level: u32) -> u64 {
    let steps = level.saturating_sub(1) as u64;
    BASE_DROP_MS
        .saturating_sub(DROP_STEP_MS.saturating_mul(steps))
        .max(MIN_DROP_MS)
}
