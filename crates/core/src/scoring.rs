//! Scoring module - points, levels and tick intervals for both games

use crate::types::{
    BLOCK_BASE_INTERVAL_MS, BLOCK_INTERVAL_STEP_MS, BLOCK_MIN_INTERVAL_MS, HARD_DROP_POINTS_PER_ROW,
    LINES_PER_LEVEL, LINE_SCORES, SNAKE_BASE_INTERVAL_MS, SNAKE_MIN_INTERVAL_MS,
    SNAKE_SPEEDUP_EVERY, SNAKE_SPEEDUP_STEP_MS,
};

/// Points for clearing `lines` rows in one pass at `level` (1-based).
///
/// More than four rows cannot happen with 4x4 pieces; the table saturates anyway.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(LINE_SCORES.len() - 1)];
    base.saturating_mul(level)
}

/// Level for a cumulative line count (starts at 1)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Block-Stack gravity for a level
pub fn block_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(BLOCK_INTERVAL_STEP_MS);
    BLOCK_BASE_INTERVAL_MS
        .saturating_sub(reduction)
        .max(BLOCK_MIN_INTERVAL_MS)
}

/// Hard drop bonus for falling `distance` rows
pub fn hard_drop_points(distance: u32) -> u32 {
    distance.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Whether a snake score sits exactly on a speed-up boundary.
///
/// Exact match only: a score that skips over a multiple never triggers.
pub fn snake_speeds_up_at(score: u32) -> bool {
    score > 0 && score % SNAKE_SPEEDUP_EVERY == 0
}

/// Next snake interval after a speed-up
pub fn snake_faster_interval(interval_ms: u32) -> u32 {
    interval_ms
        .saturating_sub(SNAKE_SPEEDUP_STEP_MS)
        .max(SNAKE_MIN_INTERVAL_MS)
}

/// Human-facing snake speed level (1 at the base interval)
pub fn snake_speed_level(interval_ms: u32) -> u32 {
    SNAKE_BASE_INTERVAL_MS.saturating_sub(interval_ms) / SNAKE_SPEEDUP_STEP_MS + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0, 1), 0);
        assert_eq!(line_clear_points(1, 1), 100);
        assert_eq!(line_clear_points(2, 1), 300);
        assert_eq!(line_clear_points(3, 1), 500);
        assert_eq!(line_clear_points(4, 1), 800);
        assert_eq!(line_clear_points(1, 3), 300);
        assert_eq!(line_clear_points(4, 5), 4000);
    }

    #[test]
    fn test_level_for_lines() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(29), 3);
    }

    #[test]
    fn test_block_intervals() {
        assert_eq!(block_interval_ms(1), 1000);
        assert_eq!(block_interval_ms(2), 900);
        assert_eq!(block_interval_ms(9), 200);
        assert_eq!(block_interval_ms(10), 100);
        assert_eq!(block_interval_ms(15), 100);
        assert_eq!(block_interval_ms(0), 1000);
    }

    #[test]
    fn test_hard_drop_points() {
        assert_eq!(hard_drop_points(0), 0);
        assert_eq!(hard_drop_points(17), 34);
    }

    #[test]
    fn test_snake_speedup_exact_match() {
        assert!(!snake_speeds_up_at(0));
        assert!(!snake_speeds_up_at(40));
        assert!(snake_speeds_up_at(50));
        assert!(!snake_speeds_up_at(55));
        assert!(snake_speeds_up_at(100));
    }

    #[test]
    fn test_snake_interval_floor() {
        assert_eq!(snake_faster_interval(150), 140);
        assert_eq!(snake_faster_interval(60), 50);
        assert_eq!(snake_faster_interval(50), 50);
    }

    #[test]
    fn test_snake_speed_level() {
        assert_eq!(snake_speed_level(150), 1);
        assert_eq!(snake_speed_level(140), 2);
        assert_eq!(snake_speed_level(50), 11);
    }
}
