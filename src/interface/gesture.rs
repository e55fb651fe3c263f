//! Mapping a horizontal swipe on a food card to an undo.

use crate::engine::constants::{SWIPE_THRESHOLD_PX, SWIPE_TIME_LIMIT_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Classify a finished drag.
///
/// `delta_x` is end minus start in pixels. A drag counts as a swipe only if
/// it moved, finished within the time limit and travelled past the threshold.
pub fn classify_swipe(delta_x: f64, elapsed_ms: u64) -> Option<SwipeDirection> {
    if delta_x == 0.0 || elapsed_ms >= SWIPE_TIME_LIMIT_MS {
        return None;
    }
    if delta_x <= -SWIPE_THRESHOLD_PX {
        Some(SwipeDirection::Left)
    } else if delta_x >= SWIPE_THRESHOLD_PX {
        Some(SwipeDirection::Right)
    } else {
        None
    }
}

/// Only a leftward swipe on a food with history triggers undo.
pub fn should_trigger_undo(delta_x: f64, elapsed_ms: u64, has_history: bool) -> bool {
    has_history && classify_swipe(delta_x, elapsed_ms) == Some(SwipeDirection::Left)
}
