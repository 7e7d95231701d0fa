//! Points awarded and deducted during play. The engine only applies
//! [HINT_PENALTY] itself; the rest are for the calling app to hand out through
//! [PuzzleEngine::add_score](crate::PuzzleEngine::add_score).

use std::time::Duration;

/// Awarded when [enter_letter](crate::PuzzleEngine::enter_letter) completes a word.
pub const WORD_COMPLETE_POINTS: i64 = 100;

/// Deducted by [reveal_current_cell](crate::PuzzleEngine::reveal_current_cell).
pub const HINT_PENALTY: i64 = 50;

/// Awarded once when the whole puzzle is solved, on top of [time_bonus].
pub const SOLVE_BONUS: i64 = 500;

const TIME_BONUS_MAX: i64 = 500;
const TIME_BONUS_LOST_PER_SECOND: i64 = 2;

/// Extra points for solving quickly: 500, minus 2 for every whole second taken,
/// never negative.
pub fn time_bonus(elapsed: Duration) -> i64 {
  let seconds = i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX);
  TIME_BONUS_MAX
    .saturating_sub(seconds.saturating_mul(TIME_BONUS_LOST_PER_SECOND))
    .max(0)
}

/// Everything awarded for solving the puzzle after `elapsed`.
pub fn solve_bonus(elapsed: Duration) -> i64 {
  SOLVE_BONUS + time_bonus(elapsed)
}
