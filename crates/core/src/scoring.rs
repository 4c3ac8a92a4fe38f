//! Scoring module - points for cleared runs
//!
//! A run of `n` tokens with minimum length `m` is worth
//! `floor(n / m) * COMBO_POINTS + n * TOKEN_POINTS`.
//! Every qualifying run is scored on its own, so an L or T shape scores both
//! arms even though they share a corner token.

use crate::matcher::Run;
use crate::types::{COMBO_POINTS, TOKEN_POINTS};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Sum of the per-run combo bonuses.
    pub combo_bonus: u32,
    /// Sum of the per-token bonuses.
    pub token_bonus: u32,
    pub total: u32,
}

/// Combo part of a run's score
pub fn calculate_combo_bonus(run_len: u32, match_min: u8) -> u32 {
    if match_min == 0 {
        return 0;
    }
    (run_len / match_min as u32).saturating_mul(COMBO_POINTS)
}

/// Points for a single run.
///
/// ```
/// use tui_match3_core::scoring::run_score;
///
/// assert_eq!(run_score(3, 3), 80);
/// assert_eq!(run_score(6, 3), 160);
/// ```
pub fn run_score(run_len: u32, match_min: u8) -> u32 {
    calculate_combo_bonus(run_len, match_min).saturating_add(run_len.saturating_mul(TOKEN_POINTS))
}

/// Score a set of runs cleared together.
pub fn calculate_score<'a>(runs: impl IntoIterator<Item = &'a Run>, match_min: u8) -> ScoreResult {
    let mut result = ScoreResult::default();
    for run in runs {
        let len = run.len as u32;
        result.combo_bonus = result
            .combo_bonus
            .saturating_add(calculate_combo_bonus(len, match_min));
        result.token_bonus = result
            .token_bonus
            .saturating_add(len.saturating_mul(TOKEN_POINTS));
    }
    result.total = result.combo_bonus.saturating_add(result.token_bonus);
    result
}
