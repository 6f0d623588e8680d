/// Experience point and level arithmetic
///
/// This module provides the pure calculation rules for awarding XP on a
/// completion and turning a running XP total into level-ups, plus the
/// caller-owned `Progress` value that accumulates them.

use serde::{Deserialize, Serialize};

/// XP granted for one unit of progress
pub const BASE_XP_PER_ACTION: u64 = 10;

/// XP needed to climb one level
pub const XP_PER_LEVEL: u64 = 100;

/// Stateless calculator for XP awards and level thresholds
///
/// Any running total belongs to the caller; the calculator only answers
/// questions about numbers it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionCalculator;

impl ProgressionCalculator {
    pub fn new() -> Self {
        Self
    }

    /// XP awarded for completing an action `progress_amount` times
    ///
    /// Amounts below 1 count as 1, so a completion is never worth less than
    /// the base award.
    pub fn award_for_action(&self, progress_amount: i64) -> u64 {
        let multiplier = progress_amount.max(1) as u64;
        BASE_XP_PER_ACTION.saturating_mul(multiplier)
    }

    /// Add `delta_xp` to `current_xp` and consume whole level thresholds
    ///
    /// Returns the XP left over and how many thresholds were crossed. A
    /// single large delta may cross several levels at once.
    pub fn apply(&self, current_xp: u64, delta_xp: u64) -> (u64, u64) {
        let total = current_xp.saturating_add(delta_xp);
        (total % XP_PER_LEVEL, total / XP_PER_LEVEL)
    }
}

/// Result of marking a habit done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarkDoneOutcome {
    pub xp_awarded: u64,
    pub level_ups: u64,
}

impl MarkDoneOutcome {
    /// Outcome of a repeated completion on the same day
    pub fn nothing() -> Self {
        Self::default()
    }

    /// Outcome carrying an XP award; level-ups are filled in by `Progress`
    pub fn awarded(xp_awarded: u64) -> Self {
        Self { xp_awarded, level_ups: 0 }
    }
}

/// A player's running level and XP toward the next level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u64,
    pub xp: u64,
}

impl Default for Progress {
    fn default() -> Self {
        Self { level: 1, xp: 0 }
    }
}

impl Progress {
    /// Apply a completion outcome and report the level-ups it caused
    pub fn record(
        &mut self,
        calculator: &ProgressionCalculator,
        outcome: MarkDoneOutcome,
    ) -> MarkDoneOutcome {
        let (remainder, level_ups) = calculator.apply(self.xp, outcome.xp_awarded);
        self.xp = remainder;
        self.level = self.level.saturating_add(level_ups);

        if level_ups > 0 {
            tracing::info!("Reached level {} (+{})", self.level, level_ups);
        }

        MarkDoneOutcome {
            xp_awarded: outcome.xp_awarded,
            level_ups,
        }
    }

    /// XP still missing before the next level-up
    pub fn xp_to_next_level(&self) -> u64 {
        XP_PER_LEVEL - self.xp.min(XP_PER_LEVEL)
    }
}
