/// Command for marking habits done and collecting XP

use serde::{Deserialize, Serialize};
use crate::clock::Clock;
use crate::progression::Progress;
use crate::storage::HabitStorage;
use crate::store::HabitStore;
use crate::tools::resolve_habit;
use crate::TrackerError;

/// Parameters for marking a habit done
#[derive(Debug, Deserialize)]
pub struct MarkDoneParams {
    pub habit: String, // Id or exact name
    pub amount: Option<i64>,
}

/// Response from marking a habit done
#[derive(Debug, Serialize)]
pub struct MarkDoneResponse {
    pub success: bool,
    pub habit_id: Option<u64>,
    pub xp_awarded: u64,
    pub level_ups: u64,
    pub level: u64,
    pub xp: u64,
    pub message: String,
}

/// Mark a habit done and apply the award to the player's progress
///
/// An unknown habit is reported through `success: false`, not an error.
pub fn mark_habit_done<S: HabitStorage, C: Clock>(
    store: &mut HabitStore<S, C>,
    progress: &mut Progress,
    params: MarkDoneParams,
) -> Result<MarkDoneResponse, TrackerError> {
    let not_found = |progress: &Progress| MarkDoneResponse {
        success: false,
        habit_id: None,
        xp_awarded: 0,
        level_ups: 0,
        level: progress.level,
        xp: progress.xp,
        message: format!("Habit '{}' not found", params.habit.trim()),
    };

    let Some(habit) = resolve_habit(store, &params.habit) else {
        return Ok(not_found(&*progress));
    };

    let Some(outcome) = store.mark_done(habit.id(), params.amount.unwrap_or(1))? else {
        return Ok(not_found(&*progress));
    };

    let calculator = *store.calculator();
    let outcome = progress.record(&calculator, outcome);

    let message = if outcome.xp_awarded == 0 {
        format!("'{}' is already done today", habit.name())
    } else if outcome.level_ups > 0 {
        format!(
            "Marked '{}' done: +{} XP, level up! Now level {}",
            habit.name(),
            outcome.xp_awarded,
            progress.level
        )
    } else {
        format!("Marked '{}' done: +{} XP", habit.name(), outcome.xp_awarded)
    };

    Ok(MarkDoneResponse {
        success: true,
        habit_id: Some(habit.id().value()),
        xp_awarded: outcome.xp_awarded,
        level_ups: outcome.level_ups,
        level: progress.level,
        xp: progress.xp,
        message,
    })
}
