/// Command for checking the player's level and today's progress

use serde::Serialize;
use crate::clock::Clock;
use crate::progression::Progress;
use crate::storage::HabitStorage;
use crate::store::HabitStore;

/// Response from checking status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub level: u64,
    pub xp: u64,
    pub xp_to_next_level: u64,
    pub total_habits: usize,
    pub done_today: usize,
    pub message: String,
}

/// Summarize the player's progress against the store's habits
pub fn get_status<S: HabitStorage, C: Clock>(
    store: &HabitStore<S, C>,
    progress: &Progress,
) -> StatusResponse {
    let habits = store.list();
    let done_today = habits.iter().filter(|h| store.is_done_today(h)).count();
    let xp_to_next_level = progress.xp_to_next_level();

    StatusResponse {
        level: progress.level,
        xp: progress.xp,
        xp_to_next_level,
        total_habits: habits.len(),
        done_today,
        message: format!(
            "Level {} ({} XP, {} to next level). {}/{} habits done today.",
            progress.level,
            progress.xp,
            xp_to_next_level,
            done_today,
            habits.len()
        ),
    }
}
