/// Command for listing all habits

use serde::Serialize;
use crate::clock::Clock;
use crate::storage::HabitStorage;
use crate::store::HabitStore;

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: u64,
    pub name: String,
    pub description: String,
    pub frequency: String,
    pub is_done_today: bool,
    pub total_completions: usize,
    pub last_completed: Option<String>,
}

/// Summary statistics for all habits
#[derive(Debug, Serialize)]
pub struct HabitListSummary {
    pub total_habits: usize,
    pub done_today: usize,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub summary: HabitListSummary,
    pub message: String,
}

/// List habits in the order they were created
pub fn list_habits<S: HabitStorage, C: Clock>(store: &HabitStore<S, C>) -> ListHabitsResponse {
    let habits: Vec<HabitSummary> = store
        .list()
        .iter()
        .map(|habit| HabitSummary {
            habit_id: habit.id().value(),
            name: habit.name().to_string(),
            description: habit.description().to_string(),
            frequency: habit.frequency().to_string(),
            is_done_today: store.is_done_today(habit),
            total_completions: habit.history().len(),
            last_completed: habit.last_completed().map(|d| d.to_string()),
        })
        .collect();

    let done_today = habits.iter().filter(|h| h.is_done_today).count();
    let message = if habits.is_empty() {
        "No habits yet. Add one to get started!".to_string()
    } else {
        habits
            .iter()
            .map(|h| {
                let mark = if h.is_done_today { "x" } else { " " };
                if h.description.is_empty() {
                    format!("[{}] {:>3}  {} ({})", mark, h.habit_id, h.name, h.frequency)
                } else {
                    format!(
                        "[{}] {:>3}  {} ({}) - {}",
                        mark, h.habit_id, h.name, h.frequency, h.description
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    ListHabitsResponse {
        summary: HabitListSummary {
            total_habits: habits.len(),
            done_today,
        },
        habits,
        message,
    }
}
