/// Basic unit tests to verify core functionality
use habit_quest::*;
use chrono::NaiveDate;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_award_for_action() {
        let calc = ProgressionCalculator::new();
        assert_eq!(calc.award_for_action(0), 10);
        assert_eq!(calc.award_for_action(1), 10);
        assert_eq!(calc.award_for_action(5), 50);
    }

    #[test]
    fn test_apply_level_thresholds() {
        let calc = ProgressionCalculator::new();
        assert_eq!(calc.apply(95, 20), (15, 1));
        assert_eq!(calc.apply(0, 250), (50, 2));
        assert_eq!(calc.apply(0, 0), (0, 0));
    }

    #[test]
    fn test_add_ids_strictly_increase() {
        let mut store = HabitStore::new(MemoryStorage::new(), ProgressionCalculator::new());

        let ids: Vec<HabitId> = (0..5)
            .map(|i| store.add(format!("Habit {}", i), "", Frequency::daily()).unwrap().id())
            .collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ids.first(), Some(&HabitId(1)));
    }

    #[test]
    fn test_same_day_completion_is_idempotent() {
        let clock = FixedClock::at_date(date(2024, 6, 1));
        let mut store = HabitStore::with_clock(
            MemoryStorage::new(),
            ProgressionCalculator::new(),
            &clock,
        );
        let habit = store.add("Stretch", "", Frequency::daily()).unwrap();

        store.mark_done(habit.id(), 1).unwrap();
        let repeat = store.mark_done(habit.id(), 1).unwrap();

        assert_eq!(repeat, Some(MarkDoneOutcome { xp_awarded: 0, level_ups: 0 }));
        assert_eq!(store.find(habit.id()).unwrap().history().len(), 1);
    }

    #[test]
    fn test_completions_on_separate_days_are_ordered() {
        let clock = FixedClock::at_date(date(2024, 6, 1));
        let mut store = HabitStore::with_clock(
            MemoryStorage::new(),
            ProgressionCalculator::new(),
            &clock,
        );
        let habit = store.add("Stretch", "", Frequency::daily()).unwrap();

        store.mark_done(habit.id(), 1).unwrap();
        clock.advance_days(3);
        store.mark_done(habit.id(), 1).unwrap();

        let history = store.find(habit.id()).unwrap().history().to_vec();
        assert_eq!(history, vec![date(2024, 6, 1), date(2024, 6, 4)]);
    }

    #[test]
    fn test_delete_then_list() {
        let mut store = HabitStore::new(MemoryStorage::new(), ProgressionCalculator::new());
        let keep = store.add("Keep", "", Frequency::daily()).unwrap();
        let drop = store.add("Drop", "", Frequency::daily()).unwrap();

        assert!(store.delete(drop.id()).unwrap());
        let before = store.list();
        assert!(!store.delete(drop.id()).unwrap());
        assert!(!store.delete(HabitId(99)).unwrap());

        assert_eq!(store.list(), before);
        assert!(store.list().iter().all(|h| h.id() != drop.id()));
        assert_eq!(store.list()[0].id(), keep.id());
    }

    #[test]
    fn test_progress_tracks_levels_across_awards() {
        let calc = ProgressionCalculator::new();
        let mut progress = Progress::default();

        for _ in 0..9 {
            progress.record(&calc, MarkDoneOutcome::awarded(10));
        }
        assert_eq!(progress, Progress { level: 1, xp: 90 });

        let outcome = progress.record(&calc, MarkDoneOutcome::awarded(250));
        assert_eq!(outcome.level_ups, 3);
        assert_eq!(progress, Progress { level: 4, xp: 40 });
    }
}
