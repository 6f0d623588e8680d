/// Basic integration tests
use habit_quest::*;
use habit_quest::tools::{AddHabitParams, MarkDoneParams};
use tempfile::tempdir;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn add(store: &mut HabitStore<impl HabitStorage>, name: &str) -> Habit {
        store.add(name, format!("{} daily", name), Frequency::new("weekly")).unwrap()
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("habits.json");

        let mut store = HabitStore::new(JsonFileStorage::new(&path), ProgressionCalculator::new());
        let run = add(&mut store, "Run");
        add(&mut store, "Read");
        store.mark_done(run.id(), 1).unwrap();
        let before = store.list();

        let reloaded = HabitStore::new(JsonFileStorage::new(&path), ProgressionCalculator::new());
        assert_eq!(reloaded.list(), before);
        assert_eq!(reloaded.next_id(), HabitId(3));
    }

    #[test]
    fn test_sqlite_round_trip() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("habits.db");

        let storage = SqliteStorage::new(&path).expect("Failed to create storage");
        let mut store = HabitStore::new(storage, ProgressionCalculator::new());
        let run = add(&mut store, "Run");
        store.mark_done(run.id(), 1).unwrap();
        let before = store.list();
        drop(store);

        let storage = SqliteStorage::new(&path).expect("Failed to reopen storage");
        let reloaded = HabitStore::new(storage, ProgressionCalculator::new());
        assert_eq!(reloaded.list(), before);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("habits.json");
        std::fs::write(&path, "\u{0}\u{1} garbage").unwrap();

        let mut store = HabitStore::new(JsonFileStorage::new(&path), ProgressionCalculator::new());
        assert!(store.is_empty());
        assert_eq!(store.next_id(), HabitId(1));

        // The next write replaces the corrupt content
        add(&mut store, "Run");
        let reloaded = HabitStore::new(JsonFileStorage::new(&path), ProgressionCalculator::new());
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_legacy_file_loads_with_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("habits.json");
        std::fs::write(
            &path,
            r#"{"habits": [
                {"id": 3, "name": "Journal", "created_at": "2024-03-01T09:30:00.000001",
                 "history": ["2024-03-01", "2024-03-02"], "is_done_today": true},
                {"name": "Water plants"}
            ]}"#,
        )
        .unwrap();

        let store = HabitStore::new(JsonFileStorage::new(&path), ProgressionCalculator::new());
        let habits = store.list();

        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].id(), HabitId(3));
        assert_eq!(habits[0].history().len(), 2);
        assert!(habits[0].created_at().is_some());
        assert_eq!(habits[1].id(), HabitId(4));
        assert_eq!(habits[1].description(), "");
        assert_eq!(habits[1].frequency().as_str(), "daily");
        assert_eq!(store.next_id(), HabitId(5));
    }

    #[test]
    fn test_tracker_keeps_progress_between_runs() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = TrackerConfig::new(dir.path().join("habits.json"), Backend::Json);

        let mut tracker = HabitTracker::open(&config).expect("Failed to open tracker");
        tracker
            .add(AddHabitParams {
                name: "Pushups".to_string(),
                description: None,
                frequency: None,
            })
            .unwrap();
        let response = tracker
            .mark_done(MarkDoneParams { habit: "Pushups".to_string(), amount: Some(12) })
            .unwrap();
        assert_eq!(response.xp_awarded, 120);
        assert_eq!(response.level_ups, 1);

        let reopened = HabitTracker::open(&config).expect("Failed to reopen tracker");
        assert_eq!(*reopened.progress(), Progress { level: 2, xp: 20 });
        assert_eq!(reopened.store().len(), 1);
        assert_eq!(reopened.status().done_today, 1);
        assert!(dir.path().join("progress.json").exists());
    }

    #[test]
    fn test_failed_progress_write_restores_progress() {
        let dir = tempdir().expect("Failed to create temp dir");
        // A directory where the progress file should be makes every write fail
        let mut tracker = HabitTracker::with_storage(
            MemoryStorage::new(),
            ProgressFile::new(dir.path()),
        );
        tracker
            .add(AddHabitParams {
                name: "Pushups".to_string(),
                description: None,
                frequency: None,
            })
            .unwrap();

        let result = tracker.mark_done(MarkDoneParams { habit: "1".to_string(), amount: Some(12) });
        assert!(matches!(result, Err(TrackerError::Persistence(_))));
        assert_eq!(*tracker.progress(), Progress::default());

        // The completion itself was stored, so the award does not come back
        assert_eq!(tracker.store().find(HabitId(1)).unwrap().history().len(), 1);
        let retry = tracker
            .mark_done(MarkDoneParams { habit: "1".to_string(), amount: Some(12) })
            .unwrap();
        assert_eq!(retry.xp_awarded, 0);
        assert_eq!(*tracker.progress(), Progress::default());
    }

    #[test]
    fn test_storage_interface() {
        let dir = tempdir().expect("Failed to create temp dir");
        let storage = SqliteStorage::new(dir.path().join("habits.db"))
            .expect("Failed to create storage");

        // Every adapter can stand behind the same trait object
        let adapters: Vec<Box<dyn HabitStorage>> = vec![
            Box::new(storage),
            Box::new(MemoryStorage::new()),
            Box::new(JsonFileStorage::new(dir.path().join("habits.json"))),
        ];
        for adapter in &adapters {
            assert!(adapter.load().is_empty());
        }
    }
}
