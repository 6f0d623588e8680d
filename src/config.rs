/// Runtime configuration: where habits are stored and with which backend

use std::path::{Path, PathBuf};
use clap::ValueEnum;

use crate::storage::{HabitStorage, JsonFileStorage, SqliteStorage, StorageError};

/// Which storage adapter backs the habit store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// A single pretty-printed JSON document
    #[default]
    Json,
    /// A SQLite database
    Sqlite,
}

impl Backend {
    /// File name used when no explicit path is configured
    pub fn default_file_name(self) -> &'static str {
        match self {
            Backend::Json => "habits.json",
            Backend::Sqlite => "habits.db",
        }
    }
}

/// Settings needed to open a habit tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Location of the habit data file
    pub path: PathBuf,
    pub backend: Backend,
}

impl TrackerConfig {
    pub fn new(path: impl Into<PathBuf>, backend: Backend) -> Self {
        Self {
            path: path.into(),
            backend,
        }
    }

    /// Build a config, using the default data directory when `path` is None
    ///
    /// An explicit path has its parent directory created if needed.
    pub fn resolve(path: Option<PathBuf>, backend: Backend) -> std::io::Result<Self> {
        let path = match path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                path
            }
            None => default_data_dir()?.join(backend.default_file_name()),
        };
        Ok(Self { path, backend })
    }

    /// Open the storage adapter this config describes
    pub fn open_storage(&self) -> Result<Box<dyn HabitStorage>, StorageError> {
        let storage: Box<dyn HabitStorage> = match self.backend {
            Backend::Json => Box::new(JsonFileStorage::new(&self.path)),
            Backend::Sqlite => Box::new(SqliteStorage::new(&self.path)?),
        };
        Ok(storage)
    }
}

/// Find a writable directory for habit data
///
/// Tries the home directory first, then the platform data and config
/// directories, then the working directory, and finally the temp directory.
pub fn default_data_dir() -> std::io::Result<PathBuf> {
    let candidates = [
        dirs::home_dir().map(|p| p.join(".habit_quest")),
        dirs::data_dir().map(|p| p.join("habit_quest")),
        dirs::config_dir().map(|p| p.join("habit_quest")),
        std::env::current_dir().ok().map(|p| p.join(".habit_quest")),
    ];

    for candidate in candidates.iter().flatten() {
        if is_writable_dir(candidate) {
            return Ok(candidate.clone());
        }
    }

    let fallback = std::env::temp_dir().join("habit_quest");
    std::fs::create_dir_all(&fallback)?;
    tracing::warn!("Using temporary directory for habit data: {}", fallback.display());
    Ok(fallback)
}

fn is_writable_dir(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    let marker = dir.join(".test_write");
    if std::fs::write(&marker, "test").is_ok() {
        let _ = std::fs::remove_file(&marker);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_path_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("habits.json");

        let config = TrackerConfig::resolve(Some(path.clone()), Backend::Json).unwrap();

        assert_eq!(config.path, path);
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(Backend::Json.default_file_name(), "habits.json");
        assert_eq!(Backend::Sqlite.default_file_name(), "habits.db");
        assert_eq!(Backend::default(), Backend::Json);
    }

    #[test]
    fn test_open_sqlite_storage() {
        let dir = tempdir().unwrap();
        let config = TrackerConfig::new(dir.path().join("habits.db"), Backend::Sqlite);
        let storage = config.open_storage().unwrap();
        assert!(storage.load().is_empty());
    }
}
