/// File persistence for the player's running progress
///
/// Progress is owned by the caller rather than the habit store, so it gets
/// its own small JSON file. Reading follows the same forgiving rules as
/// habit loading; writing reports failures.

use std::fs;
use std::path::{Path, PathBuf};

use crate::progression::Progress;
use crate::storage::StorageError;

#[derive(Debug, Clone)]
pub struct ProgressFile {
    path: PathBuf,
}

impl ProgressFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Progress file kept next to a habit data file
    pub fn beside(data_path: &Path) -> Self {
        let dir = data_path.parent().unwrap_or_else(|| Path::new(""));
        Self::new(dir.join("progress.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved progress, or the starting progress if none can be read
    pub fn load(&self) -> Progress {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Could not read progress file {}: {}", self.path.display(), e);
                }
                return Progress::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt progress file {}: {}", self.path.display(), e);
            Progress::default()
        })
    }

    pub fn save(&self, progress: &Progress) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(progress)?)?;
        Ok(())
    }
}
