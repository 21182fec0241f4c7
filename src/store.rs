// JSON file store for the task collection

use crate::error::{Result, TaskError};
use crate::models::{Task, assign_missing_ids};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Ordered task list; a task's 1-based position is its display identifier
pub type TaskCollection = Vec<Task>;

/// Whole-file persistence for the task collection
///
/// Every command reads the full collection, mutates it in memory and writes
/// it back. There is no locking and no atomic rename: the last writer wins
/// and a crash mid-write can leave a truncated file, which `load` then
/// treats as empty.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every task, or an empty collection if the file is missing or unreadable
    ///
    /// Records without an id get one, and the file is rewritten so the id
    /// stays the same on the next load.
    pub fn load(&self) -> TaskCollection {
        match read_collection(&self.path) {
            Ok(mut tasks) => {
                debug!(file = ?self.path, count = tasks.len(), "Loaded tasks");
                if assign_missing_ids(&mut tasks) > 0
                    && let Err(e) = self.save(&tasks)
                {
                    warn!(file = ?self.path, error = %e, "Failed to persist assigned task ids");
                }
                tasks
            }
            Err(TaskError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(file = ?self.path, "Store file does not exist yet");
                Vec::new()
            }
            Err(e) => {
                warn!(file = ?self.path, error = %e, "Failed to load tasks, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the file with the full collection
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| TaskError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        write_collection(&self.path, tasks)?;
        debug!(file = ?self.path, count = tasks.len(), "Saved tasks");
        Ok(())
    }
}

/// Read a task collection, surfacing I/O and parse errors
pub fn read_collection(path: &Path) -> Result<TaskCollection> {
    let content = fs::read_to_string(path).map_err(|source| TaskError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| TaskError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a task collection as a 2-space indented JSON array
pub fn write_collection(path: &Path, tasks: &[Task]) -> Result<()> {
    let json = serde_json::to_string_pretty(tasks).map_err(|source| TaskError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| TaskError::Io {
        path: path.to_path_buf(),
        source,
    })
}
