// Task operations: pure collection edits plus the load-mutate-save manager

use crate::error::{Result, TaskError};
use crate::filter::ListFilter;
use crate::models::{Priority, Task, assign_missing_ids, parse_tags, validate_due_date};
use crate::render;
use crate::store::{self, TaskCollection, TaskStore};
use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Shortest id fragment accepted when referring to a task by id
pub const MIN_ID_FRAGMENT: usize = 4;

/// Input for `add`; priority stays textual so it is validated with the rest
#[derive(Debug, Clone)]
pub struct NewTask {
    pub description: String,
    pub due_date: Option<String>,
    pub priority: String,
    pub category: Option<String>,
    /// Comma-separated
    pub tags: Option<String>,
}

impl NewTask {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            due_date: None,
            priority: Priority::default().to_string(),
            category: None,
            tags: None,
        }
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn due_date(mut self, date: impl Into<String>) -> Self {
        self.due_date = Some(date.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tags(mut self, csv: impl Into<String>) -> Self {
        self.tags = Some(csv.into());
        self
    }

    /// Validate and build the task record
    pub fn into_task(self) -> Result<Task> {
        let priority: Priority = self.priority.parse()?;

        if self.description.trim().is_empty() {
            return Err(TaskError::validation("Description cannot be empty"));
        }

        let due_date = self.due_date.filter(|d| !d.is_empty());
        if let Some(date) = &due_date {
            validate_due_date(date)?;
        }

        let mut task = Task::new(self.description, priority);
        task.due_date = due_date;
        task.category = self.category.filter(|c| !c.trim().is_empty());
        task.tags = self.tags.as_deref().map(parse_tags).unwrap_or_default();
        Ok(task)
    }
}

/// How a command names a task: its 1-based position, or a fragment of its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRef {
    Position(usize),
    /// Leading or trailing part of the id, e.g. the short id from a listing
    IdFragment(String),
}

impl TaskRef {
    /// Index into `tasks`, if the reference names exactly one task
    pub fn resolve(&self, tasks: &[Task]) -> Option<usize> {
        match self {
            TaskRef::Position(pos) => (1..=tasks.len()).contains(pos).then(|| pos - 1),
            TaskRef::IdFragment(fragment) => {
                if fragment.len() < MIN_ID_FRAGMENT {
                    return None;
                }
                let fragment = fragment.as_str();
                let mut hits = tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.id.starts_with(fragment) || t.id.ends_with(fragment))
                    .map(|(i, _)| i);
                match (hits.next(), hits.next()) {
                    (Some(i), None) => Some(i),
                    _ => None,
                }
            }
        }
    }
}

impl FromStr for TaskRef {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(fragment) = s.strip_prefix('#') {
            return Ok(TaskRef::IdFragment(fragment.to_lowercase()));
        }
        if is_digits(s) {
            // Out-of-range digit strings still count as positions
            return Ok(TaskRef::Position(s.parse().unwrap_or(usize::MAX)));
        }
        if s.strip_prefix('-').is_some_and(is_digits) {
            // Negative numbers are never valid; position 0 resolves to nothing
            return Ok(TaskRef::Position(0));
        }
        Ok(TaskRef::IdFragment(s.to_lowercase()))
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl From<usize> for TaskRef {
    fn from(pos: usize) -> Self {
        TaskRef::Position(pos)
    }
}

/// Result of a command, displayed as the user-facing message
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added(String),
    Completed(usize),
    Deleted(String),
    InvalidId,
    Exported { count: usize, path: PathBuf },
    Imported { count: usize, path: PathBuf },
    ImportFailed(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added(description) => write!(f, "Added task: {}", description),
            Outcome::Completed(position) => write!(f, "Completed task {}", position),
            Outcome::Deleted(description) => write!(f, "Deleted task: {}", description),
            Outcome::InvalidId => write!(f, "Invalid task ID"),
            Outcome::Exported { count, path } => {
                write!(f, "Exported {} tasks to {}", count, path.display())
            }
            Outcome::Imported { count, path } => {
                write!(f, "Imported {} tasks from {}", count, path.display())
            }
            Outcome::ImportFailed(reason) => write!(f, "Error importing tasks: {}", reason),
        }
    }
}

// ============================================================================
// Pure collection operations
// ============================================================================

/// Validate `new` and append it; returns the stored task
pub fn add_task(tasks: &mut TaskCollection, new: NewTask) -> Result<&Task> {
    let task = new.into_task()?;
    tasks.push(task);
    Ok(&tasks[tasks.len() - 1])
}

/// Mark the referenced task complete; returns its 1-based position
pub fn complete_task(tasks: &mut [Task], task_ref: &TaskRef) -> Option<usize> {
    let index = task_ref.resolve(tasks)?;
    tasks[index].complete();
    Some(index + 1)
}

/// Remove the referenced task, shifting later positions down
pub fn delete_task(tasks: &mut TaskCollection, task_ref: &TaskRef) -> Option<Task> {
    let index = task_ref.resolve(tasks)?;
    Some(tasks.remove(index))
}

// ============================================================================
// Manager
// ============================================================================

/// Runs each command as a full load-mutate-save cycle against one store
#[derive(Debug, Clone)]
pub struct TaskManager {
    store: TaskStore,
}

impl TaskManager {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn add(&self, new: NewTask) -> Result<Outcome> {
        let mut tasks = self.store.load();
        let description = add_task(&mut tasks, new)?.description.clone();
        self.store.save(&tasks)?;
        debug!(count = tasks.len(), "Task added");
        Ok(Outcome::Added(description))
    }

    /// Rendered listing; read-only
    pub fn list(&self, filter: &ListFilter) -> String {
        render::render_list(&self.store.load(), filter)
    }

    pub fn complete(&self, task_ref: &TaskRef) -> Result<Outcome> {
        let mut tasks = self.store.load();
        match complete_task(&mut tasks, task_ref) {
            Some(position) => {
                self.store.save(&tasks)?;
                Ok(Outcome::Completed(position))
            }
            None => Ok(Outcome::InvalidId),
        }
    }

    pub fn delete(&self, task_ref: &TaskRef) -> Result<Outcome> {
        let mut tasks = self.store.load();
        match delete_task(&mut tasks, task_ref) {
            Some(removed) => {
                self.store.save(&tasks)?;
                Ok(Outcome::Deleted(removed.description))
            }
            None => Ok(Outcome::InvalidId),
        }
    }

    /// Write the whole collection to `path`; read-only on the store
    pub fn export(&self, path: &Path) -> Result<Outcome> {
        let tasks = self.store.load();
        store::write_collection(path, &tasks)?;
        info!(file = ?path, count = tasks.len(), "Exported tasks");
        Ok(Outcome::Exported {
            count: tasks.len(),
            path: path.to_path_buf(),
        })
    }

    /// Replace the store with the collection in `path`
    ///
    /// A missing or unparseable file is reported as `ImportFailed` and the
    /// store is left as it was.
    pub fn import(&self, path: &Path) -> Result<Outcome> {
        let mut tasks = match store::read_collection(path) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(file = ?path, error = %e, "Import failed");
                return Ok(Outcome::ImportFailed(e.to_string()));
            }
        };
        assign_missing_ids(&mut tasks);

        self.store.save(&tasks)?;
        info!(file = ?path, count = tasks.len(), "Imported tasks");
        Ok(Outcome::Imported {
            count: tasks.len(),
            path: path.to_path_buf(),
        })
    }
}
