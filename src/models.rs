// Data models for tasktrack

use crate::error::{Result, TaskError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Format used for `created_at` / `completed_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format accepted for `due_date`
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Sort sentinel for tasks without a due date
pub const NO_DUE_DATE: &str = "9999-99-99";

/// Characters of the id shown in listings
pub const SHORT_ID_LEN: usize = 8;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Empty until assigned; see `assign_missing_ids`
    #[serde(default)]
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl Task {
    /// Create an incomplete task stamped with the current local time
    pub fn new(description: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: new_id(),
            description: description.into(),
            completed: false,
            priority,
            due_date: None,
            category: None,
            tags: Vec::new(),
            created_at: now_local(),
            completed_at: None,
        }
    }

    pub fn complete(&mut self) {
        self.completed = true;
        self.completed_at = Some(now_local());
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Due date, treating an empty string as unset
    pub fn due(&self) -> Option<&str> {
        self.due_date.as_deref().filter(|d| !d.is_empty())
    }

    /// Category, treating an empty string as unset
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Trailing (random) part of the id shown in listings
    pub fn short_id(&self) -> &str {
        let start = self.id.len().saturating_sub(SHORT_ID_LEN);
        self.id.get(start..).unwrap_or(&self.id)
    }

    /// Key used by the default listing order
    pub fn sort_key(&self) -> (u8, &str) {
        (self.priority.rank(), self.due().unwrap_or(NO_DUE_DATE))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Listing rank: high sorts first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();
                TaskError::validation(format!("Priority must be one of: {}", allowed.join(", ")))
            })
    }
}

/// Check a due date against `YYYY-MM-DD`
pub fn validate_due_date(date: &str) -> Result<()> {
    chrono::NaiveDate::parse_from_str(date, DUE_DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| TaskError::validation("Due date must be in YYYY-MM-DD format"))
}

/// Split a comma-separated tag list, dropping blanks
pub fn parse_tags(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`
pub fn now_local() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Give every id-less task a fresh id; returns how many were assigned
pub fn assign_missing_ids(tasks: &mut [Task]) -> usize {
    let mut assigned = 0;
    for task in tasks.iter_mut().filter(|t| t.id.is_empty()) {
        task.id = new_id();
        assigned += 1;
    }
    assigned
}
