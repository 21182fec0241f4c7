// Listing filters

use crate::models::Task;

/// Criteria for which tasks a listing shows
///
/// All set criteria must hold for a task to be visible.
#[derive(Debug, Clone)]
pub struct ListFilter {
    pub show_completed: bool,
    /// Exact category match
    pub category: Option<String>,
    /// Tag that must be present
    pub tag: Option<String>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            show_completed: true,
            category: None,
            tag: None,
            search: None,
        }
    }
}

impl ListFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.show_completed && task.completed {
            return false;
        }

        if let Some(category) = &self.category
            && task.category.as_deref() != Some(category.as_str())
        {
            return false;
        }

        if let Some(tag) = &self.tag
            && !task.has_tag(tag)
        {
            return false;
        }

        if let Some(search) = &self.search
            && !task.description.to_lowercase().contains(&search.to_lowercase())
        {
            return false;
        }

        true
    }

    /// Visible tasks in collection order
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn task(description: &str, category: Option<&str>, tags: &[&str]) -> Task {
        let mut task = Task::new(description, Priority::Medium);
        task.category = category.map(String::from);
        task.tags = tags.iter().map(|t| t.to_string()).collect();
        task
    }

    #[test]
    fn test_default_filter_shows_everything() {
        let mut done = task("Done", None, &[]);
        done.complete();

        assert!(ListFilter::default().matches(&done));
        assert!(ListFilter::default().matches(&task("Open", None, &[])));
    }

    #[test]
    fn test_hide_completed() {
        let mut done = task("Done", None, &[]);
        done.complete();
        let filter = ListFilter {
            show_completed: false,
            ..Default::default()
        };

        assert!(!filter.matches(&done));
        assert!(filter.matches(&task("Open", None, &[])));
    }

    #[test]
    fn test_category_is_exact() {
        let filter = ListFilter {
            category: Some("work".to_string()),
            ..Default::default()
        };

        assert!(filter.matches(&task("A", Some("work"), &[])));
        assert!(!filter.matches(&task("B", Some("Work"), &[])));
        assert!(!filter.matches(&task("C", None, &[])));
    }

    #[test]
    fn test_tag_membership() {
        let filter = ListFilter {
            tag: Some("urgent".to_string()),
            ..Default::default()
        };

        assert!(filter.matches(&task("A", None, &["home", "urgent"])));
        assert!(!filter.matches(&task("B", None, &["urgently"])));
    }

    #[test]
    fn test_search_ignores_case() {
        let filter = ListFilter {
            search: Some("REPORT".to_string()),
            ..Default::default()
        };

        assert!(filter.matches(&task("Write quarterly report", None, &[])));
        assert!(!filter.matches(&task("Call mom", None, &[])));
    }

    #[test]
    fn test_criteria_combine() {
        let filter = ListFilter {
            category: Some("work".to_string()),
            tag: Some("q4".to_string()),
            ..Default::default()
        };
        let tasks = vec![
            task("Both", Some("work"), &["q4"]),
            task("Category only", Some("work"), &[]),
            task("Tag only", None, &["q4"]),
        ];

        let visible = filter.apply(&tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].description, "Both");
    }
}
