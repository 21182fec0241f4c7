// Sorting, grouping and text rendering for task listings

use crate::filter::ListFilter;
use crate::models::{Priority, Task};
use colored::Colorize;

/// Bucket name for tasks without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

pub const NO_TASKS: &str = "No tasks found.";
pub const NOTHING_TO_DISPLAY: &str = "No tasks to display.";

/// Sort by priority rank, then due date; the sort is stable so collection
/// order breaks remaining ties
pub fn sort_tasks(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// Group sorted tasks by category in first-encounter order
pub fn group_by_category<'a>(tasks: &[&'a Task]) -> Vec<(&'a str, Vec<&'a Task>)> {
    let mut groups: Vec<(&'a str, Vec<&'a Task>)> = Vec::new();

    for &task in tasks {
        let name = task.category_name().unwrap_or(UNCATEGORIZED);
        match groups.iter_mut().find(|(n, _)| *n == name) {
            Some((_, members)) => members.push(task),
            None => groups.push((name, vec![task])),
        }
    }

    groups
}

/// Render the listing for `tasks` under `filter`
pub fn render_list(tasks: &[Task], filter: &ListFilter) -> String {
    if tasks.is_empty() {
        return NO_TASKS.to_string();
    }

    let mut visible = filter.apply(tasks);
    if visible.is_empty() {
        return NOTHING_TO_DISPLAY.to_string();
    }
    sort_tasks(&mut visible);

    let mut lines = Vec::new();
    if visible.iter().any(|t| t.category_name().is_some()) {
        for (i, (name, members)) in group_by_category(&visible).into_iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.push(format!("{}:", name).bold().to_string());
            for (n, task) in members.into_iter().enumerate() {
                lines.push(format!("  {}", render_task(n + 1, task)));
            }
        }
    } else {
        for (n, task) in visible.into_iter().enumerate() {
            lines.push(render_task(n + 1, task));
        }
    }

    lines.join("\n")
}

/// One listing line:
/// `<n>. [<mark>] [<priority>] <description> [Due: ..] [Tags: ..] #<short id>`
pub fn render_task(position: usize, task: &Task) -> String {
    let mark = if task.completed {
        "✓".green().to_string()
    } else {
        " ".to_string()
    };

    let priority = format!("[{}]", task.priority);
    let priority = match task.priority {
        Priority::High => priority.red(),
        Priority::Medium => priority.yellow(),
        Priority::Low => priority.blue(),
    };

    let mut parts = vec![
        format!("{}.", position),
        format!("[{}]", mark),
        priority.to_string(),
        task.description.clone(),
    ];
    if let Some(due) = task.due() {
        parts.push(format!("Due: {}", due));
    }
    if !task.tags.is_empty() {
        parts.push(format!("Tags: {}", task.tags.join(", ")));
    }
    if !task.id.is_empty() {
        parts.push(format!("#{}", task.short_id()).dimmed().to_string());
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    fn task(description: &str, priority: Priority, due: Option<&str>) -> Task {
        let mut task = Task::new(description, priority);
        task.id = "0199aaaa-bbbb-7ccc-8ddd-eeeeffff0000".to_string();
        task.due_date = due.map(String::from);
        task
    }

    #[test]
    fn test_empty_collection() {
        assert_eq!(render_list(&[], &ListFilter::default()), NO_TASKS);
    }

    #[test]
    fn test_everything_filtered_out() {
        let mut done = task("Done", Priority::Medium, None);
        done.complete();
        let filter = ListFilter {
            show_completed: false,
            ..Default::default()
        };

        assert_eq!(render_list(&[done], &filter), NOTHING_TO_DISPLAY);
    }

    #[test]
    fn test_priority_order() {
        let tasks = vec![
            task("Low priority", Priority::Low, None),
            task("High priority", Priority::High, None),
            task("Medium priority", Priority::Medium, None),
        ];

        let out = render_list(&tasks, &ListFilter::default());
        let high = out.find("High priority").unwrap();
        let medium = out.find("Medium priority").unwrap();
        let low = out.find("Low priority").unwrap();
        assert!(high < medium && medium < low);
    }

    #[test]
    fn test_due_date_then_collection_order() {
        let tasks = vec![
            task("No date A", Priority::Medium, None),
            task("Later", Priority::Medium, Some("2025-06-01")),
            task("No date B", Priority::Medium, None),
            task("Sooner", Priority::Medium, Some("2025-01-15")),
        ];
        let mut refs: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut refs);

        let order: Vec<&str> = refs.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["Sooner", "Later", "No date A", "No date B"]);
    }

    #[test]
    fn test_flat_line_format() {
        plain();
        let mut t = task("Pay rent", Priority::High, Some("2024-12-31"));
        t.tags = vec!["home".to_string(), "money".to_string()];

        assert_eq!(
            render_task(1, &t),
            "1. [ ] [high] Pay rent Due: 2024-12-31 Tags: home, money #ffff0000"
        );

        let mut done = task("Walk dog", Priority::Low, None);
        done.complete();
        assert_eq!(render_task(2, &done), "2. [✓] [low] Walk dog #ffff0000");
    }

    #[test]
    fn test_grouping_by_category() {
        plain();
        let mut a = task("Report", Priority::Low, None);
        a.category = Some("work".to_string());
        let b = task("Groceries", Priority::High, None);
        let mut c = task("Standup", Priority::High, None);
        c.category = Some("work".to_string());

        let out = render_list(&[a, b, c], &ListFilter::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Uncategorized:",
                "  1. [ ] [high] Groceries #ffff0000",
                "",
                "work:",
                "  1. [ ] [high] Standup #ffff0000",
                "  2. [ ] [low] Report #ffff0000",
            ]
        );
    }

    #[test]
    fn test_group_by_category_first_encounter() {
        let mut a = task("A", Priority::Medium, None);
        a.category = Some("home".to_string());
        let mut b = task("B", Priority::Medium, None);
        b.category = Some("work".to_string());
        let mut c = task("C", Priority::Medium, None);
        c.category = Some("home".to_string());
        let refs = vec![&a, &b, &c];

        let groups = group_by_category(&refs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "home");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "work");
    }

    #[test]
    fn test_empty_due_date_and_category_render_as_unset() {
        plain();
        let mut blank = task("Hand edited", Priority::Medium, Some(""));
        blank.category = Some(String::new());
        let dated = task("Dated", Priority::Medium, Some("2025-03-01"));

        assert_eq!(render_task(1, &blank), "1. [ ] [medium] Hand edited #ffff0000");

        let out = render_list(&[blank, dated], &ListFilter::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1. [ ] [medium] Dated Due: 2025-03-01 #ffff0000",
                "2. [ ] [medium] Hand edited #ffff0000",
            ]
        );
    }
}
