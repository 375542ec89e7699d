//! Data Models
//!
//! Entities as returned by the GraphQL backend (camelCase on the wire).

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Project lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [Self::Active, Self::OnHold, Self::Completed];

    /// Wire value, e.g. `ON_HOLD`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::OnHold => "ON_HOLD",
        }
    }

    /// Badge text: the wire value with underscores turned into spaces
    pub fn badge_label(self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Option text in the status select
    pub fn option_label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Active => "status-active",
            Self::Completed => "status-completed",
            Self::OnHold => "status-on-hold",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Task workflow state, one per board column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Column order on the board
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Accent color used by the column header
    pub fn color(self) -> &'static str {
        match self {
            Self::Todo => "slate",
            Self::InProgress => "purple",
            Self::Done => "green",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub task_count: u32,
    #[serde(default)]
    pub completed_tasks: u32,
    #[serde(default)]
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Project {
    /// Completed share in percent; 0 when the project has no tasks
    pub fn progress_percent(&self) -> f64 {
        if self.task_count == 0 {
            return 0.0;
        }
        f64::from(self.completed_tasks) / f64::from(self.task_count) * 100.0
    }

    /// Value of the CSS `width` property for the progress bar
    pub fn progress_width(&self) -> String {
        format!("{}%", self.progress_percent())
    }

    pub fn description_or_placeholder(&self) -> &str {
        if self.description.is_empty() {
            "No description"
        } else {
            &self.description
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee_email: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_projects: u32,
    pub active_projects: u32,
    pub completed_projects: u32,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub completion_rate: f64,
}

impl ProjectStats {
    /// Completion rate with no decimals, e.g. `67%`
    pub fn completion_label(&self) -> String {
        format!("{:.0}%", self.completion_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    pub id: String,
    pub content: String,
    pub author_email: String,
    pub created_at: String,
}

/// Parse a backend date (`YYYY-MM-DD` or RFC 3339) into a calendar date
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Short due date for cards, e.g. `Mar 05`
pub fn format_due_short(value: &str) -> Option<String> {
    parse_due_date(value).map(|d| d.format("%b %d").to_string())
}

/// Long due date for headers, e.g. `Mar 05, 2025`
pub fn format_due_long(value: &str) -> Option<String> {
    parse_due_date(value).map(|d| d.format("%b %d, %Y").to_string())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn task(id: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: String::new(),
            status,
            assignee_email: String::new(),
            due_date: None,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
            updated_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    pub fn project(id: &str, task_count: u32, completed_tasks: u32) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {}", id),
            description: String::new(),
            status: ProjectStatus::Active,
            task_count,
            completed_tasks,
            due_date: None,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
            updated_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::project;
    use super::*;

    #[test]
    fn test_progress_zero_tasks() {
        let p = project("1", 0, 0);
        assert_eq!(p.progress_percent(), 0.0);
        assert_eq!(p.progress_width(), "0%");
    }

    #[test]
    fn test_progress_three_of_four() {
        let p = project("1", 4, 3);
        assert_eq!(p.progress_percent(), 75.0);
        assert_eq!(p.progress_width(), "75%");
    }

    #[test]
    fn test_project_counts_default_to_zero() {
        let json = serde_json::json!({
            "id": "7",
            "name": "Launch",
            "description": "",
            "status": "ON_HOLD",
            "dueDate": null,
            "createdAt": "2025-01-01T00:00:00+00:00",
            "updatedAt": "2025-01-01T00:00:00+00:00"
        });
        let p: Project = serde_json::from_value(json).unwrap();
        assert_eq!(p.task_count, 0);
        assert_eq!(p.completed_tasks, 0);
        assert_eq!(p.status, ProjectStatus::OnHold);
        assert_eq!(p.status.badge_label(), "ON HOLD");
    }

    #[test]
    fn test_task_status_wire_names() {
        let s: TaskStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(s, TaskStatus::InProgress);
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"DONE\"");
        assert_eq!(TaskStatus::parse("TODO"), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::parse("todo"), None);
    }

    #[test]
    fn test_due_date_formats() {
        assert_eq!(format_due_short("2025-03-05").as_deref(), Some("Mar 05"));
        assert_eq!(
            format_due_long("2025-03-05T00:00:00+00:00").as_deref(),
            Some("Mar 05, 2025")
        );
        assert_eq!(format_due_short("soon"), None);
    }

    #[test]
    fn test_completion_label() {
        let stats = ProjectStats { completion_rate: 66.7, ..Default::default() };
        assert_eq!(stats.completion_label(), "67%");
    }
}
