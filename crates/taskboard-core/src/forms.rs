//! Project and Task Form State
//!
//! Field values, per-field validation errors and the mutation a valid form
//! turns into. Views own a form value and feed it input events.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::SecondsFormat;
use log::error;
use regex::Regex;
use thiserror::Error;

use crate::client::TrackerClient;
use crate::error::{join_errors, ClientError};
use crate::graphql::*;
use crate::models::{parse_due_date, Project, ProjectStatus, Task, TaskStatus};
use crate::transport::Transport;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Title,
    Description,
    Status,
    AssigneeEmail,
    DueDate,
}

/// Field-level validation messages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn set(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("{}", join_errors(.0))]
    Rejected(Vec<String>),

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid date")]
pub struct InvalidDate;

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// `YYYY-MM-DD` for `Date` arguments
pub fn normalize_date_only(input: &str) -> Result<Option<String>, InvalidDate> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let date = parse_due_date(input).ok_or(InvalidDate)?;
    Ok(Some(date.format("%Y-%m-%d").to_string()))
}

/// Midnight UTC timestamp for `DateTime` arguments, e.g. `2025-03-05T00:00:00.000Z`
pub fn normalize_timestamp(input: &str) -> Result<Option<String>, InvalidDate> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let date = parse_due_date(input).ok_or(InvalidDate)?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or(InvalidDate)?;
    Ok(Some(midnight.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true)))
}

/// Date input value for a stored date: the part before `T`
fn date_input_value(stored: Option<&str>) -> String {
    stored
        .and_then(|d| d.split('T').next())
        .unwrap_or_default()
        .to_string()
}

// ========================
// Project form
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectSubmission {
    Create(CreateProjectInput),
    Update(UpdateProjectInput),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    editing: Option<String>,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub due_date: String,
    errors: FieldErrors,
    submit_error: Option<String>,
    submitting: bool,
}

impl ProjectForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(project: &Project) -> Self {
        Self {
            editing: Some(project.id.clone()),
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            due_date: date_input_value(project.due_date.as_deref()),
            ..Default::default()
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_edit() { "Edit Project" } else { "New Project" }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.submitting, self.is_edit()) {
            (true, _) => "Saving...",
            (false, true) => "Update Project",
            (false, false) => "Create Project",
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Store an edited value and drop that field's error
    pub fn set_field(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Name => self.name = value.to_string(),
            FormField::Description => self.description = value.to_string(),
            FormField::Status => {
                if let Some(status) = ProjectStatus::parse(value) {
                    self.status = status;
                }
            }
            FormField::DueDate => self.due_date = value.to_string(),
            FormField::Title | FormField::AssigneeEmail => return,
        }
        self.errors.clear(field);
    }

    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.set(FormField::Name, "Project name is required");
        }
        if normalize_date_only(&self.due_date).is_err() {
            errors.set(FormField::DueDate, "Invalid date");
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and build the mutation. `None` means nothing may be sent.
    pub fn prepare(&mut self, organization_slug: &str) -> Option<ProjectSubmission> {
        if !self.validate() {
            return None;
        }
        let due_date = normalize_date_only(&self.due_date).ok()?;
        self.submit_error = None;
        self.submitting = true;

        Some(match &self.editing {
            Some(id) => ProjectSubmission::Update(UpdateProjectInput {
                id: id.clone(),
                organization_slug: organization_slug.to_string(),
                name: Some(self.name.clone()),
                description: Some(self.description.clone()),
                status: Some(self.status),
                due_date: Some(due_date),
            }),
            None => ProjectSubmission::Create(CreateProjectInput {
                organization_slug: organization_slug.to_string(),
                name: self.name.clone(),
                description: self.description.clone(),
                status: self.status,
                due_date,
            }),
        })
    }

    /// Keep the form open and populated with a banner message
    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.submit_error = Some(message);
    }
}

pub async fn submit_project<T: Transport>(
    client: &TrackerClient<T>,
    submission: &ProjectSubmission,
) -> Result<Project, SubmitError> {
    let outcome = match submission {
        ProjectSubmission::Create(input) => client.create_project(input).await,
        ProjectSubmission::Update(input) => client.update_project(input).await,
    };
    settle("project", outcome)
}

// ========================
// Task form
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum TaskSubmission {
    Create(CreateTaskInput),
    Update(UpdateTaskInput),
}

#[derive(Debug, Clone, PartialEq)]
enum TaskTarget {
    New { project_id: String },
    Existing { task_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    target: TaskTarget,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assignee_email: String,
    pub due_date: String,
    errors: FieldErrors,
    submit_error: Option<String>,
    submitting: bool,
}

impl TaskForm {
    pub fn create(project_id: &str, initial_status: TaskStatus) -> Self {
        Self {
            target: TaskTarget::New { project_id: project_id.to_string() },
            title: String::new(),
            description: String::new(),
            status: initial_status,
            assignee_email: String::new(),
            due_date: String::new(),
            errors: FieldErrors::default(),
            submit_error: None,
            submitting: false,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            target: TaskTarget::Existing { task_id: task.id.clone() },
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            assignee_email: task.assignee_email.clone(),
            due_date: date_input_value(task.due_date.as_deref()),
            errors: FieldErrors::default(),
            submit_error: None,
            submitting: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.target, TaskTarget::Existing { .. })
    }

    pub fn heading(&self) -> &'static str {
        if self.is_edit() { "Edit Task" } else { "Create New Task" }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.submitting, self.is_edit()) {
            (true, _) => "Saving...",
            (false, true) => "Update Task",
            (false, false) => "Create Task",
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_field(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Title => self.title = value.to_string(),
            FormField::Description => self.description = value.to_string(),
            FormField::Status => {
                if let Some(status) = TaskStatus::parse(value) {
                    self.status = status;
                }
            }
            FormField::AssigneeEmail => self.assignee_email = value.to_string(),
            FormField::DueDate => self.due_date = value.to_string(),
            FormField::Name => return,
        }
        self.errors.clear(field);
    }

    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();
        if self.title.trim().is_empty() {
            errors.set(FormField::Title, "Task title is required");
        }
        if !self.assignee_email.is_empty() && !is_valid_email(&self.assignee_email) {
            errors.set(FormField::AssigneeEmail, "Invalid email address");
        }
        if normalize_timestamp(&self.due_date).is_err() {
            errors.set(FormField::DueDate, "Invalid date");
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    pub fn prepare(&mut self) -> Option<TaskSubmission> {
        if !self.validate() {
            return None;
        }
        let due_date = normalize_timestamp(&self.due_date).ok()?;
        self.submit_error = None;
        self.submitting = true;

        Some(match &self.target {
            TaskTarget::New { project_id } => TaskSubmission::Create(CreateTaskInput {
                project_id: project_id.clone(),
                title: self.title.clone(),
                description: self.description.clone(),
                status: self.status,
                assignee_email: self.assignee_email.clone(),
                due_date,
            }),
            TaskTarget::Existing { task_id } => TaskSubmission::Update(UpdateTaskInput {
                id: task_id.clone(),
                title: Some(self.title.clone()),
                description: Some(self.description.clone()),
                status: Some(self.status),
                assignee_email: Some(self.assignee_email.clone()),
                due_date: Some(due_date),
            }),
        })
    }

    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.submit_error = Some(message);
    }
}

pub async fn submit_task<T: Transport>(
    client: &TrackerClient<T>,
    submission: &TaskSubmission,
) -> Result<Task, SubmitError> {
    let outcome = match submission {
        TaskSubmission::Create(input) => client.create_task(input).await,
        TaskSubmission::Update(input) => client.update_task(input).await,
    };
    settle("task", outcome)
}

fn settle<E>(entity: &str, outcome: Result<MutationOutcome<E>, ClientError>) -> Result<E, SubmitError> {
    match outcome {
        Ok(MutationOutcome::Ok(saved)) => Ok(saved),
        Ok(MutationOutcome::Failed(errors)) => {
            error!("Error saving {}: {}", entity, join_errors(&errors));
            Err(SubmitError::Rejected(errors))
        }
        Err(err) => {
            error!("Error saving {}: {}", entity, err);
            Err(err.into())
        }
    }
}

#[cfg(test)]
#[path = "forms_tests.rs"]
mod tests;
