//! Mutation Documents, Inputs and Payloads

use serde::{Deserialize, Serialize};

use crate::models::{ProjectStatus, TaskStatus};

pub const CREATE_PROJECT: &str = r#"
mutation CreateProject(
  $organizationSlug: String!
  $name: String!
  $description: String
  $status: String
  $dueDate: Date
) {
  createProject(
    organizationSlug: $organizationSlug
    name: $name
    description: $description
    status: $status
    dueDate: $dueDate
  ) {
    success
    errors
    project {
      id
      name
      description
      status
      dueDate
      taskCount
      completedTasks
      createdAt
      updatedAt
    }
  }
}
"#;

pub const UPDATE_PROJECT: &str = r#"
mutation UpdateProject(
  $id: ID!
  $organizationSlug: String!
  $name: String
  $description: String
  $status: String
  $dueDate: Date
) {
  updateProject(
    id: $id
    organizationSlug: $organizationSlug
    name: $name
    description: $description
    status: $status
    dueDate: $dueDate
  ) {
    success
    errors
    project {
      id
      name
      description
      status
      dueDate
      taskCount
      completedTasks
      createdAt
      updatedAt
    }
  }
}
"#;

pub const CREATE_TASK: &str = r#"
mutation CreateTask(
  $projectId: ID!
  $title: String!
  $description: String
  $status: String
  $assigneeEmail: String
  $dueDate: DateTime
) {
  createTask(
    projectId: $projectId
    title: $title
    description: $description
    status: $status
    assigneeEmail: $assigneeEmail
    dueDate: $dueDate
  ) {
    success
    errors
    task {
      id
      title
      description
      status
      assigneeEmail
      dueDate
      createdAt
      updatedAt
    }
  }
}
"#;

pub const UPDATE_TASK: &str = r#"
mutation UpdateTask(
  $id: ID!
  $title: String
  $description: String
  $status: String
  $assigneeEmail: String
  $dueDate: DateTime
) {
  updateTask(
    id: $id
    title: $title
    description: $description
    status: $status
    assigneeEmail: $assigneeEmail
    dueDate: $dueDate
  ) {
    success
    errors
    task {
      id
      title
      description
      status
      assigneeEmail
      dueDate
      createdAt
      updatedAt
    }
  }
}
"#;

pub const ADD_COMMENT: &str = r#"
mutation AddComment($taskId: ID!, $content: String!, $authorEmail: String!) {
  addComment(taskId: $taskId, content: $content, authorEmail: $authorEmail) {
    success
    errors
    comment {
      id
      content
      authorEmail
      createdAt
    }
  }
}
"#;

// ========================
// Inputs
// ========================

/// `dueDate` is always sent, `null` clears it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    pub organization_slug: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    pub id: String,
    pub organization_slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    /// Outer `None` leaves the date untouched, `Some(None)` sends `null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    pub project_id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub assignee_email: String,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
}

impl UpdateTaskInput {
    /// Status-only update issued by the board
    pub fn status(id: &str, status: TaskStatus) -> Self {
        Self {
            id: id.to_string(),
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentInput {
    pub task_id: String,
    pub content: String,
    pub author_email: String,
}

// ========================
// Payloads
// ========================

/// Result of a mutation after inspecting `success` and `errors`
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    Ok(T),
    Failed(Vec<String>),
}

/// `{ success, errors, <entity> }` as returned by every mutation
#[derive(Debug, Deserialize)]
pub struct MutationPayload<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    /// Absent from the reply deserializes as `None`
    #[serde(alias = "project", alias = "task", alias = "comment")]
    pub entity: Option<T>,
}

impl<T> MutationPayload<T> {
    /// A payload only counts as success when the flag is set and the entity came back
    pub fn into_outcome(self) -> MutationOutcome<T> {
        match (self.success, self.entity) {
            (Some(true), Some(entity)) => MutationOutcome::Ok(entity),
            _ => MutationOutcome::Failed(self.errors.unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TaskComment};
    use serde_json::json;

    #[test]
    fn test_create_project_input_sends_nulls() {
        let input = CreateProjectInput {
            organization_slug: "acme-corp".into(),
            name: "Launch".into(),
            description: String::new(),
            status: ProjectStatus::Active,
            due_date: None,
        };
        let v = serde_json::to_value(&input).unwrap();
        assert_eq!(
            v,
            json!({
                "organizationSlug": "acme-corp",
                "name": "Launch",
                "description": "",
                "status": "ACTIVE",
                "dueDate": null
            })
        );
    }

    #[test]
    fn test_status_update_only_sends_id_and_status() {
        let v = serde_json::to_value(UpdateTaskInput::status("9", TaskStatus::Done)).unwrap();
        assert_eq!(v, json!({ "id": "9", "status": "DONE" }));
    }

    #[test]
    fn test_update_clears_due_date_with_null() {
        let input = UpdateTaskInput {
            id: "1".into(),
            due_date: Some(None),
            ..Default::default()
        };
        let v = serde_json::to_value(&input).unwrap();
        assert_eq!(v, json!({ "id": "1", "dueDate": null }));
    }

    #[test]
    fn test_payload_failure_is_not_success() {
        let payload: MutationPayload<Task> = serde_json::from_value(json!({
            "success": false,
            "errors": ["Task not found"],
            "task": null
        }))
        .unwrap();
        assert_eq!(payload.into_outcome(), MutationOutcome::Failed(vec!["Task not found".into()]));
    }

    #[test]
    fn test_payload_success_without_entity_fails() {
        let payload: MutationPayload<Task> =
            serde_json::from_value(json!({ "success": true, "errors": null, "task": null })).unwrap();
        assert_eq!(payload.into_outcome(), MutationOutcome::Failed(vec![]));
    }

    #[test]
    fn test_payload_without_entity_field_decodes() {
        let payload: MutationPayload<TaskComment> =
            serde_json::from_value(json!({ "success": false, "errors": ["Task not found"] })).unwrap();
        assert!(payload.entity.is_none());
        assert_eq!(payload.into_outcome(), MutationOutcome::Failed(vec!["Task not found".into()]));
    }
}
