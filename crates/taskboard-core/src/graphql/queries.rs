//! Query Documents

use serde::Serialize;

pub const GET_PROJECTS: &str = r#"
query GetProjects($organizationSlug: String!) {
  projects(organizationSlug: $organizationSlug) {
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
"#;

pub const GET_PROJECT: &str = r#"
query GetProject($id: ID!, $organizationSlug: String!) {
  project(id: $id, organizationSlug: $organizationSlug) {
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
"#;

pub const GET_TASKS: &str = r#"
query GetTasks($projectId: ID!, $organizationSlug: String!) {
  tasks(projectId: $projectId, organizationSlug: $organizationSlug) {
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
"#;

pub const GET_PROJECT_STATS: &str = r#"
query GetProjectStats($organizationSlug: String!) {
  projectStats(organizationSlug: $organizationSlug) {
    totalProjects
    activeProjects
    completedProjects
    totalTasks
    completedTasks
    completionRate
  }
}
"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationVars<'a> {
    pub organization_slug: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVars<'a> {
    pub id: &'a str,
    pub organization_slug: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksVars<'a> {
    pub project_id: &'a str,
    pub organization_slug: &'a str,
}
