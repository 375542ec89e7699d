//! GraphQL Client
//!
//! Issues queries and mutations through a [`Transport`], keeps the normalized
//! [`Cache`] current and tells watchers whenever the visible data changes.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error};
use serde::de::DeserializeOwned;

use crate::cache::{Cache, OptimisticToken, TaskListKey};
use crate::error::ClientResult;
use crate::graphql::*;
use crate::models::{Project, ProjectStats, Task, TaskComment, TaskStatus};
use crate::transport::Transport;

/// Callback run after every visible cache change
pub type Watcher = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Per-task marker held while a status mutation and its refetch are outstanding
#[derive(Debug, Default, Clone)]
pub struct InFlight {
    tasks: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    /// `None` when the task is already marked
    pub fn try_begin(&self, task_id: &str) -> Option<InFlightGuard> {
        if !lock(&self.tasks).insert(task_id.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            tasks: Arc::clone(&self.tasks),
            task_id: task_id.to_string(),
        })
    }

    pub fn contains(&self, task_id: &str) -> bool {
        lock(&self.tasks).contains(task_id)
    }
}

/// Clears the marker when dropped
#[derive(Debug)]
pub struct InFlightGuard {
    tasks: Arc<Mutex<HashSet<String>>>,
    task_id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.tasks).remove(&self.task_id);
    }
}

pub struct TrackerClient<T> {
    transport: T,
    cache: Mutex<Cache>,
    watchers: Mutex<Vec<(WatchId, Watcher)>>,
    next_watch: AtomicU64,
    in_flight: InFlight,
}

impl<T: Transport> TrackerClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: Mutex::new(Cache::new()),
            watchers: Mutex::new(Vec::new()),
            next_watch: AtomicU64::new(1),
            in_flight: InFlight::default(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    // ========================
    // Watchers
    // ========================

    pub fn watch(&self, watcher: Watcher) -> WatchId {
        let id = WatchId(self.next_watch.fetch_add(1, Ordering::Relaxed));
        lock(&self.watchers).push((id, watcher));
        id
    }

    pub fn unwatch(&self, id: WatchId) {
        lock(&self.watchers).retain(|(w, _)| *w != id);
    }

    fn notify(&self) {
        // Snapshot first: a watcher may register or remove watchers
        let watchers: Vec<Watcher> = lock(&self.watchers).iter().map(|(_, w)| Arc::clone(w)).collect();
        for watcher in watchers {
            watcher();
        }
    }

    fn write_cache(&self, f: impl FnOnce(&mut Cache)) {
        f(&mut lock(&self.cache));
        self.notify();
    }

    // ========================
    // Transport
    // ========================

    async fn execute<R: DeserializeOwned>(&self, request: GraphQlRequest, root_field: &'static str) -> ClientResult<R> {
        debug!("[CLIENT] {}", request.operation_name);
        let payload = request.to_payload()?;
        let body = self.transport.send(payload).await.map_err(|e| {
            error!("[Network error]: {}", e);
            e
        })?;
        decode_response(body, root_field)
    }

    async fn mutate<R: DeserializeOwned>(&self, request: GraphQlRequest, root_field: &'static str) -> ClientResult<MutationOutcome<R>> {
        let payload: MutationPayload<R> = self.execute(request, root_field).await?;
        let outcome = payload.into_outcome();
        if let MutationOutcome::Failed(errors) = &outcome {
            error!("[CLIENT] {} rejected: {:?}", root_field, errors);
        }
        Ok(outcome)
    }

    // ========================
    // Queries
    // ========================

    pub async fn projects(&self, organization_slug: &str) -> ClientResult<Vec<Project>> {
        let request = GraphQlRequest::new("GetProjects", GET_PROJECTS, &OrganizationVars { organization_slug })?;
        let projects: Vec<Project> = self.execute(request, "projects").await?;
        self.write_cache(|c| c.write_project_list(organization_slug, projects.clone()));
        Ok(projects)
    }

    pub async fn project(&self, id: &str, organization_slug: &str) -> ClientResult<Option<Project>> {
        let request = GraphQlRequest::new("GetProject", GET_PROJECT, &ProjectVars { id, organization_slug })?;
        let project: Option<Project> = self.execute(request, "project").await?;
        match &project {
            Some(p) => {
                let p = p.clone();
                self.write_cache(|c| c.write_project_in(organization_slug, p));
            }
            None => self.write_cache(|c| c.write_missing_project(organization_slug, id)),
        }
        Ok(project)
    }

    /// Returns the visible list, so pending optimistic moves stay applied
    pub async fn tasks(&self, key: &TaskListKey) -> ClientResult<Vec<Task>> {
        let request = GraphQlRequest::new(
            "GetTasks",
            GET_TASKS,
            &TasksVars {
                project_id: &key.project_id,
                organization_slug: &key.organization_slug,
            },
        )?;
        let tasks: Vec<Task> = self.execute(request, "tasks").await?;
        self.write_cache(|c| c.write_task_list(key.clone(), tasks));
        Ok(self.cached_tasks(key).unwrap_or_default())
    }

    pub async fn project_stats(&self, organization_slug: &str) -> ClientResult<ProjectStats> {
        let request = GraphQlRequest::new("GetProjectStats", GET_PROJECT_STATS, &OrganizationVars { organization_slug })?;
        let stats: ProjectStats = self.execute(request, "projectStats").await?;
        self.write_cache(|c| c.write_stats(organization_slug, stats.clone()));
        Ok(stats)
    }

    // ========================
    // Mutations
    // ========================

    pub async fn create_project(&self, input: &CreateProjectInput) -> ClientResult<MutationOutcome<Project>> {
        let request = GraphQlRequest::new("CreateProject", CREATE_PROJECT, input)?;
        let outcome = self.mutate::<Project>(request, "createProject").await?;
        self.store_project(&input.organization_slug, &outcome);
        Ok(outcome)
    }

    pub async fn update_project(&self, input: &UpdateProjectInput) -> ClientResult<MutationOutcome<Project>> {
        let request = GraphQlRequest::new("UpdateProject", UPDATE_PROJECT, input)?;
        let outcome = self.mutate::<Project>(request, "updateProject").await?;
        self.store_project(&input.organization_slug, &outcome);
        Ok(outcome)
    }

    pub async fn create_task(&self, input: &CreateTaskInput) -> ClientResult<MutationOutcome<Task>> {
        let request = GraphQlRequest::new("CreateTask", CREATE_TASK, input)?;
        let outcome = self.mutate::<Task>(request, "createTask").await?;
        self.store_task(&outcome);
        Ok(outcome)
    }

    pub async fn update_task(&self, input: &UpdateTaskInput) -> ClientResult<MutationOutcome<Task>> {
        let request = GraphQlRequest::new("UpdateTask", UPDATE_TASK, input)?;
        let outcome = self.mutate::<Task>(request, "updateTask").await?;
        self.store_task(&outcome);
        Ok(outcome)
    }

    pub async fn add_comment(&self, input: &AddCommentInput) -> ClientResult<MutationOutcome<TaskComment>> {
        let request = GraphQlRequest::new("AddComment", ADD_COMMENT, input)?;
        self.mutate::<TaskComment>(request, "addComment").await
    }

    fn store_project(&self, organization_slug: &str, outcome: &MutationOutcome<Project>) {
        if let MutationOutcome::Ok(project) = outcome {
            let project = project.clone();
            self.write_cache(|c| c.write_project_in(organization_slug, project));
        }
    }

    fn store_task(&self, outcome: &MutationOutcome<Task>) {
        if let MutationOutcome::Ok(task) = outcome {
            let task = task.clone();
            self.write_cache(|c| c.write_task(task));
        }
    }

    // ========================
    // Cache reads
    // ========================

    pub fn cached_projects(&self, organization_slug: &str) -> Option<Vec<Project>> {
        lock(&self.cache).read_project_list(organization_slug)
    }

    /// Only projects seen under `organization_slug` are visible
    pub fn cached_project(&self, id: &str, organization_slug: &str) -> Option<Project> {
        lock(&self.cache).read_project_in(id, organization_slug)
    }

    pub fn cached_tasks(&self, key: &TaskListKey) -> Option<Vec<Task>> {
        lock(&self.cache).read_task_list(key)
    }

    pub fn cached_task(&self, id: &str) -> Option<Task> {
        lock(&self.cache).read_task(id)
    }

    pub fn cached_stats(&self, organization_slug: &str) -> Option<ProjectStats> {
        lock(&self.cache).read_stats(organization_slug)
    }

    // ========================
    // Optimistic writes
    // ========================

    pub fn apply_optimistic_task_status(&self, task_id: &str, status: TaskStatus) -> Option<OptimisticToken> {
        let token = lock(&self.cache).apply_optimistic_status(task_id, status);
        if token.is_some() {
            self.notify();
        }
        token
    }

    pub fn commit_optimistic(&self, token: OptimisticToken) {
        if lock(&self.cache).commit(token) {
            self.notify();
        }
    }

    /// Restores the view that existed before the layer was applied
    pub fn rollback_optimistic(&self, token: OptimisticToken) {
        if lock(&self.cache).rollback(token) {
            debug!("[CLIENT] rolled back optimistic layer {:?}", token);
            self.notify();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::transport::mock::MockTransport;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn task_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Task {}", id),
            "description": "",
            "status": status,
            "assigneeEmail": "",
            "dueDate": null,
            "createdAt": "2025-01-01T00:00:00+00:00",
            "updatedAt": "2025-01-01T00:00:00+00:00"
        })
    }

    #[tokio::test]
    async fn test_tasks_query_populates_cache() {
        let mock = MockTransport::new();
        mock.reply("GetTasks", json!({ "data": { "tasks": [task_json("1", "TODO"), task_json("2", "DONE")] } }));
        let client = TrackerClient::new(mock);
        let key = TaskListKey::new("p1", "acme-corp");

        let tasks = client.tasks(&key).await.expect("query failed");
        assert_eq!(tasks.len(), 2);
        assert_eq!(client.cached_tasks(&key).unwrap()[1].status, TaskStatus::Done);

        let sent = &client.transport().requests()[0];
        assert_eq!(sent["variables"], json!({ "projectId": "p1", "organizationSlug": "acme-corp" }));
    }

    #[tokio::test]
    async fn test_watchers_notified_on_write() {
        let mock = MockTransport::new();
        mock.reply("GetProjectStats", json!({ "data": { "projectStats": {
            "totalProjects": 3, "activeProjects": 2, "completedProjects": 1,
            "totalTasks": 10, "completedTasks": 4, "completionRate": 40.0
        } } }));
        let client = TrackerClient::new(mock);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = client.watch(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        client.project_stats("acme-corp").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(client.cached_stats("acme-corp").unwrap().total_tasks, 10);

        client.unwatch(id);
        client.apply_optimistic_task_status("nope", TaskStatus::Done);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_network_error_propagates() {
        let mock = MockTransport::new();
        mock.fail("GetProjects", ClientError::Network("offline".into()));
        let client = TrackerClient::new(mock);

        let res = client.projects("acme-corp").await;
        assert_eq!(res, Err(ClientError::Network("offline".into())));
        assert!(client.cached_projects("acme-corp").is_none());
    }

    #[tokio::test]
    async fn test_failed_mutation_not_cached() {
        let mock = MockTransport::new();
        mock.reply("UpdateTask", json!({ "data": { "updateTask": {
            "success": false, "errors": ["Task not found"], "task": null
        } } }));
        let client = TrackerClient::new(mock);

        let outcome = client.update_task(&UpdateTaskInput::status("9", TaskStatus::Done)).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Failed(vec!["Task not found".into()]));
        assert!(client.cached_task("9").is_none());
    }

    #[tokio::test]
    async fn test_missing_project_is_none() {
        let mock = MockTransport::new();
        mock.reply("GetProject", json!({ "data": { "project": null } }));
        let client = TrackerClient::new(mock);
        assert_eq!(client.project("404", "acme-corp").await, Ok(None));
    }

    fn project_json(id: &str, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": "",
            "status": "ACTIVE",
            "taskCount": 2,
            "completedTasks": 1,
            "dueDate": null,
            "createdAt": "2025-01-01T00:00:00+00:00",
            "updatedAt": "2025-01-01T00:00:00+00:00"
        })
    }

    #[tokio::test]
    async fn test_project_hidden_from_other_organization() {
        let mock = MockTransport::new();
        mock.reply("GetProject", json!({ "data": { "project": project_json("1", "Acme only") } }))
            .reply("GetProject", json!({ "data": { "project": null } }));
        let client = TrackerClient::new(mock);

        assert!(client.project("1", "acme-corp").await.unwrap().is_some());
        assert_eq!(client.cached_project("1", "acme-corp").unwrap().name, "Acme only");

        assert_eq!(client.project("1", "techstart").await, Ok(None));
        assert!(client.cached_project("1", "techstart").is_none());
        assert!(client.cached_project("1", "acme-corp").is_some());
    }

    #[tokio::test]
    async fn test_add_comment_sends_variables_and_decodes_comment() {
        let mock = MockTransport::new();
        mock.reply("AddComment", json!({ "data": { "addComment": {
            "success": true,
            "errors": [],
            "comment": {
                "id": "c1",
                "content": "Looks good",
                "authorEmail": "a@b.com",
                "createdAt": "2025-01-02T00:00:00+00:00"
            }
        } } }));
        let client = TrackerClient::new(mock);
        let input = AddCommentInput {
            task_id: "4".into(),
            content: "Looks good".into(),
            author_email: "a@b.com".into(),
        };

        match client.add_comment(&input).await.unwrap() {
            MutationOutcome::Ok(comment) => {
                assert_eq!(comment.id, "c1");
                assert_eq!(comment.author_email, "a@b.com");
            }
            other => panic!("expected comment, got {:?}", other),
        }

        let sent = &client.transport().requests()[0];
        assert_eq!(sent["operationName"], "AddComment");
        assert_eq!(
            sent["variables"],
            json!({ "taskId": "4", "content": "Looks good", "authorEmail": "a@b.com" })
        );
    }

    #[tokio::test]
    async fn test_rejected_comment_is_failed() {
        let mock = MockTransport::new();
        mock.reply("AddComment", json!({ "data": { "addComment": {
            "success": false, "errors": ["Task not found"], "comment": null
        } } }));
        let client = TrackerClient::new(mock);
        let input = AddCommentInput {
            task_id: "404".into(),
            content: "Hello".into(),
            author_email: "a@b.com".into(),
        };
        let outcome = client.add_comment(&input).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Failed(vec!["Task not found".into()]));
    }

    #[test]
    fn test_in_flight_guard_releases_on_drop() {
        let in_flight = InFlight::default();
        let guard = in_flight.try_begin("1").expect("first begin");
        assert!(in_flight.contains("1"));
        assert!(in_flight.try_begin("1").is_none());
        assert!(in_flight.try_begin("2").is_some());
        drop(guard);
        assert!(!in_flight.contains("1"));
    }
}
