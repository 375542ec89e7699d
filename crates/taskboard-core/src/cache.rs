//! Normalized Entity Cache
//!
//! Entities are stored once by id; query results keep ordered id lists.
//! Optimistic writes live in separate layers on top of the authoritative
//! entities, so rolling one back restores exactly what was visible before it.

use std::collections::HashMap;

use crate::models::{Project, ProjectStats, Task, TaskStatus};

/// Identity of a `tasks(projectId, organizationSlug)` result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskListKey {
    pub project_id: String,
    pub organization_slug: String,
}

impl TaskListKey {
    pub fn new(project_id: impl Into<String>, organization_slug: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            organization_slug: organization_slug.into(),
        }
    }
}

/// Handle for one optimistic layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptimisticToken(u64);

#[derive(Debug, Clone)]
struct OptimisticLayer {
    token: OptimisticToken,
    task_id: String,
    status: TaskStatus,
}

#[derive(Debug, Default)]
pub struct Cache {
    tasks: HashMap<String, Task>,
    projects: HashMap<String, Project>,
    task_lists: HashMap<TaskListKey, Vec<String>>,
    /// Project id lists keyed by organization slug
    project_lists: HashMap<String, Vec<String>>,
    /// Whether `project(id, organizationSlug)` found the project; `(org, id)`
    project_scopes: HashMap<(String, String), bool>,
    stats: HashMap<String, ProjectStats>,
    layers: Vec<OptimisticLayer>,
    next_token: u64,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Tasks
    // ========================

    pub fn write_task(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    pub fn write_task_list(&mut self, key: TaskListKey, tasks: Vec<Task>) {
        let ids = tasks.iter().map(|t| t.id.clone()).collect();
        for task in tasks {
            self.write_task(task);
        }
        self.task_lists.insert(key, ids);
    }

    /// Visible task: authoritative entity with optimistic layers applied in order
    pub fn read_task(&self, id: &str) -> Option<Task> {
        let mut task = self.tasks.get(id)?.clone();
        for layer in self.layers.iter().filter(|l| l.task_id == id) {
            task.status = layer.status;
        }
        Some(task)
    }

    pub fn read_task_list(&self, key: &TaskListKey) -> Option<Vec<Task>> {
        let ids = self.task_lists.get(key)?;
        Some(ids.iter().filter_map(|id| self.read_task(id)).collect())
    }

    // ========================
    // Projects
    // ========================

    fn write_project(&mut self, project: Project) {
        self.projects.insert(project.id.clone(), project);
    }

    /// Store a project seen under `organization_slug`
    pub fn write_project_in(&mut self, organization_slug: &str, project: Project) {
        self.project_scopes
            .insert((organization_slug.to_string(), project.id.clone()), true);
        self.write_project(project);
    }

    /// Remember that the organization has no project `id`
    pub fn write_missing_project(&mut self, organization_slug: &str, id: &str) {
        self.project_scopes
            .insert((organization_slug.to_string(), id.to_string()), false);
    }

    pub fn write_project_list(&mut self, organization_slug: &str, projects: Vec<Project>) {
        let ids = projects.iter().map(|p| p.id.clone()).collect();
        for project in projects {
            self.write_project_in(organization_slug, project);
        }
        self.project_lists.insert(organization_slug.to_string(), ids);
    }

    pub fn read_project(&self, id: &str) -> Option<Project> {
        self.projects.get(id).cloned()
    }

    /// Project `id` as visible to `organization_slug`. Projects never seen
    /// under that organization read as `None`.
    pub fn read_project_in(&self, id: &str, organization_slug: &str) -> Option<Project> {
        let scope = (organization_slug.to_string(), id.to_string());
        match self.project_scopes.get(&scope) {
            Some(true) => self.read_project(id),
            _ => None,
        }
    }

    pub fn read_project_list(&self, organization_slug: &str) -> Option<Vec<Project>> {
        let ids = self.project_lists.get(organization_slug)?;
        Some(ids.iter().filter_map(|id| self.read_project(id)).collect())
    }

    // ========================
    // Stats
    // ========================

    pub fn write_stats(&mut self, organization_slug: &str, stats: ProjectStats) {
        self.stats.insert(organization_slug.to_string(), stats);
    }

    pub fn read_stats(&self, organization_slug: &str) -> Option<ProjectStats> {
        self.stats.get(organization_slug).cloned()
    }

    // ========================
    // Optimistic layers
    // ========================

    /// Overlay a status on a cached task. `None` when the task is not cached.
    pub fn apply_optimistic_status(&mut self, task_id: &str, status: TaskStatus) -> Option<OptimisticToken> {
        if !self.tasks.contains_key(task_id) {
            return None;
        }
        self.next_token += 1;
        let token = OptimisticToken(self.next_token);
        self.layers.push(OptimisticLayer {
            token,
            task_id: task_id.to_string(),
            status,
        });
        Some(token)
    }

    /// Drop a layer once the authoritative entity has been written
    pub fn commit(&mut self, token: OptimisticToken) -> bool {
        self.remove_layer(token)
    }

    /// Drop a layer without an authoritative write, restoring the prior view
    pub fn rollback(&mut self, token: OptimisticToken) -> bool {
        self.remove_layer(token)
    }

    pub fn has_pending_layers(&self) -> bool {
        !self.layers.is_empty()
    }

    fn remove_layer(&mut self, token: OptimisticToken) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.token != token);
        self.layers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{project, task};

    fn key() -> TaskListKey {
        TaskListKey::new("p1", "acme-corp")
    }

    #[test]
    fn test_task_list_preserves_order() {
        let mut cache = Cache::new();
        cache.write_task_list(key(), vec![task("b", TaskStatus::Todo), task("a", TaskStatus::Done)]);
        let ids: Vec<_> = cache.read_task_list(&key()).unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_entity_shared_between_lists() {
        let mut cache = Cache::new();
        cache.write_task_list(key(), vec![task("1", TaskStatus::Todo)]);
        let mut updated = task("1", TaskStatus::Todo);
        updated.title = "Renamed".into();
        cache.write_task(updated);
        assert_eq!(cache.read_task_list(&key()).unwrap()[0].title, "Renamed");
    }

    #[test]
    fn test_optimistic_layer_visible_then_rolled_back() {
        let mut cache = Cache::new();
        cache.write_task_list(key(), vec![task("1", TaskStatus::Todo)]);

        let token = cache.apply_optimistic_status("1", TaskStatus::Done).unwrap();
        assert_eq!(cache.read_task("1").unwrap().status, TaskStatus::Done);

        assert!(cache.rollback(token));
        assert_eq!(cache.read_task("1").unwrap().status, TaskStatus::Todo);
        assert!(!cache.has_pending_layers());
    }

    #[test]
    fn test_layer_survives_refetch_until_committed() {
        let mut cache = Cache::new();
        cache.write_task_list(key(), vec![task("1", TaskStatus::Todo)]);
        let token = cache.apply_optimistic_status("1", TaskStatus::InProgress).unwrap();

        // stale refetch lands while the mutation is still outstanding
        cache.write_task_list(key(), vec![task("1", TaskStatus::Todo)]);
        assert_eq!(cache.read_task("1").unwrap().status, TaskStatus::InProgress);

        cache.write_task(task("1", TaskStatus::InProgress));
        assert!(cache.commit(token));
        assert_eq!(cache.read_task("1").unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_rollback_of_inner_layer_keeps_outer() {
        let mut cache = Cache::new();
        cache.write_task(task("1", TaskStatus::Todo));
        let first = cache.apply_optimistic_status("1", TaskStatus::InProgress).unwrap();
        let _second = cache.apply_optimistic_status("1", TaskStatus::Done).unwrap();

        cache.rollback(first);
        assert_eq!(cache.read_task("1").unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn test_optimistic_on_unknown_task() {
        let mut cache = Cache::new();
        assert!(cache.apply_optimistic_status("missing", TaskStatus::Done).is_none());
        assert!(!cache.rollback(OptimisticToken(42)));
    }

    #[test]
    fn test_project_list_and_stats() {
        let mut cache = Cache::new();
        cache.write_project_list("acme-corp", vec![project("1", 4, 3), project("2", 0, 0)]);
        assert_eq!(cache.read_project_list("acme-corp").unwrap().len(), 2);
        assert!(cache.read_project_list("techstart").is_none());
        assert_eq!(cache.read_project("1").unwrap().completed_tasks, 3);

        cache.write_stats("acme-corp", ProjectStats { total_projects: 2, ..Default::default() });
        assert_eq!(cache.read_stats("acme-corp").unwrap().total_projects, 2);
    }

    #[test]
    fn test_project_reads_are_scoped_by_organization() {
        let mut cache = Cache::new();
        cache.write_project_in("acme-corp", project("1", 2, 1));
        assert!(cache.read_project_in("1", "acme-corp").is_some());
        assert!(cache.read_project_in("1", "techstart").is_none());

        cache.write_missing_project("techstart", "1");
        assert!(cache.read_project_in("1", "techstart").is_none());
        assert!(cache.read_project_in("1", "acme-corp").is_some());

        cache.write_project_list("techstart", vec![project("7", 0, 0)]);
        assert!(cache.read_project_in("7", "techstart").is_some());
    }
}
