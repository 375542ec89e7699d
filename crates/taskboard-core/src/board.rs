//! Board State Container
//!
//! Groups the task list into the three status columns and tracks the
//! transient drag/drop and modal state of the board. Nothing here talks to
//! the network: a completed drop yields a [`StatusTransition`] for the caller
//! to run.

use crate::models::{Task, TaskStatus};

/// A status change requested by a gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub task_id: String,
    pub status: TaskStatus,
}

/// Which task modal is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardModal {
    CreateTask { initial_status: TaskStatus },
    EditTask(String),
}

/// Browser drop effect to advertise while hovering a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Move,
}

impl DropEffect {
    pub fn as_str(self) -> &'static str {
        match self {
            DropEffect::Move => "move",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn title(&self) -> &'static str {
        self.status.title()
    }

    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    tasks: Vec<Task>,
    drag_subject: Option<String>,
    drop_target: Option<TaskStatus>,
    modal: Option<BoardModal>,
}

impl BoardState {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, ..Default::default() }
    }

    /// Replace the task list with the client's current view
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Fixed TODO / IN_PROGRESS / DONE grouping, list order kept inside a column
    pub fn columns(&self) -> [Column; 3] {
        TaskStatus::ALL.map(|status| self.column(status))
    }

    pub fn column(&self, status: TaskStatus) -> Column {
        Column {
            status,
            tasks: self.tasks.iter().filter(|t| t.status == status).cloned().collect(),
        }
    }

    /// Badge counts in column order
    pub fn counts(&self) -> [usize; 3] {
        self.columns().map(|c| c.count())
    }

    // ========================
    // Drag and drop
    // ========================

    pub fn drag_subject(&self) -> Option<&str> {
        self.drag_subject.as_deref()
    }

    pub fn drop_target(&self) -> Option<TaskStatus> {
        self.drop_target
    }

    pub fn is_dragging(&self, task_id: &str) -> bool {
        self.drag_subject.as_deref() == Some(task_id)
    }

    pub fn is_drop_target(&self, status: TaskStatus) -> bool {
        self.drop_target == Some(status)
    }

    pub fn drag_start(&mut self, task_id: &str) {
        self.drag_subject = Some(task_id.to_string());
    }

    pub fn drag_enter(&mut self, status: TaskStatus) {
        self.drop_target = Some(status);
    }

    pub fn drag_over(&self) -> DropEffect {
        DropEffect::Move
    }

    /// Only the highlight goes away, the gesture is still in progress
    pub fn drag_leave(&mut self) {
        self.drop_target = None;
    }

    /// Gesture ended without a drop on a column
    pub fn drag_end(&mut self) {
        self.drag_subject = None;
        self.drop_target = None;
    }

    /// Finish the gesture over `status`. Drag state is cleared either way.
    pub fn drop_on(&mut self, status: TaskStatus) -> Option<StatusTransition> {
        let subject = self.drag_subject.take();
        self.drop_target = None;
        self.request_move(subject.as_deref()?, status)
    }

    /// Shared guard for drops and arrow buttons: unknown tasks and
    /// same-status moves produce nothing
    pub fn request_move(&self, task_id: &str, status: TaskStatus) -> Option<StatusTransition> {
        let task = self.task(task_id)?;
        if task.status == status {
            return None;
        }
        Some(StatusTransition {
            task_id: task.id.clone(),
            status,
        })
    }

    // ========================
    // Modals
    // ========================

    pub fn modal(&self) -> Option<&BoardModal> {
        self.modal.as_ref()
    }

    pub fn open_create(&mut self, initial_status: TaskStatus) {
        self.modal = Some(BoardModal::CreateTask { initial_status });
    }

    pub fn open_edit(&mut self, task_id: &str) {
        self.modal = Some(BoardModal::EditTask(task_id.to_string()));
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }
}

/// Arrow shortcuts shown on a card: (label, tooltip, target status)
pub fn arrow_moves(status: TaskStatus) -> Vec<(&'static str, &'static str, TaskStatus)> {
    let mut moves = Vec::with_capacity(2);
    if status != TaskStatus::Todo {
        moves.push(("←", "Move to To Do", TaskStatus::Todo));
    }
    if status != TaskStatus::Done {
        moves.push(("→", "Move to Done", TaskStatus::Done));
    }
    moves
}
