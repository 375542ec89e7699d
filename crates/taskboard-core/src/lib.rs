//! Taskboard Core
//!
//! Everything the board UI needs that does not touch the DOM: entity models,
//! GraphQL documents, the caching client, board state, the status transition
//! flow and form validation.

pub mod board;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod graphql;
pub mod models;
pub mod transition;
pub mod transport;

pub use board::{BoardModal, BoardState, Column, DropEffect, StatusTransition};
pub use cache::TaskListKey;
pub use client::{TrackerClient, WatchId, Watcher};
pub use config::TrackerConfig;
pub use error::{ClientError, ClientResult};
pub use models::{Project, ProjectStats, ProjectStatus, Task, TaskComment, TaskStatus};
pub use transition::{run_transition, transition_task_status, TransitionError, TransitionOutcome};
pub use transport::Transport;
