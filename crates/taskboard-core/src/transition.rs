//! Status Transition Flow
//!
//! Moves a task to another column with an optimistic overlay. The per-task
//! in-flight marker is held across the mutation and the follow-up refetch,
//! so overlapping moves of the same task are rejected instead of racing.

use log::{error, info, warn};
use thiserror::Error;

use crate::board::StatusTransition;
use crate::cache::TaskListKey;
use crate::client::TrackerClient;
use crate::error::{join_errors, ClientError};
use crate::graphql::{MutationOutcome, UpdateTaskInput};
use crate::models::{Task, TaskStatus};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// Server confirmed the move
    Applied(Task),
    /// Task already had the requested status, nothing was sent
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitionError {
    #[error("Task {0} is not loaded")]
    UnknownTask(String),

    #[error("Task {0} is already being updated")]
    Busy(String),

    #[error("{}", join_errors(.0))]
    Rejected(Vec<String>),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Run a transition produced by the board
pub async fn run_transition<T: Transport>(
    client: &TrackerClient<T>,
    list: &TaskListKey,
    transition: &StatusTransition,
) -> Result<TransitionOutcome, TransitionError> {
    transition_task_status(client, list, &transition.task_id, transition.status).await
}

/// Change a task's status and refetch `list` once the server confirms.
///
/// On any failure the optimistic overlay is rolled back before returning.
pub async fn transition_task_status<T: Transport>(
    client: &TrackerClient<T>,
    list: &TaskListKey,
    task_id: &str,
    status: TaskStatus,
) -> Result<TransitionOutcome, TransitionError> {
    let current = client
        .cached_task(task_id)
        .ok_or_else(|| TransitionError::UnknownTask(task_id.to_string()))?;
    if current.status == status {
        return Ok(TransitionOutcome::Unchanged);
    }

    let _guard = client.in_flight().try_begin(task_id).ok_or_else(|| {
        warn!("[BOARD] Move of task {} ignored, previous move still pending", task_id);
        TransitionError::Busy(task_id.to_string())
    })?;

    let token = client
        .apply_optimistic_task_status(task_id, status)
        .ok_or_else(|| TransitionError::UnknownTask(task_id.to_string()))?;

    info!("[BOARD] Moving task {} from {} to {}", task_id, current.status.as_str(), status.as_str());
    let result = client.update_task(&UpdateTaskInput::status(task_id, status)).await;

    let task = match result {
        Ok(MutationOutcome::Ok(task)) => {
            client.commit_optimistic(token);
            task
        }
        Ok(MutationOutcome::Failed(errors)) => {
            client.rollback_optimistic(token);
            error!("Error updating task: {}", join_errors(&errors));
            return Err(TransitionError::Rejected(errors));
        }
        Err(err) => {
            client.rollback_optimistic(token);
            error!("Error updating task: {}", err);
            return Err(err.into());
        }
    };

    // Authoritative status is already in the cache; the refetch only
    // reconciles fields the optimistic overlay did not carry.
    if let Err(err) = client.tasks(list).await {
        warn!("[BOARD] Refetch after moving task {} failed: {}", task_id, err);
    }

    Ok(TransitionOutcome::Applied(task))
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
