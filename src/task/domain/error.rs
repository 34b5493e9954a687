//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::identity::UserId;
use thiserror::Error;

/// Invariant violations detected on task projections.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A draft or published task names an executor.
    #[error("task {task_id} is {status} but already names an executor")]
    ExecutorBeforeClaim {
        /// Offending task.
        task_id: TaskId,
        /// Status that forbids an executor.
        status: TaskStatus,
    },

    /// An in-progress task has no executor.
    #[error("task {0} is in progress without an executor")]
    MissingExecutor(TaskId),

    /// The executor changed after the task was claimed.
    #[error("task {task_id} executor changed from {from} to {to}")]
    ExecutorReassigned {
        /// Offending task.
        task_id: TaskId,
        /// Executor on the cached projection.
        from: UserId,
        /// Executor on the incoming projection.
        to: UserId,
    },

    /// A claimed task no longer names its executor.
    #[error("task {task_id} lost its executor {from}")]
    ExecutorCleared {
        /// Offending task.
        task_id: TaskId,
        /// Executor on the cached projection.
        from: UserId,
    },

    /// The budget is negative.
    #[error("task {0} has a negative budget")]
    NegativeBudget(TaskId),

    /// The status moved along an edge the lifecycle does not allow.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Offending task.
        task_id: TaskId,
        /// Status on the cached projection.
        from: TaskStatus,
        /// Status on the incoming projection.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
