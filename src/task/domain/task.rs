//! Task projection and lifecycle status.

use super::{ParseTaskStatusError, TaskDomainError, TaskId, TemplateId};
use crate::collection::Keyed;
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Being prepared by the customer; invisible to executors.
    Draft,
    /// Listed in the feed and open for claiming.
    Published,
    /// Claimed by an executor.
    InProgress,
    /// Delivered by the executor.
    Completed,
    /// Withdrawn.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether an executor must be absent in this status.
    #[must_use]
    pub const fn forbids_executor(self) -> bool {
        matches!(self, Self::Draft | Self::Published)
    }

    /// Whether the lifecycle permits moving from `self` to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Published | Self::Cancelled)
                | (Self::Published, Self::InProgress | Self::Cancelled)
                | (Self::InProgress, Self::Completed | Self::Cancelled)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Cached projection of a server-side task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    budget: Decimal,
    #[serde(default)]
    deadline: Option<DateTime<Utc>>,
    status: TaskStatus,
    customer: UserId,
    #[serde(default)]
    executor: Option<UserId>,
    #[serde(default)]
    template: Option<TemplateId>,
    #[serde(default)]
    category: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for building a task projection outside deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Headline shown in the feed.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Offered budget.
    pub budget: Decimal,
    /// Optional delivery deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Owning customer.
    pub customer: UserId,
    /// Claiming executor, if any.
    pub executor: Option<UserId>,
    /// Template the task was created from.
    pub template: Option<TemplateId>,
    /// Feed category.
    pub category: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskData {
    /// Creates draft task data with empty optional fields and a zero budget.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        customer: UserId,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            budget: Decimal::ZERO,
            deadline: None,
            status: TaskStatus::Draft,
            customer,
            executor: None,
            template: None,
            category: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }
}

impl From<TaskData> for Task {
    fn from(data: TaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            budget: data.budget,
            deadline: data.deadline,
            status: data.status,
            customer: data.customer,
            executor: data.executor,
            template: data.template,
            category: data.category,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }
}

impl From<Task> for TaskData {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            budget: task.budget,
            deadline: task.deadline,
            status: task.status,
            customer: task.customer,
            executor: task.executor,
            template: task.template,
            category: task.category,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl Task {
    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the offered budget.
    #[must_use]
    pub const fn budget(&self) -> Decimal {
        self.budget
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the owning customer.
    #[must_use]
    pub const fn customer(&self) -> UserId {
        self.customer
    }

    /// Returns the claiming executor, if any.
    #[must_use]
    pub const fn executor(&self) -> Option<UserId> {
        self.executor
    }

    /// Returns the template reference, if any.
    #[must_use]
    pub const fn template(&self) -> Option<TemplateId> {
        self.template
    }

    /// Returns the feed category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user` is the claiming executor.
    #[must_use]
    pub fn is_executed_by(&self, user: UserId) -> bool {
        self.executor == Some(user)
    }

    /// Checks the invariants that hold for any single projection.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskDomainError`] found: a negative budget, an
    /// executor on a draft or published task, or an in-progress task without
    /// an executor.
    pub fn check_invariants(&self) -> Result<(), TaskDomainError> {
        if self.budget < Decimal::ZERO {
            return Err(TaskDomainError::NegativeBudget(self.id));
        }
        if self.status.forbids_executor() && self.executor.is_some() {
            return Err(TaskDomainError::ExecutorBeforeClaim {
                task_id: self.id,
                status: self.status,
            });
        }
        if self.status == TaskStatus::InProgress && self.executor.is_none() {
            return Err(TaskDomainError::MissingExecutor(self.id));
        }
        Ok(())
    }

    /// Checks that `next` is a legal successor of this projection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the status
    /// moved along a forbidden edge, [`TaskDomainError::ExecutorReassigned`]
    /// when a claimed task changed hands, [`TaskDomainError::ExecutorCleared`]
    /// when it lost its executor, or any error from
    /// [`Task::check_invariants`] on `next`.
    pub fn check_successor(&self, next: &Self) -> Result<(), TaskDomainError> {
        if self.status != next.status && !self.status.can_transition_to(next.status) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: next.status,
            });
        }
        match (self.executor, next.executor) {
            (Some(from), Some(to)) if from != to => {
                return Err(TaskDomainError::ExecutorReassigned {
                    task_id: self.id,
                    from,
                    to,
                });
            }
            (Some(from), None) => {
                return Err(TaskDomainError::ExecutorCleared {
                    task_id: self.id,
                    from,
                });
            }
            _ => {}
        }
        next.check_invariants()
    }
}

impl Keyed for Task {
    type Key = TaskId;

    fn key(&self) -> TaskId {
        self.id
    }
}
