//! Partial task payloads, list queries and list responses.

use super::{Task, TaskStatus, TemplateId};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Partial task sent on create and update; absent fields are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    budget: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    executor: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    template: Option<TemplateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl TaskDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: Decimal) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Requests a status change.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Names an executor.
    #[must_use]
    pub const fn with_executor(mut self, executor: UserId) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Creates the task from a template.
    #[must_use]
    pub const fn with_template(mut self, template: TemplateId) -> Self {
        self.template = Some(template);
        self
    }

    /// Sets the feed category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns the title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the budget, if set.
    #[must_use]
    pub const fn budget(&self) -> Option<Decimal> {
        self.budget
    }

    /// Returns the deadline, if set.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the requested status, if set.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the executor, if set.
    #[must_use]
    pub const fn executor(&self) -> Option<UserId> {
        self.executor
    }

    /// Returns the template, if set.
    #[must_use]
    pub const fn template(&self) -> Option<TemplateId> {
        self.template
    }

    /// Returns the category, if set.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Filters forwarded verbatim to the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

impl TaskQuery {
    /// Creates an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds a free-text search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the search term.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the query-string pairs a transport should send.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_owned()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// List response: either a bare array or a paginated envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskListing {
    /// Every matching task, unpaginated.
    Bare(Vec<Task>),
    /// One page of results plus the total count when the server reports it.
    Envelope {
        /// Tasks on this page.
        results: Vec<Task>,
        /// Total number of matching tasks.
        #[serde(default)]
        count: Option<u64>,
    },
}

impl TaskListing {
    /// Splits the response into its tasks and the total count.
    ///
    /// A missing count falls back to the number of returned tasks.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Task>, u64) {
        match self {
            Self::Bare(tasks) => {
                let count = item_count(&tasks);
                (tasks, count)
            }
            Self::Envelope { results, count } => {
                let count = count.unwrap_or_else(|| item_count(&results));
                (results, count)
            }
        }
    }
}

fn item_count(tasks: &[Task]) -> u64 {
    u64::try_from(tasks.len()).unwrap_or(u64::MAX)
}
