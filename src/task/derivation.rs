//! Read-side views over a task collection.
//!
//! Every function here is pure: it borrows a task slice plus explicit inputs
//! (the session user, a feed filter) and returns matching tasks in collection
//! order. Nothing is cached, so calling again after a store update always
//! reflects the new collection.

use crate::identity::UserId;
use crate::task::domain::{Task, TaskStatus};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Tasks `user` has claimed and is still working on.
#[must_use]
pub fn my_active_tasks(tasks: &[Task], user: UserId) -> Vec<&Task> {
    executed_by_with_status(tasks, user, TaskStatus::InProgress)
}

/// Tasks `user` has claimed and delivered.
#[must_use]
pub fn my_completed_tasks(tasks: &[Task], user: UserId) -> Vec<&Task> {
    executed_by_with_status(tasks, user, TaskStatus::Completed)
}

fn executed_by_with_status(tasks: &[Task], user: UserId, status: TaskStatus) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.status() == status && task.is_executed_by(user))
        .collect()
}

/// Published tasks narrowed by `filter`.
#[must_use]
pub fn feed<'a>(tasks: &'a [Task], filter: &FeedFilter) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| task.status() == TaskStatus::Published && filter.matches(task))
        .collect()
}

/// Errors raised while reading feed filter form values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedFilterError {
    /// A budget bound is not a number.
    #[error("invalid {field} budget '{value}'")]
    InvalidBudget {
        /// `minimum` or `maximum`.
        field: &'static str,
        /// Raw input.
        value: String,
    },
}

/// Conjunctive feed filter; unset criteria do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    search: String,
    category: Option<String>,
    min_budget: Option<Decimal>,
    max_budget: Option<Decimal>,
}

impl FeedFilter {
    /// Creates a filter matching every published task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads raw form values, where an empty string means "any".
    ///
    /// Every value is trimmed. Budget bounds accept plain decimals (`1500`,
    /// `99.5`) and exponent notation (`1e3`).
    ///
    /// # Errors
    ///
    /// Returns [`FeedFilterError::InvalidBudget`] when a non-empty budget
    /// bound does not parse as a number.
    pub fn from_form(
        search: &str,
        category: &str,
        min_budget: &str,
        max_budget: &str,
    ) -> Result<Self, FeedFilterError> {
        let category = category.trim();
        Ok(Self {
            search: search.trim().to_owned(),
            category: (!category.is_empty()).then(|| category.to_owned()),
            min_budget: parse_bound("minimum", min_budget)?,
            max_budget: parse_bound("maximum", max_budget)?,
        })
    }

    /// Requires the title to contain `search`, ignoring case.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Requires an exact category match.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Requires `budget >= min`.
    #[must_use]
    pub const fn with_min_budget(mut self, min: Decimal) -> Self {
        self.min_budget = Some(min);
        self
    }

    /// Requires `budget <= max`.
    #[must_use]
    pub const fn with_max_budget(mut self, max: Decimal) -> Self {
        self.max_budget = Some(max);
        self
    }

    /// Whether `task` satisfies every set criterion. Status is not checked.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = task.title().to_lowercase().contains(&search);
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|category| task.category() == Some(category));
        let budget = task.budget();
        let above_min = self.min_budget.is_none_or(|min| budget >= min);
        let below_max = self.max_budget.is_none_or(|max| budget <= max);

        matches_search && matches_category && above_min && below_max
    }
}

fn parse_bound(field: &'static str, raw: &str) -> Result<Option<Decimal>, FeedFilterError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(Some)
        .map_err(|_| FeedFilterError::InvalidBudget {
            field,
            value: raw.to_owned(),
        })
}
