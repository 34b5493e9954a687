//! Review projection, star rating and request payloads.

use super::ReviewDomainError;
use crate::collection::Keyed;
use crate::identity::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(u64);

impl ReviewId {
    /// Wraps a raw review identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Star rating from one to five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Validates `stars`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::RatingOutOfRange`] outside `1..=5`.
    pub const fn new(stars: u8) -> Result<Self, ReviewDomainError> {
        if stars >= Self::MIN && stars <= Self::MAX {
            Ok(Self(stars))
        } else {
            Err(ReviewDomainError::RatingOutOfRange(stars))
        }
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Cached projection of a review.
///
/// The star count is kept as sent by the backend so that one malformed
/// entry cannot fail decoding of a whole listing; see
/// [`Review::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    task: TaskId,
    employer: UserId,
    freelancer: UserId,
    rating: u8,
    #[serde(default)]
    comment: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for building a [`Review`].
#[derive(Debug, Clone)]
pub struct ReviewData {
    /// Review identifier.
    pub id: ReviewId,
    /// Reviewed task.
    pub task: TaskId,
    /// Customer side of the task.
    pub employer: UserId,
    /// Executor side of the task.
    pub freelancer: UserId,
    /// Star count as recorded by the backend.
    pub rating: u8,
    /// Free-form comment.
    pub comment: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<ReviewData> for Review {
    fn from(data: ReviewData) -> Self {
        Self {
            id: data.id,
            task: data.task,
            employer: data.employer,
            freelancer: data.freelancer,
            rating: data.rating,
            comment: data.comment,
            created_at: data.created_at,
        }
    }
}

impl Review {
    /// Returns the review identifier.
    #[must_use]
    pub const fn id(&self) -> ReviewId {
        self.id
    }

    /// Returns the reviewed task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the customer side of the task.
    #[must_use]
    pub const fn employer(&self) -> UserId {
        self.employer
    }

    /// Returns the executor side of the task.
    #[must_use]
    pub const fn freelancer(&self) -> UserId {
        self.freelancer
    }

    /// Returns the star count as recorded.
    #[must_use]
    pub const fn stars(&self) -> u8 {
        self.rating
    }

    /// Returns the validated rating, or `None` when the recorded star count
    /// is out of range.
    #[must_use]
    pub const fn rating(&self) -> Option<Rating> {
        match Rating::new(self.rating) {
            Ok(rating) => Some(rating),
            Err(_) => None,
        }
    }

    /// Returns the comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Checks the invariants of a single projection.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewDomainError::RatingOutOfRange`] for a star count
    /// outside `1..=5` and [`ReviewDomainError::SelfReview`] when both sides
    /// are the same user.
    pub fn check_invariants(&self) -> Result<(), ReviewDomainError> {
        Rating::new(self.rating)?;
        if self.employer == self.freelancer {
            return Err(ReviewDomainError::SelfReview(self.id));
        }
        Ok(())
    }
}

impl Keyed for Review {
    type Key = ReviewId;

    fn key(&self) -> ReviewId {
        self.id
    }
}

/// Body of a review submission.
///
/// The backend fills the reviewing side from the session when a party is
/// omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    task: TaskId,
    rating: Rating,
    #[serde(default)]
    comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    employer: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    freelancer: Option<UserId>,
}

impl ReviewDraft {
    /// Creates a submission for `task`.
    pub fn new(task: TaskId, rating: Rating, comment: impl Into<String>) -> Self {
        Self {
            task,
            rating,
            comment: comment.into(),
            employer: None,
            freelancer: None,
        }
    }

    /// Names the customer side.
    #[must_use]
    pub const fn with_employer(mut self, employer: UserId) -> Self {
        self.employer = Some(employer);
        self
    }

    /// Names the executor side.
    #[must_use]
    pub const fn with_freelancer(mut self, freelancer: UserId) -> Self {
        self.freelancer = Some(freelancer);
        self
    }

    /// Returns the reviewed task.
    #[must_use]
    pub const fn task(&self) -> TaskId {
        self.task
    }

    /// Returns the rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the customer side, if named.
    #[must_use]
    pub const fn employer(&self) -> Option<UserId> {
        self.employer
    }

    /// Returns the executor side, if named.
    #[must_use]
    pub const fn freelancer(&self) -> Option<UserId> {
        self.freelancer
    }
}

/// Filters for listing reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    freelancer: Option<UserId>,
    employer: Option<UserId>,
}

impl ReviewQuery {
    /// Creates an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to reviews of `freelancer`.
    #[must_use]
    pub const fn with_freelancer(mut self, freelancer: UserId) -> Self {
        self.freelancer = Some(freelancer);
        self
    }

    /// Restricts to reviews by `employer`.
    #[must_use]
    pub const fn with_employer(mut self, employer: UserId) -> Self {
        self.employer = Some(employer);
        self
    }

    /// Returns the freelancer filter.
    #[must_use]
    pub const fn freelancer(&self) -> Option<UserId> {
        self.freelancer
    }

    /// Returns the employer filter.
    #[must_use]
    pub const fn employer(&self) -> Option<UserId> {
        self.employer
    }

    /// Whether `review` passes every filter.
    #[must_use]
    pub fn matches(&self, review: &Review) -> bool {
        self.freelancer.is_none_or(|user| review.freelancer() == user)
            && self.employer.is_none_or(|user| review.employer() == user)
    }

    /// Returns the query-string pairs to send.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(freelancer) = self.freelancer {
            pairs.push(("freelancer", freelancer.to_string()));
        }
        if let Some(employer) = self.employer {
            pairs.push(("employer", employer.to_string()));
        }
        pairs
    }
}
