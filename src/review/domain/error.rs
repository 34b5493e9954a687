//! Error types for review validation.

use super::ReviewId;
use thiserror::Error;

/// Violations detected on ratings and cached reviews.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewDomainError {
    /// A rating outside one to five stars.
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    /// Employer and freelancer are the same account.
    #[error("review {0} names the same user as employer and freelancer")]
    SelfReview(ReviewId),
}
