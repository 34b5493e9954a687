//! Domain model for reviews.

mod error;
mod review;

pub use error::ReviewDomainError;
pub use review::{Rating, Review, ReviewData, ReviewDraft, ReviewId, ReviewQuery};
