//! In-memory adapters for the review context.

mod review;

pub use review::InMemoryReviewGateway;
