//! Port contracts for the review context.

pub mod gateway;

pub use gateway::{ReviewGateway, ReviewRoute};

#[cfg(test)]
pub use gateway::MockReviewGateway;
