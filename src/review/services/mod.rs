//! Services for the review context.

mod store;

pub use store::ReviewStore;
