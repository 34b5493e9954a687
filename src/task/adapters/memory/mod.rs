//! In-memory gateway doubles for the task context.

mod task;

pub use task::InMemoryTaskGateway;
