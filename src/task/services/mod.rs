//! Application services for the task context.

mod store;

pub use store::TaskStore;
