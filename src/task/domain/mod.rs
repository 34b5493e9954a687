//! Domain model for cached marketplace tasks.
//!
//! Tasks are created and mutated by the backend; the types here describe the
//! projection the client caches, the partial payloads it sends, and the
//! lifecycle rules used to sanity-check what comes back.

mod error;
mod ids;
mod request;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TemplateId};
pub use request::{TaskDraft, TaskListing, TaskQuery};
pub use task::{Task, TaskData, TaskStatus};
