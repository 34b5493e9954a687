//! Port contracts for the task context.
//!
//! Ports define transport-agnostic interfaces used by the task store.

pub mod gateway;

pub use gateway::{TaskGateway, TaskRoute};

#[cfg(test)]
pub use gateway::MockTaskGateway;
