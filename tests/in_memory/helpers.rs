//! Shared fixtures for in-memory gateway integration tests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use taskmarket::{
    identity::UserId,
    task::{
        adapters::memory::InMemoryTaskGateway,
        domain::{Task, TaskData, TaskId, TaskStatus},
        services::TaskStore,
    },
};

/// Customer account used across scenarios.
pub const CUSTOMER: UserId = UserId::new(100);
/// Executor account used across scenarios.
pub const EXECUTOR: UserId = UserId::new(7);

/// Task gateway on the system clock.
pub type TestTaskGateway = InMemoryTaskGateway<mockable::DefaultClock>;

/// Builds a store over `gateway`, sharing its backing state.
pub fn task_store(gateway: &TestTaskGateway) -> TaskStore<TestTaskGateway> {
    TaskStore::new(Arc::new(gateway.clone()))
}

/// Returns a fixed timestamp for hand-built projections.
pub fn timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default()
}

/// Builds a published task owned by [`CUSTOMER`].
pub fn published_task(id: u64, title: &str, budget: i64) -> Task {
    let mut data = TaskData::new(TaskId::new(id), title, CUSTOMER, timestamp());
    data.status = TaskStatus::Published;
    data.budget = Decimal::from(budget);
    Task::from(data)
}

/// Returns the raw identifiers of `tasks` in order.
pub fn task_ids<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<u64> {
    tasks.into_iter().map(|task| task.id().value()).collect()
}
