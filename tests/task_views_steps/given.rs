//! Given steps for task view BDD scenarios.

use super::world::TaskViewsWorld;
use chrono::DateTime;
use eyre::WrapErr;
use rust_decimal::Decimal;
use rstest_bdd_macros::given;
use taskmarket::{
    identity::UserId,
    task::domain::{Task, TaskData, TaskId, TaskStatus},
};

fn seed(world: &TaskViewsWorld, data: TaskData) -> Result<(), eyre::Report> {
    world
        .gateway
        .seed(Task::from(data))
        .wrap_err("seed task into the in-memory backend")
}

fn task_data(id: u64, title: &str) -> TaskData {
    let created_at = DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default();
    TaskData::new(TaskId::new(id), title, UserId::new(100), created_at)
}

#[given("a task {id:u64} in progress for executor {executor:u64}")]
fn task_in_progress(world: &mut TaskViewsWorld, id: u64, executor: u64) -> Result<(), eyre::Report> {
    let mut data = task_data(id, "Claimed work");
    data.status = TaskStatus::InProgress;
    data.executor = Some(UserId::new(executor));
    seed(world, data)
}

#[given("a task {id:u64} completed by executor {executor:u64}")]
fn task_completed(world: &mut TaskViewsWorld, id: u64, executor: u64) -> Result<(), eyre::Report> {
    let mut data = task_data(id, "Delivered work");
    data.status = TaskStatus::Completed;
    data.executor = Some(UserId::new(executor));
    seed(world, data)
}

#[given(r#"a published task {id:u64} "{title}" with budget {budget:u64}"#)]
fn published_task(
    world: &mut TaskViewsWorld,
    id: u64,
    title: String,
    budget: u64,
) -> Result<(), eyre::Report> {
    let mut data = task_data(id, &title);
    data.status = TaskStatus::Published;
    data.budget = Decimal::from(budget);
    seed(world, data)
}

#[given(r#"a draft task {id:u64} "{title}" with budget {budget:u64}"#)]
fn draft_task(
    world: &mut TaskViewsWorld,
    id: u64,
    title: String,
    budget: u64,
) -> Result<(), eyre::Report> {
    let mut data = task_data(id, &title);
    data.budget = Decimal::from(budget);
    seed(world, data)
}
