//! When steps for task view BDD scenarios.

use super::world::{TaskViewsWorld, run_async};
use rstest_bdd_macros::when;
use taskmarket::{
    identity::UserId,
    task::{
        derivation::{FeedFilter, feed, my_active_tasks, my_completed_tasks},
        domain::{Task, TaskQuery},
    },
};

fn refresh(world: &TaskViewsWorld) -> Result<Vec<Task>, eyre::Report> {
    let settlement = run_async(world.store.list(TaskQuery::new()));
    if !settlement.is_settled() {
        return Err(eyre::eyre!("listing failed: {:?}", world.store.error()));
    }
    Ok(world.store.tasks())
}

fn apply_feed(world: &mut TaskViewsWorld, filter: &FeedFilter) -> Result<(), eyre::Report> {
    let tasks = refresh(world)?;
    world.feed = feed(&tasks, filter).into_iter().map(Task::id).collect();
    Ok(())
}

#[when("executor {executor:u64} opens their task views")]
fn open_task_views(world: &mut TaskViewsWorld, executor: u64) -> Result<(), eyre::Report> {
    let tasks = refresh(world)?;
    let user = UserId::new(executor);
    world.active = my_active_tasks(&tasks, user)
        .into_iter()
        .map(Task::id)
        .collect();
    world.completed = my_completed_tasks(&tasks, user)
        .into_iter()
        .map(Task::id)
        .collect();
    Ok(())
}

#[when(r#"the feed is filtered by search "{search}" and maximum budget "{max}""#)]
fn filter_feed(world: &mut TaskViewsWorld, search: String, max: String) -> Result<(), eyre::Report> {
    match FeedFilter::from_form(&search, "", "", &max) {
        Ok(filter) => apply_feed(world, &filter),
        Err(err) => {
            world.filter_error = Some(err);
            Ok(())
        }
    }
}

#[when("the feed is opened without filters")]
fn open_feed(world: &mut TaskViewsWorld) -> Result<(), eyre::Report> {
    apply_feed(world, &FeedFilter::new())
}
