//! Then steps for task view BDD scenarios.

use super::world::{TaskViewsWorld, parse_ids};
use rstest_bdd_macros::then;
use taskmarket::task::{derivation::FeedFilterError, domain::TaskId};

fn expect_ids(label: &str, actual: &[TaskId], raw: &str) -> Result<(), eyre::Report> {
    let expected = parse_ids(raw)?;
    if actual != expected.as_slice() {
        return Err(eyre::eyre!(
            "expected {label} {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"the active list is "{ids}""#)]
fn active_list_is(world: &TaskViewsWorld, ids: String) -> Result<(), eyre::Report> {
    expect_ids("active tasks", &world.active, &ids)
}

#[then(r#"the completed list is "{ids}""#)]
fn completed_list_is(world: &TaskViewsWorld, ids: String) -> Result<(), eyre::Report> {
    expect_ids("completed tasks", &world.completed, &ids)
}

#[then(r#"the feed lists "{ids}""#)]
fn feed_lists(world: &TaskViewsWorld, ids: String) -> Result<(), eyre::Report> {
    expect_ids("feed", &world.feed, &ids)
}

#[then("the feed is empty")]
fn feed_is_empty(world: &TaskViewsWorld) -> Result<(), eyre::Report> {
    if !world.feed.is_empty() {
        return Err(eyre::eyre!("expected an empty feed, found {:?}", world.feed));
    }
    Ok(())
}

#[then("the filter is rejected")]
fn filter_is_rejected(world: &TaskViewsWorld) -> Result<(), eyre::Report> {
    if !matches!(
        world.filter_error,
        Some(FeedFilterError::InvalidBudget { .. })
    ) {
        return Err(eyre::eyre!(
            "expected an invalid budget error, got {:?}",
            world.filter_error
        ));
    }
    Ok(())
}
