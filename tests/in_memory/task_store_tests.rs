//! In-memory integration tests for the task store.

use super::helpers::{CUSTOMER, EXECUTOR, TestTaskGateway, published_task, task_ids, task_store};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use taskmarket::{
    gateway::GatewayError,
    identity::UserId,
    task::{
        derivation::{FeedFilter, feed, my_active_tasks, my_completed_tasks},
        domain::{TaskDraft, TaskId, TaskQuery, TaskStatus},
    },
    tracker::{OperationPhase, StoreStatus},
};

#[fixture]
fn gateway() -> TestTaskGateway {
    TestTaskGateway::new(CUSTOMER)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moves_from_draft_to_completed(gateway: TestTaskGateway) -> eyre::Result<()> {
    let customer = task_store(&gateway);
    let executor = task_store(&gateway.as_user(EXECUTOR));

    let created = customer
        .create(
            TaskDraft::new()
                .with_title("Logo design")
                .with_budget(Decimal::from(500)),
        )
        .await;
    eyre::ensure!(created.is_settled(), "create failed: {:?}", customer.error());
    let task_id = customer
        .current_task()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("created task should be current"))?;

    customer.publish(task_id).await;
    eyre::ensure!(
        customer.find(task_id).map(|task| task.status()) == Some(TaskStatus::Published)
    );

    executor
        .list(TaskQuery::new().with_status(TaskStatus::Published))
        .await;
    let listed = executor.tasks();
    eyre::ensure!(task_ids(feed(&listed, &FeedFilter::new())) == vec![task_id.value()]);

    executor.assign(task_id).await;
    let claimed = executor.tasks();
    eyre::ensure!(task_ids(my_active_tasks(&claimed, EXECUTOR)) == vec![task_id.value()]);
    eyre::ensure!(my_active_tasks(&claimed, CUSTOMER).is_empty());

    executor.complete(task_id).await;
    let delivered = executor.tasks();
    eyre::ensure!(my_active_tasks(&delivered, EXECUTOR).is_empty());
    eyre::ensure!(task_ids(my_completed_tasks(&delivered, EXECUTOR)) == vec![task_id.value()]);
    eyre::ensure!(executor.status() == StoreStatus::Settled);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_adds_exactly_one_fresh_task(gateway: TestTaskGateway) -> eyre::Result<()> {
    gateway.seed(published_task(1, "Logo design", 500))?;
    gateway.seed(published_task(2, "Landing page", 5000))?;
    let store = task_store(&gateway);
    store.list(TaskQuery::new()).await;
    let before = store.tasks();

    store.create(TaskDraft::new().with_title("Banner")).await;

    let after = store.tasks();
    let fresh = after
        .first()
        .ok_or_else(|| eyre::eyre!("collection should not be empty"))?;
    eyre::ensure!(after.len() == before.len() + 1);
    eyre::ensure!(before.iter().all(|task| task.id() != fresh.id()));
    eyre::ensure!(fresh.status() == TaskStatus::Draft);
    eyre::ensure!(store.total_count() == 2, "count reflects the last list");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_forwards_search_and_status(gateway: TestTaskGateway) -> eyre::Result<()> {
    gateway.seed(published_task(1, "Logo design", 500))?;
    gateway.seed(published_task(2, "Landing page", 5000))?;
    let store = task_store(&gateway);
    store.create(TaskDraft::new().with_title("Logo refresh")).await;

    store
        .list(
            TaskQuery::new()
                .with_status(TaskStatus::Published)
                .with_search("logo"),
        )
        .await;

    eyre::ensure!(task_ids(&store.tasks()) == vec![1]);
    eyre::ensure!(store.total_count() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_in_place_and_sets_current(gateway: TestTaskGateway) -> eyre::Result<()> {
    gateway.seed(published_task(1, "Logo design", 500))?;
    gateway.seed(published_task(2, "Landing page", 5000))?;
    let store = task_store(&gateway);
    store.list(TaskQuery::new()).await;
    let before = store.tasks();

    store
        .update(TaskId::new(1), TaskDraft::new().with_budget(Decimal::from(750)))
        .await;

    let after = store.tasks();
    eyre::ensure!(task_ids(&after) == task_ids(&before));
    eyre::ensure!(
        store.find(TaskId::new(1)).map(|task| task.budget()) == Some(Decimal::from(750))
    );
    eyre::ensure!(store.find(TaskId::new(2)).as_ref() == before.get(1));
    eyre::ensure!(store.current_task().map(|task| task.id()) == Some(TaskId::new(1)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn foreign_delete_is_rejected_without_side_effects(
    gateway: TestTaskGateway,
) -> eyre::Result<()> {
    gateway.seed(published_task(1, "Logo design", 500))?;
    let store = task_store(&gateway.as_user(EXECUTOR));
    store.list(TaskQuery::new()).await;
    store.get(TaskId::new(1)).await;

    let settlement = store.delete(TaskId::new(1)).await;

    eyre::ensure!(settlement.failure_message() == Some("only the task owner may do this"));
    eyre::ensure!(task_ids(&store.tasks()) == vec![1]);
    eyre::ensure!(store.current_task().is_some());
    eyre::ensure!(gateway.stored(TaskId::new(1))?.is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_viewed_task_clears_current(gateway: TestTaskGateway) -> eyre::Result<()> {
    gateway.seed(published_task(1, "Logo design", 500))?;
    gateway.seed(published_task(2, "Landing page", 5000))?;
    let store = task_store(&gateway);
    store.list(TaskQuery::new()).await;
    store.get(TaskId::new(1)).await;

    store.delete(TaskId::new(1)).await;

    eyre::ensure!(store.current_task().is_none());
    eyre::ensure!(task_ids(&store.tasks()) == vec![2]);
    eyre::ensure!(gateway.stored(TaskId::new(1))?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn claiming_an_assigned_task_fails(gateway: TestTaskGateway) -> eyre::Result<()> {
    gateway.seed(published_task(1, "Logo design", 500))?;
    let first = task_store(&gateway.as_user(EXECUTOR));
    let second = task_store(&gateway.as_user(UserId::new(8)));

    first.assign(TaskId::new(1)).await;
    let settlement = second.assign(TaskId::new(1)).await;

    eyre::ensure!(
        settlement.failure_message() == Some("only published tasks can be claimed"),
        "unexpected outcome: {:?}",
        second.phase(settlement.token())
    );
    eyre::ensure!(second.status() == StoreStatus::Error);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn injected_failure_is_captured_then_cleared(gateway: TestTaskGateway) -> eyre::Result<()> {
    gateway.fail_next(GatewayError::Transport("connection reset".to_owned()))?;
    let store = task_store(&gateway);

    let failed = store.list(TaskQuery::new()).await;
    eyre::ensure!(store.error().as_deref() == Some("error loading tasks"));
    eyre::ensure!(
        store.phase(failed.token())
            == Some(OperationPhase::Failed {
                message: "error loading tasks".to_owned()
            })
    );

    let retried = store.list(TaskQuery::new()).await;
    eyre::ensure!(retried.is_settled());
    eyre::ensure!(store.error().is_none());
    eyre::ensure!(store.status() == StoreStatus::Settled);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_title_reports_backend_message(gateway: TestTaskGateway) {
    let store = task_store(&gateway);

    let settlement = store.create(TaskDraft::new()).await;

    assert_eq!(settlement.failure_message(), Some("title is required"));
    assert!(store.tasks().is_empty());
    assert!(store.current_task().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_after_highest_identifier_fails_cleanly(
    gateway: TestTaskGateway,
) -> eyre::Result<()> {
    gateway.seed(published_task(u64::MAX, "Logo design", 500))?;
    let store = task_store(&gateway);
    store.list(TaskQuery::new()).await;

    let settlement = store.create(TaskDraft::new().with_title("Banner")).await;

    eyre::ensure!(settlement.failure_message() == Some("identifier space exhausted"));
    eyre::ensure!(task_ids(&store.tasks()) == vec![u64::MAX]);
    eyre::ensure!(store.current_task().is_none());
    Ok(())
}
