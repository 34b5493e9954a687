//! Overlapping store operations served through the channel gateway.
//!
//! The test body plays the backend: it pops each forwarded request and
//! decides when to answer, so completion order is fully controlled.

use super::helpers::{published_task, task_ids};
use std::sync::Arc;
use taskmarket::{
    gateway::{ChannelGateway, GatewayError, GatewayRequest, RequestMethod, channel},
    task::{
        domain::{TaskDraft, TaskId, TaskListing, TaskQuery},
        services::TaskStore,
    },
    tracker::StoreStatus,
};
use tokio::sync::mpsc::UnboundedReceiver;

fn connected_store() -> (TaskStore<ChannelGateway>, UnboundedReceiver<GatewayRequest>) {
    let (gateway, requests) = channel();
    (TaskStore::new(Arc::new(gateway)), requests)
}

#[tokio::test(flavor = "multi_thread")]
async fn later_list_replaces_earlier_create() -> eyre::Result<()> {
    let (store, mut requests) = connected_store();

    let listing = tokio::spawn({
        let handle = store.clone();
        async move { handle.list(TaskQuery::new()).await }
    });
    let list_request = requests
        .recv()
        .await
        .ok_or_else(|| eyre::eyre!("list was not forwarded"))?;

    let creation = tokio::spawn({
        let handle = store.clone();
        async move { handle.create(TaskDraft::new().with_title("Banner")).await }
    });
    let create_request = requests
        .recv()
        .await
        .ok_or_else(|| eyre::eyre!("create was not forwarded"))?;

    eyre::ensure!(store.status() == StoreStatus::Pending);
    eyre::ensure!(store.in_flight() == 2);

    let create_route = create_request.route();
    let GatewayRequest::CreateTask {
        respond: create_reply,
        ..
    } = create_request
    else {
        eyre::bail!("expected a create request, got {create_route}");
    };
    create_reply.respond(Ok(published_task(10, "Banner", 100)));
    let created = creation.await?;
    eyre::ensure!(created.is_settled());
    eyre::ensure!(task_ids(&store.tasks()) == vec![10]);
    eyre::ensure!(store.status() == StoreStatus::Pending, "list still in flight");

    let list_route = list_request.route();
    let GatewayRequest::ListTasks {
        respond: list_reply,
        ..
    } = list_request
    else {
        eyre::bail!("expected a list request, got {list_route}");
    };
    list_reply.respond(Ok(TaskListing::Bare(vec![
        published_task(1, "Logo design", 500),
        published_task(2, "Landing page", 5000),
    ])));
    let listed = listing.await?;

    eyre::ensure!(listed.is_settled());
    eyre::ensure!(task_ids(&store.tasks()) == vec![1, 2], "list result wins, no union");
    eyre::ensure!(store.status() == StoreStatus::Settled);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn sibling_success_does_not_mask_failure() -> eyre::Result<()> {
    let (store, mut requests) = connected_store();

    let failing = tokio::spawn({
        let handle = store.clone();
        async move { handle.list(TaskQuery::new()).await }
    });
    let first = requests
        .recv()
        .await
        .ok_or_else(|| eyre::eyre!("list was not forwarded"))?;
    let succeeding = tokio::spawn({
        let handle = store.clone();
        async move { handle.create(TaskDraft::new().with_title("Banner")).await }
    });
    let second = requests
        .recv()
        .await
        .ok_or_else(|| eyre::eyre!("create was not forwarded"))?;

    first.fail(GatewayError::rejected(503, "maintenance"));
    let failed = failing.await?;
    let second_route = second.route();
    let GatewayRequest::CreateTask { respond, .. } = second else {
        eyre::bail!("expected a create request, got {second_route}");
    };
    respond.respond(Ok(published_task(3, "Banner", 100)));
    let settled = succeeding.await?;

    eyre::ensure!(failed.failure_message() == Some("maintenance"));
    eyre::ensure!(settled.is_settled());
    eyre::ensure!(store.error().as_deref() == Some("maintenance"));
    eyre::ensure!(store.status() == StoreStatus::Error);
    eyre::ensure!(task_ids(&store.tasks()) == vec![3]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn forwarded_requests_name_their_routes() -> eyre::Result<()> {
    let (store, mut requests) = connected_store();

    let deletion = tokio::spawn({
        let handle = store.clone();
        async move { handle.delete(TaskId::new(4)).await }
    });
    let request = requests
        .recv()
        .await
        .ok_or_else(|| eyre::eyre!("delete was not forwarded"))?;
    let route = request.route();
    request.fail(GatewayError::rejected_without_message(404));
    let outcome = deletion.await?;

    eyre::ensure!(route.method() == RequestMethod::Delete);
    eyre::ensure!(route.path() == "/tasks/4");
    eyre::ensure!(outcome.failure_message() == Some("error deleting task"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn closed_backend_settles_as_failure() {
    let (store, requests) = connected_store();
    drop(requests);

    let settlement = store.list(TaskQuery::new()).await;

    assert_eq!(settlement.failure_message(), Some("error loading tasks"));
    assert_eq!(store.in_flight(), 0);
}
