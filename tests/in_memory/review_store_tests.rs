//! In-memory integration tests for the review store.

use super::helpers::{CUSTOMER, EXECUTOR};
use rstest::{fixture, rstest};
use std::sync::Arc;
use taskmarket::{
    identity::UserId,
    review::{
        adapters::memory::InMemoryReviewGateway,
        domain::{Rating, ReviewDraft, ReviewQuery},
        services::ReviewStore,
    },
    task::domain::TaskId,
    tracker::StoreStatus,
};

type TestReviewGateway = InMemoryReviewGateway<mockable::DefaultClock>;

#[fixture]
fn gateway() -> TestReviewGateway {
    TestReviewGateway::new(CUSTOMER)
}

fn draft(task: u64, stars: u8, freelancer: UserId) -> eyre::Result<ReviewDraft> {
    Ok(
        ReviewDraft::new(TaskId::new(task), Rating::new(stars)?, "Thanks")
            .with_freelancer(freelancer),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitted_review_is_attributed_and_prepended(
    gateway: TestReviewGateway,
) -> eyre::Result<()> {
    let store = ReviewStore::new(Arc::new(gateway));

    store.create(draft(1, 5, EXECUTOR)?).await;
    store.create(draft(2, 4, EXECUTOR)?).await;

    let reviews = store.reviews();
    let first = reviews
        .first()
        .ok_or_else(|| eyre::eyre!("expected a cached review"))?;
    eyre::ensure!(reviews.len() == 2);
    eyre::ensure!(first.task() == TaskId::new(2));
    eyre::ensure!(first.employer() == CUSTOMER);
    eyre::ensure!(first.freelancer() == EXECUTOR);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_filters_by_freelancer(gateway: TestReviewGateway) -> eyre::Result<()> {
    let store = ReviewStore::new(Arc::new(gateway));
    store.create(draft(1, 5, EXECUTOR)?).await;
    store.create(draft(2, 3, UserId::new(8))?).await;

    store
        .list(ReviewQuery::new().with_freelancer(EXECUTOR))
        .await;

    let reviews = store.reviews();
    eyre::ensure!(reviews.len() == 1);
    eyre::ensure!(reviews.iter().all(|review| review.freelancer() == EXECUTOR));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn self_review_is_rejected_by_backend(gateway: TestReviewGateway) -> eyre::Result<()> {
    let store = ReviewStore::new(Arc::new(gateway));

    let settlement = store.create(draft(1, 5, CUSTOMER)?).await;

    eyre::ensure!(settlement.failure_message().is_some());
    eyre::ensure!(store.reviews().is_empty());
    eyre::ensure!(store.status() == StoreStatus::Error);

    store.clear_error();
    eyre::ensure!(store.error().is_none());
    Ok(())
}
