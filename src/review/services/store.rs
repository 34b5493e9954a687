//! Client-side review store.

use crate::{
    collection::prepend_unique,
    config::{ClientConfig, FailureMessages},
    review::{
        domain::{Review, ReviewDraft, ReviewQuery},
        ports::ReviewGateway,
    },
    tracker::{OperationPhase, OperationToken, Settlement, StoreStatus, TrackedState},
};
use std::sync::Arc;
use tracing::{debug, warn};

fn replace_listed(reviews: &mut Vec<Review>, listed: Vec<Review>) {
    for review in &listed {
        if let Err(err) = review.check_invariants() {
            warn!(review_id = %review.id(), error = %err, "listed review violates invariants");
        }
    }
    *reviews = listed;
}

fn insert_created(reviews: &mut Vec<Review>, review: Review) {
    if let Err(err) = review.check_invariants() {
        warn!(review_id = %review.id(), error = %err, "created review violates invariants");
    }
    let id = review.id();
    if prepend_unique(reviews, review) {
        debug!(review_id = %id, "created review displaced a cached entry");
    }
}

/// Cached reviews as last listed.
///
/// Reviews are not deduplicated by task or reviewer; the cache reflects what
/// the backend returned.
pub struct ReviewStore<G>
where
    G: ReviewGateway,
{
    gateway: Arc<G>,
    state: TrackedState<Vec<Review>>,
    messages: Arc<FailureMessages>,
}

impl<G> Clone for ReviewStore<G>
where
    G: ReviewGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            state: self.state.clone(),
            messages: Arc::clone(&self.messages),
        }
    }
}

impl<G> ReviewStore<G>
where
    G: ReviewGateway,
{
    /// Creates an empty store with default configuration.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_config(gateway, &ClientConfig::default())
    }

    /// Creates an empty store using `config` for messages and history.
    #[must_use]
    pub fn with_config(gateway: Arc<G>, config: &ClientConfig) -> Self {
        Self {
            gateway,
            state: TrackedState::new(config.operation_history()),
            messages: Arc::new(config.messages().clone()),
        }
    }

    /// Lists reviews and replaces the cache.
    pub async fn list(&self, query: ReviewQuery) -> Settlement {
        self.state
            .run(
                "list_reviews",
                &self.messages.load_reviews,
                self.gateway.list_reviews(&query),
                replace_listed,
            )
            .await
    }

    /// Posts a review and prepends the recorded one.
    pub async fn create(&self, draft: ReviewDraft) -> Settlement {
        self.state
            .run(
                "create_review",
                &self.messages.create_review,
                self.gateway.create_review(&draft),
                insert_created,
            )
            .await
    }

    /// Returns a snapshot of the cached reviews.
    #[must_use]
    pub fn reviews(&self) -> Vec<Review> {
        self.state.read(Clone::clone)
    }

    /// Returns the aggregate operation status.
    #[must_use]
    pub fn status(&self) -> StoreStatus {
        self.state.status()
    }

    /// Returns the error slot.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    /// Empties the error slot without dispatching anything.
    pub fn clear_error(&self) {
        self.state.clear_error();
    }

    /// Returns the phase of one operation, if still remembered.
    #[must_use]
    pub fn phase(&self, token: OperationToken) -> Option<OperationPhase> {
        self.state.phase(token)
    }

    /// Number of operations still in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.state.in_flight()
    }
}
