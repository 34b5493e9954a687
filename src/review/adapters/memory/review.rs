//! In-memory review gateway for store tests and offline demos.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::{
    gateway::{GatewayError, GatewayResult, next_identifier},
    identity::UserId,
    review::{
        domain::{Review, ReviewData, ReviewDraft, ReviewId, ReviewQuery},
        ports::ReviewGateway,
    },
};

/// Thread-safe stand-in for the review backend.
///
/// Submissions that omit the employer are attributed to the acting user.
#[derive(Debug)]
pub struct InMemoryReviewGateway<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryReviewState>>,
    acting_user: UserId,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryReviewGateway<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            acting_user: self.acting_user,
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryReviewState {
    reviews: BTreeMap<ReviewId, Review>,
    last_id: u64,
    pending_failure: Option<GatewayError>,
}

impl InMemoryReviewGateway<mockable::DefaultClock> {
    /// Creates an empty gateway on the system clock.
    #[must_use]
    pub fn new(acting_user: UserId) -> Self {
        Self::with_clock(acting_user, Arc::new(mockable::DefaultClock))
    }
}

impl<C> InMemoryReviewGateway<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty gateway stamping timestamps from `clock`.
    #[must_use]
    pub fn with_clock(acting_user: UserId, clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryReviewState::default())),
            acting_user,
            clock,
        }
    }

    /// Stores a review as-is.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the backing lock is poisoned.
    pub fn seed(&self, review: Review) -> GatewayResult<()> {
        let mut state = self.write()?;
        state.last_id = state.last_id.max(review.id().value());
        state.reviews.insert(review.id(), review);
        Ok(())
    }

    /// Makes the next request fail with `error` instead of being served.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the backing lock is poisoned.
    pub fn fail_next(&self, error: GatewayError) -> GatewayResult<()> {
        self.write()?.pending_failure = Some(error);
        Ok(())
    }

    fn write(&self) -> GatewayResult<RwLockWriteGuard<'_, InMemoryReviewState>> {
        self.state
            .write()
            .map_err(|err| GatewayError::Transport(err.to_string()))
    }

    fn serve(&self) -> GatewayResult<RwLockWriteGuard<'_, InMemoryReviewState>> {
        let mut state = self.write()?;
        if let Some(error) = state.pending_failure.take() {
            return Err(error);
        }
        Ok(state)
    }
}

#[async_trait]
impl<C> ReviewGateway for InMemoryReviewGateway<C>
where
    C: Clock + Send + Sync,
{
    async fn list_reviews(&self, query: &ReviewQuery) -> GatewayResult<Vec<Review>> {
        let state = self.serve()?;
        let mut reviews: Vec<Review> = state
            .reviews
            .values()
            .filter(|review| query.matches(review))
            .cloned()
            .collect();
        reviews.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(reviews)
    }

    async fn create_review(&self, draft: &ReviewDraft) -> GatewayResult<Review> {
        let freelancer = draft
            .freelancer()
            .ok_or_else(|| GatewayError::rejected(400, "freelancer is required"))?;
        let employer = draft.employer().unwrap_or(self.acting_user);

        let mut state = self.serve()?;
        let id = ReviewId::new(next_identifier(state.last_id)?);
        let review = Review::from(ReviewData {
            id,
            task: draft.task(),
            employer,
            freelancer,
            rating: draft.rating().stars(),
            comment: draft.comment().to_owned(),
            created_at: self.clock.utc(),
        });
        review
            .check_invariants()
            .map_err(|err| GatewayError::rejected(400, err.to_string()))?;
        state.last_id = id.value();
        state.reviews.insert(id, review.clone());
        Ok(review)
    }
}
