//! Gateway port for remote review operations.

use crate::gateway::{GatewayResult, RequestMethod, Route};
use crate::review::domain::{Review, ReviewDraft, ReviewQuery};
use async_trait::async_trait;

/// Remote review operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Lists reviews, forwarding the query's filters unmodified.
    async fn list_reviews(&self, query: &ReviewQuery) -> GatewayResult<Vec<Review>>;

    /// Posts a review and returns the recorded one.
    async fn create_review(&self, draft: &ReviewDraft) -> GatewayResult<Review>;
}

/// Backend routes of the review endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewRoute {
    /// `GET /reviews`
    List,
    /// `POST /reviews`
    Create,
}

impl ReviewRoute {
    /// Resolves the method and path.
    #[must_use]
    pub fn route(self) -> Route {
        match self {
            Self::List => Route::new(RequestMethod::Get, "/reviews"),
            Self::Create => Route::new(RequestMethod::Post, "/reviews"),
        }
    }
}
