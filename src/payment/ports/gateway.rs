//! Gateway port for remote wallet operations.

use crate::gateway::{GatewayResult, RequestMethod, Route};
use crate::payment::domain::{NewTransaction, Transaction};
use async_trait::async_trait;

/// Remote wallet operations for the session user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Lists the session user's transaction history.
    async fn list_transactions(&self) -> GatewayResult<Vec<Transaction>>;

    /// Posts a deposit or payout and returns the recorded transaction.
    async fn create_transaction(&self, request: &NewTransaction) -> GatewayResult<Transaction>;
}

/// Backend routes of the transaction endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentRoute {
    /// `GET /transactions`
    List,
    /// `POST /transactions`
    Create,
}

impl PaymentRoute {
    /// Resolves the method and path.
    #[must_use]
    pub fn route(self) -> Route {
        match self {
            Self::List => Route::new(RequestMethod::Get, "/transactions"),
            Self::Create => Route::new(RequestMethod::Post, "/transactions"),
        }
    }
}
