//! Client-side payment store.

use crate::{
    collection::prepend_unique,
    config::{ClientConfig, FailureMessages},
    payment::{
        domain::{NewTransaction, Transaction, TransactionAmount},
        ports::PaymentGateway,
    },
    tracker::{OperationPhase, OperationToken, Settlement, StoreStatus, TrackedState},
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct PaymentLedger {
    transactions: Vec<Transaction>,
    balance: Option<Decimal>,
}

impl PaymentLedger {
    fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    fn insert_created(&mut self, transaction: Transaction) {
        if let Err(err) = transaction.check_invariants() {
            warn!(
                transaction_id = %transaction.id(),
                error = %err,
                "created transaction violates invariants"
            );
        }
        let id = transaction.id();
        if prepend_unique(&mut self.transactions, transaction) {
            debug!(transaction_id = %id, "created transaction displaced a cached entry");
        }
    }
}

/// Cached transaction history and wallet balance for the session user.
///
/// Deposits and payouts enter the history only after the backend confirms
/// them. The balance is never derived from the history.
pub struct PaymentStore<G>
where
    G: PaymentGateway,
{
    gateway: Arc<G>,
    state: TrackedState<PaymentLedger>,
    messages: Arc<FailureMessages>,
}

impl<G> Clone for PaymentStore<G>
where
    G: PaymentGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            state: self.state.clone(),
            messages: Arc::clone(&self.messages),
        }
    }
}

impl<G> PaymentStore<G>
where
    G: PaymentGateway,
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

    /// Lists the transaction history and replaces the cached one.
    pub async fn list(&self) -> Settlement {
        self.state
            .run(
                "list_transactions",
                &self.messages.load_transactions,
                self.gateway.list_transactions(),
                PaymentLedger::replace_all,
            )
            .await
    }

    /// Posts a deposit and prepends the confirmed transaction.
    pub async fn create_deposit(&self, amount: TransactionAmount) -> Settlement {
        self.post("create_deposit", NewTransaction::deposit(amount))
            .await
    }

    /// Requests a payout and prepends the confirmed transaction.
    pub async fn request_payout(&self, amount: TransactionAmount) -> Settlement {
        self.post("request_payout", NewTransaction::payout(amount))
            .await
    }

    async fn post(&self, operation: &'static str, request: NewTransaction) -> Settlement {
        self.state
            .run(
                operation,
                &self.messages.create_transaction,
                self.gateway.create_transaction(&request),
                PaymentLedger::insert_created,
            )
            .await
    }

    /// Returns a snapshot of the cached history.
    #[must_use]
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.read(|ledger| ledger.transactions.clone())
    }

    /// Returns the last balance handed to [`Self::set_balance`].
    #[must_use]
    pub fn balance(&self) -> Option<Decimal> {
        self.state.read(|ledger| ledger.balance)
    }

    /// Records the wallet balance reported by the backend.
    pub fn set_balance(&self, balance: Decimal) {
        self.state.update(|ledger| ledger.balance = Some(balance));
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
