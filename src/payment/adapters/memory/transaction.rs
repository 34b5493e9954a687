//! In-memory wallet gateway for store tests and offline demos.

use async_trait::async_trait;
use mockable::Clock;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    gateway::{GatewayError, GatewayResult, next_identifier},
    identity::UserId,
    payment::{
        domain::{
            NewTransaction, Transaction, TransactionData, TransactionId, TransactionStatus,
            TransactionType,
        },
        ports::PaymentGateway,
    },
};

/// Thread-safe stand-in for the wallet backend.
///
/// Deposits complete immediately. Payouts reserve funds and stay pending.
#[derive(Debug)]
pub struct InMemoryPaymentGateway<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryPaymentState>>,
    acting_user: UserId,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryPaymentGateway<C>
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
struct InMemoryPaymentState {
    transactions: BTreeMap<TransactionId, Transaction>,
    wallets: HashMap<UserId, Decimal>,
    last_id: u64,
    pending_failure: Option<GatewayError>,
}

impl InMemoryPaymentGateway<mockable::DefaultClock> {
    /// Creates an empty gateway on the system clock.
    #[must_use]
    pub fn new(acting_user: UserId) -> Self {
        Self::with_clock(acting_user, Arc::new(mockable::DefaultClock))
    }
}

impl<C> InMemoryPaymentGateway<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty gateway stamping timestamps from `clock`.
    #[must_use]
    pub fn with_clock(acting_user: UserId, clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryPaymentState::default())),
            acting_user,
            clock,
        }
    }

    /// Returns a handle acting as `user` over the same backing state.
    #[must_use]
    pub fn as_user(&self, user: UserId) -> Self {
        Self {
            acting_user: user,
            ..self.clone()
        }
    }

    /// Stores a transaction as-is.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the backing lock is poisoned.
    pub fn seed(&self, transaction: Transaction) -> GatewayResult<()> {
        let mut state = self.write()?;
        state.last_id = state.last_id.max(transaction.id().value());
        state.transactions.insert(transaction.id(), transaction);
        Ok(())
    }

    /// Adds `amount` to the acting user's wallet without recording a
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the backing lock is poisoned.
    pub fn credit(&self, amount: Decimal) -> GatewayResult<()> {
        let mut state = self.write()?;
        *state.wallets.entry(self.acting_user).or_default() += amount;
        Ok(())
    }

    /// Returns the acting user's wallet balance.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the backing lock is poisoned.
    pub fn balance(&self) -> GatewayResult<Decimal> {
        Ok(self
            .read()?
            .wallets
            .get(&self.acting_user)
            .copied()
            .unwrap_or_default())
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

    fn read(&self) -> GatewayResult<RwLockReadGuard<'_, InMemoryPaymentState>> {
        self.state
            .read()
            .map_err(|err| GatewayError::Transport(err.to_string()))
    }

    fn write(&self) -> GatewayResult<RwLockWriteGuard<'_, InMemoryPaymentState>> {
        self.state
            .write()
            .map_err(|err| GatewayError::Transport(err.to_string()))
    }

    fn serve(&self) -> GatewayResult<RwLockWriteGuard<'_, InMemoryPaymentState>> {
        let mut state = self.write()?;
        if let Some(error) = state.pending_failure.take() {
            return Err(error);
        }
        Ok(state)
    }
}

#[async_trait]
impl<C> PaymentGateway for InMemoryPaymentGateway<C>
where
    C: Clock + Send + Sync,
{
    async fn list_transactions(&self) -> GatewayResult<Vec<Transaction>> {
        let state = self.serve()?;
        let mut history: Vec<Transaction> = state
            .transactions
            .values()
            .filter(|transaction| transaction.user() == self.acting_user)
            .cloned()
            .collect();
        history.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(history)
    }

    async fn create_transaction(&self, request: &NewTransaction) -> GatewayResult<Transaction> {
        let mut state = self.serve()?;
        let amount = request.amount().value();
        let now = self.clock.utc();
        let id = TransactionId::new(next_identifier(state.last_id)?);
        let mut data =
            TransactionData::new(id, self.acting_user, request.transaction_type(), amount, now);

        let wallet = state.wallets.entry(self.acting_user).or_default();
        match request.transaction_type() {
            TransactionType::Deposit => {
                *wallet += amount;
                data.status = TransactionStatus::Completed;
                data.processed_at = Some(now);
                "Deposit".clone_into(&mut data.description);
            }
            TransactionType::Payout => {
                if amount > *wallet {
                    return Err(GatewayError::rejected(400, "insufficient funds"));
                }
                *wallet -= amount;
                "Payout request".clone_into(&mut data.description);
            }
            TransactionType::Payment => {
                return Err(GatewayError::rejected(
                    400,
                    "task payments are created by the backend",
                ));
            }
        }

        let transaction = Transaction::from(data);
        state.last_id = id.value();
        state.transactions.insert(id, transaction.clone());
        Ok(transaction)
    }
}
