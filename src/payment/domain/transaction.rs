//! Wallet transaction projection and outgoing transaction requests.

use super::{ParseTransactionTypeError, PaymentDomainError, TransactionId};
use crate::collection::Keyed;
use crate::identity::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money added to the wallet.
    Deposit,
    /// Money withdrawn from the wallet.
    Payout,
    /// Money moved between users for a task.
    Payment,
}

impl TransactionType {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Payout => "payout",
            Self::Payment => "payment",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = ParseTransactionTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "payout" => Ok(Self::Payout),
            "payment" => Ok(Self::Payment),
            _ => Err(ParseTransactionTypeError(value.to_owned())),
        }
    }
}

/// Processing state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Awaiting processing.
    Pending,
    /// Processed successfully.
    Completed,
    /// Processing failed.
    Failed,
}

/// Cached projection of a wallet transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    user: UserId,
    transaction_type: TransactionType,
    amount: Decimal,
    status: TransactionStatus,
    #[serde(default)]
    description: String,
    #[serde(default)]
    task: Option<TaskId>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    processed_at: Option<DateTime<Utc>>,
}

/// Parameter object for building a [`Transaction`].
#[derive(Debug, Clone)]
pub struct TransactionData {
    /// Transaction identifier.
    pub id: TransactionId,
    /// Wallet owner.
    pub user: UserId,
    /// Direction of money movement.
    pub transaction_type: TransactionType,
    /// Amount moved.
    pub amount: Decimal,
    /// Processing state.
    pub status: TransactionStatus,
    /// Free-form note.
    pub description: String,
    /// Linked task, required for payments.
    pub task: Option<TaskId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Processing time, absent while pending.
    pub processed_at: Option<DateTime<Utc>>,
}

impl TransactionData {
    /// Creates pending transaction data with no description or task link.
    #[must_use]
    pub const fn new(
        id: TransactionId,
        user: UserId,
        transaction_type: TransactionType,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            transaction_type,
            amount,
            status: TransactionStatus::Pending,
            description: String::new(),
            task: None,
            created_at: timestamp,
            processed_at: None,
        }
    }
}

impl From<TransactionData> for Transaction {
    fn from(data: TransactionData) -> Self {
        Self {
            id: data.id,
            user: data.user,
            transaction_type: data.transaction_type,
            amount: data.amount,
            status: data.status,
            description: data.description,
            task: data.task,
            created_at: data.created_at,
            processed_at: data.processed_at,
        }
    }
}

impl Transaction {
    /// Returns the transaction identifier.
    #[must_use]
    pub const fn id(&self) -> TransactionId {
        self.id
    }

    /// Returns the wallet owner.
    #[must_use]
    pub const fn user(&self) -> UserId {
        self.user
    }

    /// Returns the direction of money movement.
    #[must_use]
    pub const fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// Returns the amount moved.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the processing state.
    #[must_use]
    pub const fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Returns the free-form note.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the linked task, if any.
    #[must_use]
    pub const fn task(&self) -> Option<TaskId> {
        self.task
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the processing timestamp, absent while pending.
    #[must_use]
    pub const fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }

    /// Checks the invariants of a single projection.
    ///
    /// # Errors
    ///
    /// Returns the first [`PaymentDomainError`] found.
    pub fn check_invariants(&self) -> Result<(), PaymentDomainError> {
        if self.amount <= Decimal::ZERO {
            return Err(PaymentDomainError::NonPositiveRecordedAmount(self.id));
        }
        if self.transaction_type == TransactionType::Payment && self.task.is_none() {
            return Err(PaymentDomainError::PaymentWithoutTask(self.id));
        }
        match (self.status, self.processed_at) {
            (TransactionStatus::Pending, Some(_)) => {
                Err(PaymentDomainError::ProcessedWhilePending(self.id))
            }
            (TransactionStatus::Completed | TransactionStatus::Failed, None) => {
                Err(PaymentDomainError::MissingProcessedAt(self.id))
            }
            _ => Ok(()),
        }
    }
}

impl Keyed for Transaction {
    type Key = TransactionId;

    fn key(&self) -> TransactionId {
        self.id
    }
}

/// Strictly positive amount accepted for deposits and payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TransactionAmount(Decimal);

impl TransactionAmount {
    /// Validates `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentDomainError::NonPositiveAmount`] for zero or negative
    /// values.
    pub fn new(amount: Decimal) -> Result<Self, PaymentDomainError> {
        if amount > Decimal::ZERO {
            Ok(Self(amount))
        } else {
            Err(PaymentDomainError::NonPositiveAmount(amount))
        }
    }

    /// Returns the validated value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for TransactionAmount {
    type Error = PaymentDomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TransactionAmount> for Decimal {
    fn from(amount: TransactionAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for TransactionAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of a deposit or payout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    transaction_type: TransactionType,
    amount: TransactionAmount,
}

impl NewTransaction {
    /// Builds a deposit request.
    #[must_use]
    pub const fn deposit(amount: TransactionAmount) -> Self {
        Self {
            transaction_type: TransactionType::Deposit,
            amount,
        }
    }

    /// Builds a payout request.
    #[must_use]
    pub const fn payout(amount: TransactionAmount) -> Self {
        Self {
            transaction_type: TransactionType::Payout,
            amount,
        }
    }

    /// Returns the requested direction.
    #[must_use]
    pub const fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// Returns the requested amount.
    #[must_use]
    pub const fn amount(&self) -> TransactionAmount {
        self.amount
    }
}
