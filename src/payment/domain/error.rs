//! Error types for payment validation.

use super::TransactionId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Violations detected on outgoing amounts or cached transactions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentDomainError {
    /// An outgoing amount is zero or negative.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// A stored transaction carries a zero or negative amount.
    #[error("transaction {0} has a non-positive amount")]
    NonPositiveRecordedAmount(TransactionId),

    /// A task payment is not linked to a task.
    #[error("payment transaction {0} is not linked to a task")]
    PaymentWithoutTask(TransactionId),

    /// A pending transaction already has a processing timestamp.
    #[error("pending transaction {0} already has a processing time")]
    ProcessedWhilePending(TransactionId),

    /// A completed or failed transaction lacks its processing timestamp.
    #[error("transaction {0} was resolved without a processing time")]
    MissingProcessedAt(TransactionId),
}

/// Error returned while parsing transaction types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transaction type: {0}")]
pub struct ParseTransactionTypeError(pub String);
