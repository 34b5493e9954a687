//! Unit tests for the payment context.


use crate::identity::UserId;
use crate::payment::domain::{
    Transaction, TransactionData, TransactionId, TransactionStatus, TransactionType,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

fn timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default()
}

fn transaction_data(id: u64, transaction_type: TransactionType, amount: i64) -> TransactionData {
    TransactionData::new(
        TransactionId::new(id),
        UserId::new(7),
        transaction_type,
        Decimal::from(amount),
        timestamp(),
    )
}

/// Builds a completed transaction processed at creation time.
fn completed(id: u64, transaction_type: TransactionType, amount: i64) -> Transaction {
    let mut data = transaction_data(id, transaction_type, amount);
    data.status = TransactionStatus::Completed;
    data.processed_at = Some(timestamp());
    Transaction::from(data)
}
