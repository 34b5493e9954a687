//! Domain model for wallet transactions.

mod error;
mod ids;
mod transaction;

pub use error::{PaymentDomainError, ParseTransactionTypeError};
pub use ids::TransactionId;
pub use transaction::{
    NewTransaction, Transaction, TransactionAmount, TransactionData, TransactionStatus,
    TransactionType,
};
