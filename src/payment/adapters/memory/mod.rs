//! In-memory adapters for the payment context.

mod transaction;

pub use transaction::InMemoryPaymentGateway;
