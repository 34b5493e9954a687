//! Port contracts for the payment context.

pub mod gateway;

pub use gateway::{PaymentGateway, PaymentRoute};

#[cfg(test)]
pub use gateway::MockPaymentGateway;
