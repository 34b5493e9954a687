//! Payment context: wallet transactions and the client-side payment store.
//!
//! Deposits and payouts are posted through the [`ports::PaymentGateway`] and
//! only enter the cached history once the backend confirms them. The wallet
//! balance is owned by the backend; the store merely holds the last value
//! handed to it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
