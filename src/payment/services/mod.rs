//! Services for the payment context.

mod store;

pub use store::PaymentStore;
