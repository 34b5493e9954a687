//! Adapter implementations for the payment context.

pub mod memory;
