//! Adapter implementations for the review context.

pub mod memory;
