//! Task lifecycle and synchronization.
//!
//! The task store caches the backend's tasks, tracks every in-flight
//! operation, and merges settlements back into the collection. Derived views
//! (the feed, "my active tasks", "my completed tasks") are computed on demand
//! from whatever the store currently holds. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The store in [`services`]
//! - Read-side views in [`derivation`]

pub mod adapters;
pub mod derivation;
pub mod domain;
pub mod ports;
pub mod services;
