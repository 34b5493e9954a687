//! Taskmarket: client-side core of a freelance task marketplace.
//!
//! This crate keeps an in-memory model of tasks, wallet transactions and
//! reviews consistent with a remote backend, tracks every asynchronous
//! request it makes, and derives the personal and feed views a client
//! renders.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: projections, identifiers and invariant checks
//! - **Ports**: async gateway traits describing the remote backend
//! - **Adapters**: in-memory gateways for tests and offline use
//! - **Services**: stores that dispatch, await and settle operations
//!
//! # Modules
//!
//! - [`task`]: task lifecycle, the task store and derived views
//! - [`payment`]: deposits, payouts and the wallet history
//! - [`review`]: ratings left after a task
//! - [`tracker`]: per-operation bookkeeping shared by every store
//! - [`gateway`]: failure taxonomy, routes and the channel gateway
//! - [`config`] and [`telemetry`]: start-up configuration and logging

pub mod collection;
pub mod config;
pub mod gateway;
pub mod identity;
pub mod payment;
pub mod review;
pub mod task;
pub mod telemetry;
pub mod tracker;
