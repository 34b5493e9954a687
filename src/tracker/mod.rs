//! Async operation tracking shared by every entity store.
//!
//! Each remote-triggered store operation is tagged with an
//! [`OperationToken`] at dispatch. The token's [`OperationPhase`] moves from
//! pending to settled or failed when the gateway call completes, and the
//! store-wide [`StoreStatus`] is derived from the phases of all tracked
//! operations rather than overwritten by whichever settlement arrives last.
//!
//! - [`OperationTracker`] is the bookkeeping state machine.
//! - `TrackedState` couples a tracker with a store's collection so that a
//!   settlement's phase change and its collection merge happen in one
//!   critical section.

mod bookkeeping;
mod operation;
mod state;

pub use bookkeeping::{DEFAULT_HISTORY_LIMIT, OperationTracker};
pub use operation::{OperationPhase, OperationToken, Settlement, StoreStatus};

pub(crate) use state::TrackedState;
