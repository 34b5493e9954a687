//! Per-store operation bookkeeping.

use super::{OperationPhase, OperationToken, StoreStatus};
use std::collections::{HashMap, VecDeque};

/// Number of settled operations remembered per store by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

#[derive(Debug, Clone)]
struct OperationRecord {
    operation: &'static str,
    phase: OperationPhase,
}

/// Tracks the phase of every operation dispatched against one store.
///
/// Pending operations are always retained. Settled and failed operations are
/// retained up to the history limit, oldest evicted first.
#[derive(Debug, Clone)]
pub struct OperationTracker {
    records: HashMap<OperationToken, OperationRecord>,
    settled_order: VecDeque<OperationToken>,
    error: Option<String>,
    history_limit: usize,
    has_settled: bool,
}

impl Default for OperationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationTracker {
    /// Creates a tracker with [`DEFAULT_HISTORY_LIMIT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Creates a tracker remembering at most `limit` settled operations.
    ///
    /// A limit of zero is raised to one so the latest settlement stays
    /// queryable.
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            records: HashMap::new(),
            settled_order: VecDeque::new(),
            error: None,
            history_limit: limit.max(1),
            has_settled: false,
        }
    }

    /// Records a new pending operation and clears the error slot.
    pub fn dispatch(&mut self, operation: &'static str) -> OperationToken {
        let token = OperationToken::new();
        self.records.insert(
            token,
            OperationRecord {
                operation,
                phase: OperationPhase::Pending,
            },
        );
        self.error = None;
        token
    }

    /// Marks an operation as successfully settled.
    pub fn settle_success(&mut self, token: OperationToken) -> OperationPhase {
        self.settle(token, OperationPhase::Settled)
    }

    /// Marks an operation as failed and captures `message` in the error slot.
    pub fn settle_failure(
        &mut self,
        token: OperationToken,
        message: impl Into<String>,
    ) -> OperationPhase {
        let message = message.into();
        self.error = Some(message.clone());
        self.settle(token, OperationPhase::Failed { message })
    }

    fn settle(&mut self, token: OperationToken, phase: OperationPhase) -> OperationPhase {
        let record = self.records.entry(token).or_insert(OperationRecord {
            operation: "unknown",
            phase: OperationPhase::Pending,
        });
        let was_pending = record.phase.is_pending();
        record.phase = phase.clone();
        self.has_settled = true;

        if was_pending {
            self.settled_order.push_back(token);
            self.evict_history();
        }
        phase
    }

    fn evict_history(&mut self) {
        while self.settled_order.len() > self.history_limit {
            if let Some(oldest) = self.settled_order.pop_front() {
                self.records.remove(&oldest);
            }
        }
    }

    /// Returns the aggregate store status.
    #[must_use]
    pub fn status(&self) -> StoreStatus {
        if self.in_flight() > 0 {
            StoreStatus::Pending
        } else if self.error.is_some() {
            StoreStatus::Error
        } else if self.has_settled {
            StoreStatus::Settled
        } else {
            StoreStatus::Idle
        }
    }

    /// Returns the error slot.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Empties the error slot. Calling it on an empty slot is a no-op.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Returns the phase of a tracked operation.
    ///
    /// Returns `None` for unknown tokens and for settlements already evicted
    /// from the history.
    #[must_use]
    pub fn phase(&self, token: OperationToken) -> Option<&OperationPhase> {
        self.records.get(&token).map(|record| &record.phase)
    }

    /// Returns the operation label recorded at dispatch.
    #[must_use]
    pub fn operation(&self, token: OperationToken) -> Option<&'static str> {
        self.records.get(&token).map(|record| record.operation)
    }

    /// Number of operations still in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.records
            .values()
            .filter(|record| record.phase.is_pending())
            .count()
    }
}
