//! Shared harness binding an operation tracker to a store's collection.

use super::{OperationPhase, OperationToken, OperationTracker, Settlement, StoreStatus};
use crate::gateway::GatewayResult;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

#[derive(Debug)]
struct Inner<S> {
    tracker: OperationTracker,
    data: S,
}

/// Cloneable handle to a store's collection and its operation tracker.
///
/// The lock is only held inside synchronous sections and never across an
/// `.await`, so every dispatch and every settlement is observed atomically.
#[derive(Debug)]
pub(crate) struct TrackedState<S> {
    inner: Arc<Mutex<Inner<S>>>,
}

impl<S> Clone for TrackedState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Default> TrackedState<S> {
    pub(crate) fn new(history_limit: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                tracker: OperationTracker::with_history_limit(history_limit),
                data: S::default(),
            })),
        }
    }
}

impl<S> TrackedState<S> {
    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Dispatches `call` under a fresh token and settles it on completion.
    ///
    /// `merge` runs only when the call succeeds; on failure the error slot
    /// receives the payload message or `fallback`.
    pub(crate) async fn run<T, F, M>(
        &self,
        operation: &'static str,
        fallback: &str,
        call: F,
        merge: M,
    ) -> Settlement
    where
        F: Future<Output = GatewayResult<T>>,
        M: FnOnce(&mut S, T),
    {
        let token = self.dispatch(operation);
        let result = call.await;
        self.settle(token, operation, result, fallback, merge)
    }

    pub(crate) fn dispatch(&self, operation: &'static str) -> OperationToken {
        let token = self.lock().tracker.dispatch(operation);
        debug!(operation, %token, "operation dispatched");
        token
    }

    pub(crate) fn settle<T, M>(
        &self,
        token: OperationToken,
        operation: &'static str,
        result: GatewayResult<T>,
        fallback: &str,
        merge: M,
    ) -> Settlement
    where
        M: FnOnce(&mut S, T),
    {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let phase = match result {
            Ok(payload) => {
                merge(&mut inner.data, payload);
                debug!(operation, %token, "operation settled");
                inner.tracker.settle_success(token)
            }
            Err(err) => {
                let message = err.user_message().unwrap_or(fallback).to_owned();
                warn!(operation, %token, error = %err, %message, "operation failed");
                inner.tracker.settle_failure(token, message)
            }
        };
        Settlement::new(token, phase)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.lock().data)
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.lock().data)
    }

    pub(crate) fn status(&self) -> StoreStatus {
        self.lock().tracker.status()
    }

    pub(crate) fn error(&self) -> Option<String> {
        self.lock().tracker.error().map(ToOwned::to_owned)
    }

    pub(crate) fn clear_error(&self) {
        self.lock().tracker.clear_error();
    }

    pub(crate) fn phase(&self, token: OperationToken) -> Option<OperationPhase> {
        self.lock().tracker.phase(token).cloned()
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.lock().tracker.in_flight()
    }
}
