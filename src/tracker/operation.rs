//! Operation identity and phase types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlation token identifying one dispatched store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationToken(Uuid);

impl OperationToken {
    /// Creates a new random token.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for OperationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Phase of a single tracked operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationPhase {
    /// The gateway call has been issued and has not completed.
    Pending,
    /// The call succeeded and its payload has been merged.
    Settled,
    /// The call failed; the collection was left untouched.
    Failed {
        /// Message captured into the store's error slot.
        message: String,
    },
}

impl OperationPhase {
    /// Whether the operation is still in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the operation completed successfully.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }

    /// Returns the failure message when the operation failed.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            Self::Pending | Self::Settled => None,
        }
    }
}

/// Store-wide status derived from every tracked operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreStatus {
    /// Nothing has been dispatched yet.
    Idle,
    /// At least one operation is in flight. Render a loading state.
    Pending,
    /// Nothing is in flight and the error slot is empty.
    Settled,
    /// Nothing is in flight and the error slot holds a message.
    Error,
}

impl StoreStatus {
    /// Returns a stable lower-case label, mainly for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Settled => "settled",
            Self::Error => "error",
        }
    }
}

/// Outcome handed back to the caller of a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    token: OperationToken,
    phase: OperationPhase,
}

impl Settlement {
    pub(crate) const fn new(token: OperationToken, phase: OperationPhase) -> Self {
        Self { token, phase }
    }

    /// Returns the operation's correlation token.
    #[must_use]
    pub const fn token(&self) -> OperationToken {
        self.token
    }

    /// Returns the phase the operation settled into.
    #[must_use]
    pub const fn phase(&self) -> &OperationPhase {
        &self.phase
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.phase.is_settled()
    }

    /// Returns the failure message when the operation failed.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        self.phase.failure_message()
    }
}
