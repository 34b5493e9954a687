//! Remote gateway contract shared by every bounded context.
//!
//! The transport itself lives outside this crate. Each context declares its
//! own gateway port (see [`crate::task::ports::TaskGateway`]); this module
//! holds what those ports have in common: the failure taxonomy, the REST
//! route description, and a channel-bridged implementation that lets an
//! external transport serve requests.

mod channel;
mod route;

pub use channel::{ChannelGateway, GatewayRequest, Responder, channel};
pub use route::{RequestMethod, Route};

use thiserror::Error;

/// Result type for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures reported by a remote gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never produced a response (connection refused, channel
    /// closed, responder dropped).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with a failure status.
    #[error("request rejected with status {status}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Human-readable message from the failure payload, if any.
        message: Option<String>,
    },

    /// The response payload could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Builds a rejection carrying a payload message.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: Some(message.into()),
        }
    }

    /// Builds a rejection without a payload message.
    #[must_use]
    pub const fn rejected_without_message(status: u16) -> Self {
        Self::Rejected {
            status,
            message: None,
        }
    }

    /// Returns the message a user should see, when the payload carried one.
    ///
    /// Transport and decode failures never carry a user-facing message; the
    /// caller falls back to its own default.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Allocates the identifier following `last` for in-memory backends.
///
/// # Errors
///
/// Returns a `507` rejection once the identifier space is exhausted.
pub(crate) fn next_identifier(last: u64) -> GatewayResult<u64> {
    last.checked_add(1)
        .ok_or_else(|| GatewayError::rejected(507, "identifier space exhausted"))
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
