//! `tracing` subscriber installation for embedding applications.

use crate::config::ClientConfig;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive is malformed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the filter from the configured directive.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the directive does not parse.
pub fn log_filter(config: &ClientConfig) -> Result<EnvFilter, TelemetryError> {
    Ok(EnvFilter::try_new(config.log_filter())?)
}

/// Installs a formatting subscriber filtered by the configured directive.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is malformed or a global
/// subscriber has already been installed.
pub fn init_tracing(config: &ClientConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(log_filter(config)?)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
