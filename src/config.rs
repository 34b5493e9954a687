//! Client configuration.
//!
//! Values are read once at start-up, from the process environment or from any
//! key lookup handed to [`ClientConfig::from_lookup`].
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TASKMARKET_LOCALE` | `en` | language of default failure messages (`en`, `ru`) |
//! | `TASKMARKET_LOG` | `info` | `tracing` filter directive |
//! | `TASKMARKET_OPERATION_HISTORY` | `64` | settled operations remembered per store |

use crate::tracker::DEFAULT_HISTORY_LIMIT;
use thiserror::Error;

/// Environment variable selecting the message locale.
pub const LOCALE_VAR: &str = "TASKMARKET_LOCALE";
/// Environment variable holding the log filter directive.
pub const LOG_FILTER_VAR: &str = "TASKMARKET_LOG";
/// Environment variable bounding the per-store operation history.
pub const OPERATION_HISTORY_VAR: &str = "TASKMARKET_OPERATION_HISTORY";

const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The locale is not one of the supported languages.
    #[error("unsupported locale '{0}', expected 'en' or 'ru'")]
    UnsupportedLocale(String),

    /// A variable holds a value that cannot be parsed.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Description of the problem.
        message: String,
    },
}

/// Language of the default failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English.
    #[default]
    English,
    /// Russian, matching the phrases of the original web client.
    Russian,
}

impl TryFrom<&str> for Locale {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "ru" | "russian" => Ok(Self::Russian),
            _ => Err(ConfigError::UnsupportedLocale(value.to_owned())),
        }
    }
}

/// Default messages used when a failure payload carries no message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureMessages {
    /// Listing tasks failed.
    pub load_tasks: String,
    /// Fetching one task failed.
    pub load_task: String,
    /// Creating a task failed.
    pub create_task: String,
    /// Updating a task failed.
    pub update_task: String,
    /// Publishing a task failed.
    pub publish_task: String,
    /// Claiming a task failed.
    pub assign_task: String,
    /// Completing a task failed.
    pub complete_task: String,
    /// Deleting a task failed.
    pub delete_task: String,
    /// Listing transactions failed.
    pub load_transactions: String,
    /// Posting a deposit or payout failed.
    pub create_transaction: String,
    /// Listing reviews failed.
    pub load_reviews: String,
    /// Posting a review failed.
    pub create_review: String,
}

impl FailureMessages {
    /// Returns the message set for `locale`.
    #[must_use]
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::English => Self {
                load_tasks: "error loading tasks".to_owned(),
                load_task: "error loading task".to_owned(),
                create_task: "error creating task".to_owned(),
                update_task: "error updating task".to_owned(),
                publish_task: "error publishing task".to_owned(),
                assign_task: "error assigning task".to_owned(),
                complete_task: "error completing task".to_owned(),
                delete_task: "error deleting task".to_owned(),
                load_transactions: "error loading transactions".to_owned(),
                create_transaction: "error creating transaction".to_owned(),
                load_reviews: "error loading reviews".to_owned(),
                create_review: "error creating review".to_owned(),
            },
            Locale::Russian => Self {
                load_tasks: "Ошибка при загрузке заданий".to_owned(),
                load_task: "Ошибка при загрузке задания".to_owned(),
                create_task: "Ошибка при создании задания".to_owned(),
                update_task: "Ошибка при обновлении задания".to_owned(),
                publish_task: "Ошибка при публикации задания".to_owned(),
                assign_task: "Ошибка при назначении задания".to_owned(),
                complete_task: "Ошибка при завершении задания".to_owned(),
                delete_task: "Ошибка при удалении задания".to_owned(),
                load_transactions: "Ошибка загрузки".to_owned(),
                create_transaction: "Ошибка при создании транзакции".to_owned(),
                load_reviews: "Ошибка при загрузке отзывов".to_owned(),
                create_review: "Ошибка при создании отзыва".to_owned(),
            },
        }
    }
}

impl Default for FailureMessages {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

/// Configuration shared by the stores and the telemetry bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    locale: Locale,
    log_filter: String,
    operation_history: usize,
    messages: FailureMessages,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            operation_history: DEFAULT_HISTORY_LIMIT,
            messages: FailureMessages::default(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, treating blank values as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let locale = read(LOCALE_VAR)
            .map(|value| Locale::try_from(value.as_str()))
            .transpose()?
            .unwrap_or_default();
        let log_filter = read(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());
        let operation_history = read(OPERATION_HISTORY_VAR)
            .map(|value| {
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|err| ConfigError::InvalidValue {
                        key: OPERATION_HISTORY_VAR,
                        message: err.to_string(),
                    })
            })
            .transpose()?
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        Ok(Self::default()
            .with_locale(locale)
            .with_log_filter(log_filter)
            .with_operation_history(operation_history))
    }

    /// Sets the locale and resets the failure messages to that locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self.messages = FailureMessages::for_locale(locale);
        self
    }

    /// Sets the `tracing` filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Sets how many settled operations each store remembers.
    #[must_use]
    pub const fn with_operation_history(mut self, limit: usize) -> Self {
        self.operation_history = limit;
        self
    }

    /// Replaces the failure messages wholesale.
    #[must_use]
    pub fn with_messages(mut self, messages: FailureMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Returns the configured locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the `tracing` filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the per-store operation history limit.
    #[must_use]
    pub const fn operation_history(&self) -> usize {
        self.operation_history
    }

    /// Returns the default failure messages.
    #[must_use]
    pub const fn messages(&self) -> &FailureMessages {
        &self.messages
    }
}
