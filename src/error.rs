use std::sync::Arc;

use crate::value::ValueKind;

/// Result type for client lifecycle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or shutting down a [`Client`](crate::Client).
///
/// Flag evaluation never returns this type. See [`EvaluationError`] instead.
#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Invalid base URL configuration.
    #[error("invalid base_url configuration")]
    InvalidBaseUrl(#[source] url::ParseError),

    /// The server rejected the SDK key.
    #[error("unauthorized, sdk_key is likely invalid")]
    Unauthorized,

    /// The first configuration was not fetched within the requested timeout.
    #[error("timed out waiting for the first configuration")]
    InitializationTimeout,

    /// Indicates that the poller thread panicked. This should normally never happen.
    #[error("poller thread panicked")]
    PollerThreadPanicked,

    /// An I/O error.
    #[error(transparent)]
    // std::io::Error is not clonable, so we're wrapping it in an Arc.
    Io(Arc<std::io::Error>),

    /// Network error.
    #[error(transparent)]
    Network(Arc<reqwest::Error>),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(Arc::new(value))
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Network(Arc::new(value.without_url()))
    }
}

/// Reason a flag could not be evaluated. The evaluation still yields the flag's default value.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaluationError {
    /// Configuration has not been fetched yet.
    #[error("client not ready, configuration has not been fetched")]
    ClientNotReady,

    /// The evaluation context has an empty key.
    #[error("invalid evaluation context")]
    InvalidContext,

    /// The requested flag is not present in the configuration.
    #[error("flag not found")]
    FlagNotFound,

    /// The configured value has a different type than requested.
    #[error("wrong flag type (expected: {expected}, found: {found})")]
    WrongType {
        /// Type requested by the caller.
        expected: ValueKind,
        /// Type of the configured value.
        found: ValueKind,
    },

    /// The flag entry in the configuration could not be parsed.
    #[error("error parsing flag configuration")]
    ConfigurationParseError,
}
