//! Defines the crate level error type and the conversions from the HTTP and JSON libraries.

/// The errors that may occur while driving the dashboard.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// A request to the persistence or insights service failed, either in
    /// transit or while parsing the response body.
    ///
    /// This error is not retried. It aborts the refresh cycle that issued the
    /// request and leaves whatever was rendered before on screen.
    #[error("transport error: {0}")]
    Transport(String),

    /// The persistence service refused to create a transaction.
    ///
    /// The string is the human-readable message from the server, or
    /// "unknown" if the server did not send one.
    #[error("the server rejected the transaction: {0}")]
    ValidationRejected(String),

    /// The configured API base URL could not be used.
    #[error("invalid API base URL \"{0}\"")]
    InvalidApiBase(String),

    /// A month key was not in the `YYYY-MM` format.
    #[error("\"{0}\" is not a month in the format YYYY-MM")]
    InvalidMonth(String),

    /// The rendered dashboard page could not be written to disk.
    ///
    /// Callers should pass in the output path and the original error as a string.
    #[error("could not write the dashboard page to \"{0}\": {1}")]
    WritePage(String, String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        tracing::error!("a request to the API failed: {}", value);
        Error::Transport(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        tracing::error!("could not parse the API response: {}", value);
        Error::Transport(format!("invalid response body: {value}"))
    }
}
