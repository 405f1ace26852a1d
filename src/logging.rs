//! Logging for requests sent to and responses received from the API.

use reqwest::{Method, StatusCode, Url};

/// Bodies longer than this many characters are truncated in `info` logs.
///
/// The full body is still logged at the `debug` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log an outgoing request at the `info` level.
pub(crate) fn log_request(method: &Method, url: &Url, body: &str) {
    match truncate(body) {
        Some(prefix) => {
            tracing::info!("Sending request: {method} {url}\nbody: {prefix}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Sending request: {method} {url}\nbody: {body:?}"),
    }
}

/// Log a response at the `info` level.
pub(crate) fn log_response(status: StatusCode, url: &Url, body: &str) {
    match truncate(body) {
        Some(prefix) => {
            tracing::info!("Received response: {status} from {url}\nbody: {prefix}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Received response: {status} from {url}\nbody: {body:?}"),
    }
}

/// Returns the first [LOG_BODY_LENGTH_LIMIT] characters of `body`, or `None`
/// if the body is short enough to log whole.
fn truncate(body: &str) -> Option<&str> {
    body.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(end, _)| &body[..end])
}
