//! Internal error helpers for mapping HTTP/reqwest errors to [`ChatError`].

use std::time::Duration;

use tripmate_types::ChatError;

/// Fallback message when a failed chat request carries no usable `error`.
pub(crate) const CHAT_FALLBACK: &str = "Failed to start chat";

/// Fallback message when a failed itinerary request carries no usable `error`.
pub(crate) const ITINERARY_FALLBACK: &str = "Failed to generate itinerary";

/// Timeout reported when reqwest times out and no timeout was configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Map a non-success response to [`ChatError::Api`].
///
/// The backend answers failures with `{"error": "<message>"}`. Some gateways
/// nest it as `{"error": {"message": "..."}}`; both are accepted. Anything
/// else falls back to `fallback`.
pub(crate) fn map_error_body(status: reqwest::StatusCode, body: &str, fallback: &str) -> ChatError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            let error = &json["error"];
            error
                .as_str()
                .or_else(|| error["message"].as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| fallback.to_owned());
    ChatError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Map a [`reqwest::Error`] raised while sending a request.
pub(crate) fn map_reqwest_error(err: reqwest::Error, timeout: Option<Duration>) -> ChatError {
    if err.is_timeout() {
        ChatError::Timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
    } else {
        ChatError::Network(Box::new(err))
    }
}

/// Map a [`reqwest::Error`] raised while reading a streamed body.
pub(crate) fn map_stream_error(err: reqwest::Error, timeout: Option<Duration>) -> ChatError {
    if err.is_timeout() {
        ChatError::Timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
    } else {
        ChatError::Stream(err.to_string())
    }
}
