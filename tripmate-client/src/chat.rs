//! The streaming chat call.
//!
//! The chat function answers with a `text/event-stream` body:
//!
//! ```text
//! data: {"choices":[{"delta":{"content":"Hel"}}]}
//! data: {"choices":[{"delta":{"content":"lo"}}]}
//! data: [DONE]
//! ```
//!
//! Parsing lives in `tripmate-stream`; this module owns the HTTP exchange and
//! the mapping of its failures onto the sink's error callback.

use std::pin::Pin;

use futures::{Stream, StreamExt};
use tripmate_stream::{Termination, delta_stream, read_deltas};
use tripmate_types::{ChatError, ChatMessage, ChatRequest, ChatSink, StreamOutcome};

use crate::client::TripClient;
use crate::error::{CHAT_FALLBACK, map_error_body, map_reqwest_error, map_stream_error};

/// A pinned stream of assistant text fragments.
///
/// Ends after `[DONE]` or at transport end, or right after yielding an error.
/// Dropping it closes the connection.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send>>;

impl TripClient {
    /// Send `messages` to the chat function and stream the reply into `sink`.
    ///
    /// `sink.on_delta` runs for every text fragment as soon as it is decoded.
    /// Afterwards exactly one of `on_done` / `on_error` runs. A non-success
    /// response reports the backend's `error` string verbatim.
    pub async fn stream_chat<S: ChatSink>(&self, messages: &[ChatMessage], mut sink: S) {
        let result = self.read_chat(messages, |text| sink.on_delta(text)).await;
        match &result {
            Ok(end) => tracing::debug!(termination = ?end, "chat stream complete"),
            Err(err) => tracing::warn!(error = %err, "chat stream failed"),
        }
        StreamOutcome::from(result).deliver(sink);
    }

    /// Send `messages` to the chat function and return the reply as a stream.
    ///
    /// Setup failures (network, non-success status) are returned directly;
    /// read failures arrive as the stream's last item.
    pub async fn chat_stream(&self, messages: &[ChatMessage]) -> Result<DeltaStream, ChatError> {
        let response = self.send_chat(messages).await?;
        let timeout = self.timeout;
        let deltas = delta_stream(response.bytes_stream())
            .map(move |item| item.map_err(|e| map_stream_error(e, timeout)));
        Ok(Box::pin(deltas))
    }

    async fn read_chat<F>(&self, messages: &[ChatMessage], on_delta: F) -> Result<Termination, ChatError>
    where
        F: FnMut(&str),
    {
        let response = self.send_chat(messages).await?;
        read_deltas(response.bytes_stream(), on_delta)
            .await
            .map_err(|e| map_stream_error(e, self.timeout))
    }

    /// POST the conversation and return the response once its status is a success.
    async fn send_chat(&self, messages: &[ChatMessage]) -> Result<reqwest::Response, ChatError> {
        let url = self.chat_url();
        tracing::debug!(url = %url, messages = messages.len(), "sending chat request");

        let response = self
            .post(&url)
            .json(&ChatRequest { messages })
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body still reports the fallback message.
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_body(status, &body, CHAT_FALLBACK));
        }
        Ok(response)
    }
}
