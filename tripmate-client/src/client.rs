//! Client struct, builder and the itinerary call.

use std::time::Duration;

use tripmate_types::{ChatError, ItineraryRequest};

use crate::error::{ITINERARY_FALLBACK, map_error_body, map_reqwest_error};

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_VAR: &str = "TRIPMATE_BACKEND_URL";

/// Environment variable holding an optional whole-request timeout in seconds.
pub const TIMEOUT_VAR: &str = "TRIPMATE_TIMEOUT_SECS";

/// Path of the streaming chat function.
const CHAT_PATH: &str = "/functions/v1/chat";

/// Path of the itinerary function.
const ITINERARY_PATH: &str = "/functions/v1/generate-itinerary";

/// Client for the tripmate backend functions.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use tripmate_client::TripClient;
///
/// let client = TripClient::new("https://project.example.co")
///     .timeout(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct TripClient {
    /// Backend base URL, without a trailing slash.
    pub(crate) base_url: String,
    /// Whole-request timeout. `None` leaves reqwest's default (no timeout).
    pub(crate) timeout: Option<Duration>,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl TripClient {
    /// Create a client for the backend at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from `TRIPMATE_BACKEND_URL` and `TRIPMATE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a client from an arbitrary variable source.
    ///
    /// `lookup` is called with [`BACKEND_URL_VAR`] and [`TIMEOUT_VAR`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ChatError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BACKEND_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ChatError::Config(format!("{BACKEND_URL_VAR} is not set")))?;
        let mut client = Self::new(base_url.trim());

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ChatError::Config(format!("{TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"))
            })?;
            client = client.timeout(Duration::from_secs(secs));
        }
        Ok(client)
    }

    /// Override the backend base URL.
    ///
    /// Useful for testing with a local mock server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize(url.into());
        self
    }

    /// Limit the total time of each request, including reading a streamed body.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, pooling).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// URL of the chat function.
    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("{}{CHAT_PATH}", self.base_url)
    }

    /// URL of the itinerary function.
    #[must_use]
    pub fn itinerary_url(&self) -> String {
        format!("{}{ITINERARY_PATH}", self.base_url)
    }

    /// Start a JSON POST to `url` with the configured timeout.
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
    }

    /// Ask the itinerary function for a trip plan.
    ///
    /// The plan is returned as the raw JSON document the function produced.
    pub async fn generate_itinerary(
        &self,
        request: &ItineraryRequest,
    ) -> Result<serde_json::Value, ChatError> {
        let url = self.itinerary_url();
        tracing::debug!(url = %url, destination = %request.destination, "sending itinerary request");

        let response = self
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout))?;

        if !status.is_success() {
            return Err(map_error_body(status, &body, ITINERARY_FALLBACK));
        }

        serde_json::from_str(&body)
            .map_err(|e| ChatError::InvalidResponse(format!("invalid JSON response: {e}")))
    }
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}
