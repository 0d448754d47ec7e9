use async_trait::async_trait;
use pagerangers_core::RequestDescriptor;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::TransportError;

/// User agent sent with every request.
pub const USER_AGENT: &str = "PageRangers-Skill/1.0";
/// Maximum error body length kept in [`TransportError::HttpStatus`].
pub const MAX_ERROR_BODY_LEN: usize = 500;

/// Sends a resolved request and returns the parsed JSON payload.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError>;
}

/// Client for PageRangers API calls.
pub struct ApiClient {
    client: reqwest::Client,
    timeout_secs: u64,
    secret: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("client", &self.client)
            .field("timeout_secs", &self.timeout_secs)
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ApiClient {
    /// Creates a client with the given request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::ClientInit(e.to_string()))?;
        Ok(Self { client, timeout_secs, secret: None })
    }

    /// Masks `secret` in debug logs of request URLs.
    #[must_use]
    pub fn with_redacted_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    #[must_use]
    pub const fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Performs one request. No retries.
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent, times out, the API
    /// returns a non-success status, the body is not JSON, or the body is an
    /// object carrying an `errormessage`.
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(format!("{}: {e}", request.method)))?;

        tracing::debug!("{} {}", method, request.redacted_url(self.secret.as_deref()));

        let mut builder = self.client.request(method, &request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            tracing::debug!(status = status.as_u16(), "request failed");
            return Err(TransportError::from_status(
                status.as_u16(),
                truncate(&body, MAX_ERROR_BODY_LEN).to_owned(),
            ));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let payload: Value = serde_json::from_str(&body).map_err(TransportError::InvalidJson)?;

        if let Some(message) = payload.get("errormessage") {
            let message = message.as_str().map_or_else(|| message.to_string(), str::to_owned);
            return Err(TransportError::api(message));
        }

        Ok(payload)
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout_secs)
        } else {
            TransportError::Connection(error.without_url())
        }
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, TransportError> {
        self.execute(request).await
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
