//! Typed transport errors and their user-facing categories.

use std::fmt;

use thiserror::Error;

/// Broad failure class, used to pick the guidance shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Auth,
    Forbidden,
    RateLimited,
    Timeout,
    ServerError,
    NetworkError,
    ApiError,
    InvalidResponse,
    OtherStatus,
}

/// Guidance per category. The CLI prints these verbatim.
pub const GUIDANCE: &[(ErrorCategory, &str)] = &[
    (ErrorCategory::Auth, "Authentication failed. Check PAGERANGERS_API_TOKEN."),
    (ErrorCategory::Forbidden, "Access denied. Check PAGERANGERS_PROJECT_HASH."),
    (ErrorCategory::RateLimited, "Rate limit exceeded. Try again later."),
    (
        ErrorCategory::Timeout,
        "The request timed out. The network or the API may be slow; raise PAGERANGERS_TIMEOUT or try again later.",
    ),
];

impl ErrorCategory {
    /// Guidance text for this category, if the table has one.
    #[must_use]
    pub fn guidance(self) -> Option<&'static str> {
        GUIDANCE.iter().find(|(category, _)| *category == self).map(|(_, text)| *text)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Forbidden => "forbidden",
            Self::RateLimited => "rate-limited",
            Self::Timeout => "timeout",
            Self::ServerError => "server-error",
            Self::NetworkError => "network-error",
            Self::ApiError => "api-error",
            Self::InvalidResponse => "invalid-response",
            Self::OtherStatus => "other-status",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const API_KEY_HINT: &str = ". Your API key may not have access to this endpoint.";

/// Errors from a single API call. Never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Authentication failed (HTTP 401)")]
    Unauthorized,
    #[error("Access denied (HTTP 403)")]
    Forbidden,
    #[error("Rate limit exceeded (HTTP 429)")]
    RateLimited,
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),
    #[error("Invalid JSON response from API: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("API Error: {message}{hint}")]
    Api { message: String, hint: &'static str },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl TransportError {
    /// Maps a non-success status code to its error.
    #[must_use]
    pub fn from_status(code: u16, body: String) -> Self {
        match code {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            _ => Self::HttpStatus { code, body },
        }
    }

    /// Error for an `errormessage` returned inside a successful response.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        let message = message.into();
        let hint = if message.to_lowercase().contains("api-key") { API_KEY_HINT } else { "" };
        Self::Api { message, hint }
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthorized => ErrorCategory::Auth,
            Self::Forbidden => ErrorCategory::Forbidden,
            Self::RateLimited => ErrorCategory::RateLimited,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::HttpStatus { code, .. } if *code >= 500 => ErrorCategory::ServerError,
            Self::HttpStatus { .. } => ErrorCategory::OtherStatus,
            Self::Connection(_) | Self::ClientInit(_) | Self::InvalidRequest(_) => ErrorCategory::NetworkError,
            Self::InvalidJson(_) => ErrorCategory::InvalidResponse,
            Self::Api { .. } => ErrorCategory::ApiError,
        }
    }

    /// Numeric HTTP status, when the failure came with one.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::RateLimited => Some(429),
            Self::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}
