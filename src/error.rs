//! Error types for the Tradier API client.
//!
//! This module provides a comprehensive error type that covers all possible
//! failure modes when interacting with the Tradier API.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Tradier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Tradier API operations.
///
/// This enum covers all possible error conditions that can occur when
/// using this crate, from network errors to authentication failures
/// to order rejections.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: status={status}, code={code:?}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Optional error code from the fault envelope
        code: Option<String>,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// Authentication failed (invalid credentials, token exchange failure)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Access token has expired and needs refresh
    #[error("Session expired; refresh required")]
    SessionExpired,

    /// Rate limited by the API
    #[error("Rate limited; retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Number of seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// WebSocket connection error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Stream was disconnected unexpectedly
    #[error("Stream disconnected")]
    StreamDisconnected,

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` if this error is potentially transient and the
    /// operation could be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::RateLimited { .. } | Error::WebSocket(_)
        )
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_) | Error::SessionExpired)
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::InvalidInput(_) | Error::InvalidSymbol(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a non-2xx response body.
    ///
    /// Tries the vendor fault envelope first
    /// (`{"fault": {"faultstring": ..., "detail": {"errorcode": ...}}}`),
    /// then the order-rejection envelope (`{"errors": {"error": ...}}`),
    /// then falls back to the raw body text, and finally to the HTTP
    /// status itself when the body is empty.
    pub(crate) fn from_api_response(status: u16, raw: &str) -> Self {
        let body: Value = serde_json::from_str(raw).unwrap_or(Value::Null);

        if let Some(fault) = body.get("fault") {
            let message = fault
                .get("faultstring")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown API fault")
                .to_string();
            let code = fault
                .get("detail")
                .and_then(|d| d.get("errorcode"))
                .and_then(|c| c.as_str())
                .map(String::from);
            return Error::Api {
                status,
                code,
                message,
                body,
            };
        }

        if let Some(errors) = body.get("errors").and_then(|e| e.get("error")) {
            let message = match errors {
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
                other => other.to_string(),
            };
            return Error::Api {
                status,
                code: None,
                message,
                body,
            };
        }

        let message = if raw.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            raw.trim().to_string()
        };

        Error::Api {
            status,
            code: None,
            message,
            body,
        }
    }

    /// Extract the fault string from an error body, if one is present.
    pub(crate) fn fault_message(raw: &str) -> Option<String> {
        let body: Value = serde_json::from_str(raw).ok()?;
        body.get("fault")?
            .get("faultstring")?
            .as_str()
            .map(String::from)
    }
}

#[cfg(feature = "streaming")]
impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(err.to_string())
    }
}
