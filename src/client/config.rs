//! Client configuration options.

use std::time::Duration;

use url::Url;

use crate::Result;

/// Configuration for the Tradier client.
///
/// # Example
///
/// ```
/// use tradier_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Base URL override (tests and proxies); `None` uses the environment's
    /// standard endpoint
    pub base_url: Option<String>,
    /// Whether to automatically refresh expiring sessions
    pub auto_refresh_session: bool,
    /// Buffer time (in seconds) before expiry to refresh
    pub refresh_buffer_secs: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("tradier-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            base_url: None,
            auto_refresh_session: true,
            refresh_buffer_secs: 60,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the API base URL.
    ///
    /// The URL is validated eagerly so a typo fails at configuration time
    /// rather than on the first request.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        Url::parse(base_url.as_ref())?;
        self.base_url = Some(base_url.as_ref().trim_end_matches('/').to_string());
        Ok(self)
    }

    /// Enable or disable automatic session refresh.
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh_session = enabled;
        self
    }

    /// Set the buffer time before expiry to refresh.
    pub fn with_refresh_buffer(mut self, secs: i64) -> Self {
        self.refresh_buffer_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.auto_refresh_session);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_base_url_override_trims_trailing_slash() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:8080/")
            .unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:8080"));
    }

    #[test]
    fn test_base_url_override_rejects_garbage() {
        assert!(ClientConfig::default().with_base_url("not a url").is_err());
    }
}
