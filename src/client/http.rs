//! HTTP client implementation for the Tradier API.

use chrono::{Duration, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::api::{
    AccountsService, FundamentalsService, MarketsService, OptionsService, OrdersService,
    WatchlistsService,
};
use crate::auth::Session;
use crate::{Environment, Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the Tradier API.
///
/// This client provides access to all API services through method calls
/// that return service structs. The client manages authentication,
/// request building, and response parsing.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::{TradierClient, Environment, AccountId};
///
/// # async fn example() -> tradier_rs::Result<()> {
/// let client = TradierClient::from_token("sandbox-token", Environment::Sandbox)?;
///
/// // Use the markets service
/// let quotes = client.markets().quotes(&["AAPL", "SPY"], false).await?;
///
/// // Use the accounts service
/// let account = AccountId::new("VA000001");
/// let balances = client.accounts().balances(&account).await?;
/// # Ok(())
/// # }
/// ```
pub struct TradierClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) session: Session,
    pub(crate) config: ClientConfig,
}

impl TradierClient {
    /// Create a new client with a static access token.
    ///
    /// This is the normal way to create a client for sandbox use and for
    /// production tokens managed outside the client.
    pub fn from_token(token: impl Into<String>, env: Environment) -> Result<Self> {
        Self::with_session(Session::from_token(token, env), ClientConfig::default())
    }

    /// Create a new client with a static access token and custom
    /// configuration.
    pub fn from_token_with_config(
        token: impl Into<String>,
        env: Environment,
        config: ClientConfig,
    ) -> Result<Self> {
        Self::with_session(Session::from_token(token, env), config)
    }

    /// Create a new client by exchanging an OAuth authorization code.
    pub async fn from_oauth_code(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        code: &str,
        env: Environment,
    ) -> Result<Self> {
        let session = Session::from_oauth_code(client_id, client_secret, code, env).await?;
        Self::with_session(session, ClientConfig::default())
    }

    /// Create a new client with an existing session and custom configuration.
    pub fn with_session(session: Session, config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                session,
                config,
            }),
        })
    }

    /// Get the accounts service.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.inner.clone())
    }

    /// Get the orders service.
    pub fn orders(&self) -> OrdersService {
        OrdersService::new(self.inner.clone())
    }

    /// Get the market data service.
    pub fn markets(&self) -> MarketsService {
        MarketsService::new(self.inner.clone())
    }

    /// Get the options data service.
    pub fn options(&self) -> OptionsService {
        OptionsService::new(self.inner.clone())
    }

    /// Get the fundamentals (beta) service.
    pub fn fundamentals(&self) -> FundamentalsService {
        FundamentalsService::new(self.inner.clone())
    }

    /// Get the watchlists service.
    pub fn watchlists(&self) -> WatchlistsService {
        WatchlistsService::new(self.inner.clone())
    }

    /// Get the streaming services.
    #[cfg(feature = "streaming")]
    pub fn streaming(&self) -> crate::streaming::StreamingServices {
        crate::streaming::StreamingServices::new(self.inner.clone())
    }

    /// Manually refresh the session token.
    pub async fn refresh_session(&self) -> Result<()> {
        self.inner.session.refresh().await
    }

    /// Get the current environment.
    pub async fn environment(&self) -> Environment {
        self.inner.session.environment().await
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }
}

impl ClientInner {
    /// Get the base URL for API requests.
    pub(crate) async fn base_url(&self) -> String {
        match &self.config.base_url {
            Some(base_url) => base_url.clone(),
            None => self.session.environment().await.api_base_url().to_string(),
        }
    }

    /// Ensure the session is valid before making a request.
    pub(crate) async fn ensure_session_valid(&self) -> Result<()> {
        if self.config.auto_refresh_session {
            let buffer = Duration::seconds(self.config.refresh_buffer_secs);
            if self.session.expires_within(buffer).await {
                self.session.refresh().await?;
            }
        }
        Ok(())
    }

    /// Build request headers with authentication.
    pub(crate) async fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let token = self.session.access_token().await;
        let bearer = format!("Bearer {}", token.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?,
        );

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.ensure_session_valid().await?;

        let url = format!("{}{}", self.base_url().await, path);
        let headers = self.build_headers().await?;

        let response = self.http.get(&url).headers(headers).send().await?;

        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        self.ensure_session_valid().await?;

        let url = format!("{}{}", self.base_url().await, path);
        let headers = self.build_headers().await?;

        let response = self
            .http
            .get(&url)
            .headers(headers)
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make a form-encoded POST request.
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<T> {
        self.ensure_session_valid().await?;

        let url = format!("{}{}", self.base_url().await, path);
        let headers = self.build_headers().await?;

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .form(form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make a form-encoded PUT request.
    pub(crate) async fn put_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<T> {
        self.ensure_session_valid().await?;

        let url = format!("{}{}", self.base_url().await, path);
        let headers = self.build_headers().await?;

        let response = self
            .http
            .put(&url)
            .headers(headers)
            .form(form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.ensure_session_valid().await?;

        let url = format!("{}{}", self.base_url().await, path);
        let headers = self.build_headers().await?;

        let response = self.http.delete(&url).headers(headers).send().await?;

        self.handle_response(response).await
    }

    /// Handle an API response.
    ///
    /// One request, one inspection: 429 raises a rate-limit error with the
    /// extracted retry-after (never retried here), any other non-2xx raises
    /// a structured error via the fault envelope, and a success body has
    /// every literal `"null"` token rewritten to bare `null` before
    /// deserialization, since the API spells empty wrappers that way.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after_secs = Self::retry_after_secs(response.headers());
            return Err(Error::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let status_code = status.as_u16();
            let body = response.text().await.unwrap_or_default();

            if status_code == 401 {
                return Err(Error::SessionExpired);
            }
            if status_code == 404 {
                let message = Error::fault_message(&body)
                    .unwrap_or_else(|| "Resource not found".to_string());
                return Err(Error::NotFound(message));
            }

            return Err(Error::from_api_response(status_code, &body));
        }

        let text = response.text().await?;
        let text = text.replace("\"null\"", "null");
        serde_json::from_str(&text).map_err(Error::from)
    }

    /// Extract the retry-after interval from a 429 response.
    ///
    /// Prefers the standard `Retry-After` header; falls back to computing
    /// the wait from the `X-Ratelimit-Expiry` epoch-milliseconds header,
    /// and defaults to 60 seconds when neither is usable.
    fn retry_after_secs(headers: &HeaderMap) -> u64 {
        if let Some(secs) = headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            return secs;
        }

        if let Some(expiry_ms) = headers
            .get("x-ratelimit-expiry")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
        {
            let remaining_ms = expiry_ms - Utc::now().timestamp_millis();
            if remaining_ms > 0 {
                // Round up so callers never retry inside the window.
                return ((remaining_ms + 999) / 1000) as u64;
            }
        }

        60
    }
}

impl Clone for TradierClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TradierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradierClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
