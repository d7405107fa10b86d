//! Session management for Tradier API authentication.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Environment, Error, Result};

/// Authentication session for the Tradier API.
///
/// Sandbox tokens are static and never expire. Production OAuth access
/// tokens expire after 24 hours; a session created from an authorization
/// code keeps the refresh token and can renew itself.
///
/// # Thread Safety
///
/// `Session` is designed to be shared across multiple tasks. It uses
/// internal locking to safely manage token refresh.
#[derive(Clone)]
pub struct Session {
    inner: Arc<RwLock<SessionInner>>,
}

struct SessionInner {
    env: Environment,
    access_token: SecretString,
    expires_at: Option<DateTime<Utc>>,
    refresh_token: Option<SecretString>,
    client_id: Option<SecretString>,
    client_secret: Option<SecretString>,
    scope: Option<String>,
}

impl Session {
    /// Create a session from a static access token.
    ///
    /// This is the normal path for sandbox tokens and for production
    /// tokens managed outside the client. The session never expires and
    /// cannot be refreshed.
    ///
    /// # Example
    ///
    /// ```
    /// use tradier_rs::{Session, Environment};
    ///
    /// let session = Session::from_token(
    ///     std::env::var("TRADIER_TOKEN").unwrap_or_default(),
    ///     Environment::Sandbox,
    /// );
    /// ```
    pub fn from_token(token: impl Into<String>, env: Environment) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                env,
                access_token: SecretString::from(token.into()),
                expires_at: None,
                refresh_token: None,
                client_id: None,
                client_secret: None,
                scope: None,
            })),
        }
    }

    /// Create a session by exchanging an OAuth authorization code.
    ///
    /// The exchange posts to `/oauth/accesstoken` with HTTP Basic
    /// authentication using the application's client credentials.
    ///
    /// # Arguments
    ///
    /// * `client_id` - Your application's client ID
    /// * `client_secret` - Your application's client secret
    /// * `code` - The authorization code from the OAuth redirect
    /// * `env` - The API environment to use
    pub async fn from_oauth_code(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        code: &str,
        env: Environment,
    ) -> Result<Self> {
        let client_id = SecretString::from(client_id.into());
        let client_secret = SecretString::from(client_secret.into());

        let token = Self::exchange(
            &client_id,
            &client_secret,
            &[("grant_type", "authorization_code"), ("code", code)],
            env,
        )
        .await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(SessionInner {
                env,
                expires_at: Some(Utc::now() + Duration::seconds(token.expires_in)),
                access_token: SecretString::from(token.access_token),
                refresh_token: token.refresh_token.map(SecretString::from),
                client_id: Some(client_id),
                client_secret: Some(client_secret),
                scope: token.scope,
            })),
        })
    }

    /// Check if the access token has expired.
    ///
    /// Static-token sessions never expire.
    pub async fn is_expired(&self) -> bool {
        let inner = self.inner.read().await;
        match inner.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }

    /// Check if the token will expire within the given buffer period.
    pub async fn expires_within(&self, buffer: Duration) -> bool {
        let inner = self.inner.read().await;
        match inner.expires_at {
            Some(expires_at) => Utc::now() + buffer >= expires_at,
            None => false,
        }
    }

    /// Get the token expiration time, if the session expires at all.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.expires_at
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionExpired`] if the session was created from a
    /// static token and has no refresh credentials, or an
    /// [`Error::Authentication`] if the exchange fails.
    pub async fn refresh(&self) -> Result<()> {
        let mut inner = self.inner.write().await;

        let (client_id, client_secret, refresh_token) = match (
            &inner.client_id,
            &inner.client_secret,
            &inner.refresh_token,
        ) {
            (Some(id), Some(secret), Some(refresh)) => {
                (id.clone(), secret.clone(), refresh.clone())
            }
            _ => return Err(Error::SessionExpired),
        };

        let token = Self::exchange(
            &client_id,
            &client_secret,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.expose_secret()),
            ],
            inner.env,
        )
        .await?;

        inner.expires_at = Some(Utc::now() + Duration::seconds(token.expires_in));
        inner.access_token = SecretString::from(token.access_token);
        if let Some(new_refresh) = token.refresh_token {
            inner.refresh_token = Some(SecretString::from(new_refresh));
        }

        Ok(())
    }

    /// Ensure the session is valid, refreshing if necessary.
    ///
    /// Refreshes when the token expires within 60 seconds.
    pub async fn ensure_valid(&self) -> Result<()> {
        if self.expires_within(Duration::seconds(60)).await {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Get the current access token.
    pub(crate) async fn access_token(&self) -> SecretString {
        self.inner.read().await.access_token.clone()
    }

    /// Get the environment this session is connected to.
    pub async fn environment(&self) -> Environment {
        self.inner.read().await.env
    }

    /// Get the scopes granted to this session, when known.
    pub async fn scope(&self) -> Option<String> {
        self.inner.read().await.scope.clone()
    }

    async fn exchange(
        client_id: &SecretString,
        client_secret: &SecretString,
        form: &[(&str, &str)],
        env: Environment,
    ) -> Result<TokenResponse> {
        let client = reqwest::Client::new();
        let url = format!("{}/oauth/accesstoken", env.api_base_url());

        let response = client
            .post(&url)
            .basic_auth(
                client_id.expose_secret(),
                Some(client_secret.expose_secret()),
            )
            .form(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Authentication(format!(
                "Token exchange failed ({}): {}",
                status,
                Error::fault_message(&body).unwrap_or(body)
            )));
        }

        let token: TokenResponse = response.json().await?;
        if token.status.as_deref() == Some("denied") {
            return Err(Error::Authentication(
                "Token exchange denied by the API".to_string(),
            ));
        }
        Ok(token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("env", &"...")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &"...")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

fn default_expires_in() -> i64 {
    86400
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_never_expires() {
        let session = Session::from_token("sandbox-token", Environment::Sandbox);
        assert!(!session.is_expired().await);
        assert!(!session.expires_within(Duration::days(365)).await);
        assert_eq!(session.expires_at().await, None);
    }

    #[tokio::test]
    async fn test_static_token_refresh_fails() {
        let session = Session::from_token("sandbox-token", Environment::Sandbox);
        let result = session.refresh().await;
        assert!(matches!(result, Err(Error::SessionExpired)));
    }

    #[tokio::test]
    async fn test_session_debug_redacts_token() {
        let session = Session::from_token("super-secret-token", Environment::Sandbox);
        let debug_str = format!("{:?}", session);
        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[test]
    fn test_token_response_defaults() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token": "abc", "scope": "read write trade", "status": "approved"}"#,
        )
        .unwrap();
        assert_eq!(token.expires_in, 86400);
        assert!(token.refresh_token.is_none());
    }
}
