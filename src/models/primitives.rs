//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides strongly-typed wrappers around identifiers to
//! prevent mixing up different kinds of IDs at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed brokerage account number.
///
/// # Example
///
/// ```
/// use tradier_rs::AccountId;
///
/// let account = AccountId::new("VA000001");
/// println!("Account: {}", account);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account ID from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the account ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A strongly-typed order ID.
///
/// Tradier order IDs are numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create a new order ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric value of the order ID.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A trading symbol (e.g., "AAPL", "SPY190524C00286000").
///
/// # Example
///
/// ```
/// use tradier_rs::Symbol;
///
/// let symbol = Symbol::new("AAPL");
/// assert_eq!(symbol.as_str(), "AAPL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A watchlist identifier (slug assigned by the API, e.g. "my-watchlist").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchlistId(String);

impl WatchlistId {
    /// Create a new watchlist ID.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the watchlist ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WatchlistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WatchlistId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for WatchlistId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WatchlistId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Environment configuration for the Tradier API.
///
/// Determines which API endpoints to use - production or sandbox.
///
/// # Example
///
/// ```
/// use tradier_rs::Environment;
///
/// let env = Environment::Sandbox;
/// println!("API URL: {}", env.api_base_url());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production environment - real trading with real money.
    #[default]
    Production,
    /// Sandbox environment for development and testing.
    /// Market quotes are 15 minutes delayed and streaming is unavailable.
    Sandbox,
}

impl Environment {
    /// Get the base URL for REST API requests.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.tradier.com/v1",
            Environment::Sandbox => "https://sandbox.tradier.com/v1",
        }
    }

    /// Get the WebSocket base URL for market and account event streaming.
    ///
    /// Streaming is only served from production; the sandbox has no
    /// event hosts.
    pub fn stream_ws_url(&self) -> &'static str {
        "wss://ws.tradier.com/v1"
    }

    /// Returns `true` if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Returns `true` if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}
