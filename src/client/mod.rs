//! HTTP client and service layer for the Tradier API.
//!
//! This module provides the main entry point [`TradierClient`] for
//! interacting with the Tradier API.
//!
//! # Example
//!
//! ```no_run
//! use tradier_rs::{TradierClient, Environment};
//!
//! # async fn example() -> tradier_rs::Result<()> {
//! let client = TradierClient::from_token("sandbox-token", Environment::Sandbox)?;
//!
//! // Check the market clock
//! let clock = client.markets().clock().await?;
//! println!("Market is {}", clock.state);
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::ClientConfig;
pub use http::TradierClient;
pub(crate) use http::ClientInner;
