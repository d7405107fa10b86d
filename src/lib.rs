//! # tradier-rs
//!
//! A production-grade Rust client for the Tradier brokerage API.
//!
//! This crate provides typed access to Tradier's trading platform,
//! including account data, order placement, market data, fundamentals,
//! watchlists, and real-time streaming via WebSocket.
//!
//! ## Features
//!
//! - **Authentication**: Bearer access tokens and the OAuth code flow,
//!   with automatic refresh for expiring production tokens
//! - **Account Data**: Profile, balances, positions, history, gain/loss
//! - **Order Management**: Place, preview, modify, and cancel orders
//!   across every order class, including multi-leg and OCO tickets
//! - **Market Data**: Quotes, option chains, history, time and sales,
//!   market clock and calendar
//! - **Fundamentals**: Company data, dividends, and corporate calendars
//!   from the beta endpoints
//! - **Real-time Streaming**: Market and account event WebSockets
//! - **Type Safety**: Strongly-typed models that tolerate the API's
//!   single-or-array and epoch-encoding quirks
//! - **Async-first**: Built on Tokio
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tradier_rs::{TradierClient, Environment, AccountId};
//!
//! #[tokio::main]
//! async fn main() -> tradier_rs::Result<()> {
//!     // Sandbox tokens come from the developer dashboard
//!     let client = TradierClient::from_token(
//!         std::env::var("TRADIER_TOKEN").unwrap_or_default(),
//!         Environment::Sandbox,
//!     )?;
//!
//!     // Who am I?
//!     let profile = client.accounts().profile().await?;
//!     println!("Hello, {}", profile.name);
//!
//!     // Account balances
//!     if let Some(account) = profile.account.first() {
//!         let account_id = AccountId::new(&account.account_number);
//!         let balances = client.accounts().balances(&account_id).await?;
//!         println!("Total equity: {:?}", balances.total_equity);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Order Placement
//!
//! ```rust,no_run
//! use tradier_rs::{TradierClient, Environment, AccountId};
//! use tradier_rs::models::{OrderRequestBuilder, OrderSide, OrderType, OrderDuration};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> tradier_rs::Result<()> {
//!     let client = TradierClient::from_token("token", Environment::Sandbox)?;
//!     let account = AccountId::new("VA000001");
//!
//!     let order = OrderRequestBuilder::equity("AAPL")
//!         .side(OrderSide::Buy)
//!         .quantity(dec!(10))
//!         .order_type(OrderType::Limit)
//!         .duration(OrderDuration::Day)
//!         .price(dec!(150.00))
//!         .build()?;
//!
//!     // Preview first to check the cost and commission
//!     let preview = client.orders().preview(&account, &order).await?;
//!     println!("Cost: {:?}", preview.cost);
//!
//!     // Place the order
//!     let ack = client.orders().place(&account, &order).await?;
//!     println!("Order placed: {}", ack.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming Example
//!
//! ```rust,no_run
//! use tradier_rs::{TradierClient, Environment};
//! use tradier_rs::streaming::StreamEvent;
//!
//! #[tokio::main]
//! async fn main() -> tradier_rs::Result<()> {
//!     // Streaming requires a production token
//!     let client = TradierClient::from_token("token", Environment::Production)?;
//!
//!     let mut streamer = client.streaming().market().await?;
//!     streamer.subscribe(&["AAPL", "SPY", "QQQ"], &[]).await?;
//!
//!     while let Some(event) = streamer.next().await {
//!         match event? {
//!             StreamEvent::Quote(quote) => {
//!                 println!("{}: bid={} ask={}", quote.symbol, quote.bid, quote.ask);
//!             }
//!             _ => {}
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
#[cfg(feature = "streaming")]
pub mod streaming;

// Re-export primary types at crate root for convenience
pub use auth::Session;
pub use client::{ClientConfig, TradierClient};
pub use error::{Error, Result};
pub use models::{AccountId, Environment, OrderId, Symbol, WatchlistId};

/// Prelude module for convenient imports.
///
/// ```rust
/// use tradier_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::Session;
    pub use crate::client::{ClientConfig, TradierClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        AccountId, Environment, OrderId, Symbol, WatchlistId,
        // Enums
        AccountType, HistoryEventKind, MarketState, OptionType, OrderClass, OrderDuration,
        OrderSide, OrderStatus, OrderType,
        // Account models
        Account, Balances, ClosedPosition, HistoryEvent, Position, UserProfile,
        // Market models
        Clock, HistoricBar, MarketCalendar, Quote, QuoteBatch, Security, TimesalesPoint,
        // Option models
        Expiration, OccSymbol, OptionContract,
        // Order models
        Order, OrderAck, OrderModify, OrderPreview, OrderRequest, OrderRequestBuilder,
        // Watchlists
        Watchlist,
    };
    #[cfg(feature = "streaming")]
    pub use crate::streaming::{
        AccountEvent, AccountEventStreamer, MarketStreamer, StreamEvent, StreamingServices,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Production.api_base_url(),
            "https://api.tradier.com/v1"
        );
        assert_eq!(
            Environment::Sandbox.api_base_url(),
            "https://sandbox.tradier.com/v1"
        );
    }

    #[test]
    fn test_account_id_creation() {
        let account = AccountId::new("VA000001");
        assert_eq!(account.as_str(), "VA000001");
    }

    #[test]
    fn test_client_from_token() {
        let client = TradierClient::from_token("token", Environment::Sandbox).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("TradierClient"));
        assert!(!debug.contains("token\""));
    }
}
