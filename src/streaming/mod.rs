//! Real-time streaming for market data and account events.
//!
//! Tradier streams over WebSocket using short-lived stream sessions: a
//! REST call creates the session, and its ID authorizes the WebSocket
//! subscription. Sessions are only issued by the production environment.
//!
//! # Market events
//!
//! ```no_run
//! use tradier_rs::streaming::StreamEvent;
//!
//! # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
//! let mut streamer = client.streaming().market().await?;
//! streamer.subscribe(&["AAPL", "SPY"], &[]).await?;
//!
//! while let Some(event) = streamer.next().await {
//!     match event? {
//!         StreamEvent::Quote(quote) => {
//!             println!("{}: bid={} ask={}", quote.symbol, quote.bid, quote.ask);
//!         }
//!         other => println!("{:?}", other),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Account events
//!
//! ```no_run
//! # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
//! let mut streamer = client.streaming().account_events().await?;
//!
//! while let Some(event) = streamer.next().await {
//!     println!("{:?}", event?);
//! }
//! # Ok(())
//! # }
//! ```

mod account;
mod events;
mod market;

pub use account::{AccountEvent, AccountEventStreamer, OrderActivity};
pub use events::{
    EventFilter, StreamEvent, StreamQuote, StreamSummary, StreamTimesale, StreamTrade,
};
pub use market::MarketStreamer;

use std::sync::Arc;

use serde::Deserialize;

use crate::client::ClientInner;
use crate::Result;

/// Access point for streaming services.
pub struct StreamingServices {
    inner: Arc<ClientInner>,
}

impl StreamingServices {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a market event streamer.
    pub async fn market(&self) -> Result<MarketStreamer> {
        MarketStreamer::connect(self.inner.clone()).await
    }

    /// Create an account event streamer.
    pub async fn account_events(&self) -> Result<AccountEventStreamer> {
        AccountEventStreamer::connect(self.inner.clone()).await
    }

    /// Create a market stream session without connecting.
    ///
    /// Useful when the WebSocket is driven by other machinery; most
    /// callers want [`market`](Self::market) instead.
    pub async fn market_session(&self) -> Result<StreamSession> {
        create_session(&self.inner, "/markets/events/session").await
    }

    /// Create an account stream session without connecting.
    pub async fn account_session(&self) -> Result<StreamSession> {
        create_session(&self.inner, "/accounts/events/session").await
    }
}

/// A short-lived stream session.
///
/// Sessions expire after five minutes if no connection uses them.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamSession {
    /// Session ID to present in the subscribe payload
    pub sessionid: String,
    /// Streaming endpoint URL the session is valid for
    pub url: String,
}

pub(crate) async fn create_session(
    inner: &Arc<ClientInner>,
    path: &str,
) -> Result<StreamSession> {
    #[derive(Deserialize)]
    struct Response {
        stream: StreamSession,
    }

    let response: Response = inner.post_form(path, &[]).await?;
    Ok(response.stream)
}
