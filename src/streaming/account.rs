//! Account event streaming over WebSocket.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::client::ClientInner;
use crate::{Error, Result};

use super::StreamSession;

type WsSink = futures_util::stream::SplitSink<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
    Message,
>;

type WsSource = futures_util::stream::SplitStream<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
>;

/// An event from the account stream.
#[derive(Debug, Clone)]
pub enum AccountEvent {
    /// Order status change
    Order(OrderActivity),
    /// Keep-alive heartbeat
    Heartbeat,
    /// Unknown event type (raw JSON)
    Unknown(Value),
}

/// An order status change from the account stream.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderActivity {
    /// Order ID
    #[serde(default)]
    pub id: Option<u64>,
    /// Account the order belongs to
    #[serde(default)]
    pub account: Option<String>,
    /// New order status
    #[serde(default)]
    pub status: Option<String>,
    /// Trading symbol
    #[serde(default)]
    pub symbol: Option<String>,
    /// Executed quantity so far
    #[serde(default)]
    pub exec_quantity: Option<Decimal>,
    /// Price of the most recent fill
    #[serde(default)]
    pub last_fill_price: Option<Decimal>,
    /// Quantity still working
    #[serde(default)]
    pub remaining_quantity: Option<Decimal>,
}

/// Account activity streamer.
///
/// Surfaces order status changes for every account the session can see.
pub struct AccountEventStreamer {
    write: Arc<RwLock<WsSink>>,
    event_rx: mpsc::Receiver<Result<AccountEvent>>,
    session: StreamSession,
}

impl AccountEventStreamer {
    /// Connect to the account event stream.
    pub(crate) async fn connect(client: Arc<ClientInner>) -> Result<Self> {
        let session = super::create_session(&client, "/accounts/events/session").await?;

        let url = format!(
            "{}/accounts/events",
            client.session.environment().await.stream_ws_url()
        );
        let (ws_stream, _) = connect_async(url.as_str()).await?;
        let (write, read) = ws_stream.split();

        let write = Arc::new(RwLock::new(write));
        let (event_tx, event_rx) = mpsc::channel(1024);

        let streamer = Self {
            write,
            event_rx,
            session,
        };

        // Subscribe to order events for all visible accounts.
        streamer
            .send_message(&serde_json::json!({
                "events": ["order"],
                "sessionid": streamer.session.sessionid,
                "excludeAccounts": [],
            }))
            .await?;

        tokio::spawn(async move {
            Self::process_messages(read, event_tx).await;
        });

        Ok(streamer)
    }

    /// Get the next event.
    ///
    /// Returns `None` once the stream is closed and drained.
    pub async fn next(&mut self) -> Option<Result<AccountEvent>> {
        self.event_rx.recv().await
    }

    /// The stream session backing this connection.
    pub fn session(&self) -> &StreamSession {
        &self.session
    }

    /// Close the connection.
    pub async fn close(&mut self) -> Result<()> {
        let mut write = self.write.write().await;
        write.close().await?;
        Ok(())
    }

    async fn send_message(&self, msg: &serde_json::Value) -> Result<()> {
        let mut write = self.write.write().await;
        write.send(Message::Text(msg.to_string().into())).await?;
        Ok(())
    }

    fn parse_event(text: &str) -> Result<AccountEvent> {
        let json: Value = serde_json::from_str(text)?;

        let event = match json.get("event").and_then(|e| e.as_str()) {
            Some("order") => AccountEvent::Order(serde_json::from_value(json)?),
            Some("heartbeat") => AccountEvent::Heartbeat,
            _ => AccountEvent::Unknown(json),
        };

        Ok(event)
    }

    async fn process_messages(mut read: WsSource, event_tx: mpsc::Sender<Result<AccountEvent>>) {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    for line in text.lines() {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match Self::parse_event(line) {
                            Ok(event) => {
                                if event_tx.send(Ok(event)).await.is_err() {
                                    return;
                                }
                            }
                            Err(err) => {
                                tracing::warn!("Unparseable account event: {}", err);
                            }
                        }
                    }
                }
                Ok(Message::Ping(_)) => {}
                Ok(Message::Close(_)) => {
                    let _ = event_tx.send(Err(Error::StreamDisconnected)).await;
                    return;
                }
                Err(e) => {
                    let _ = event_tx.send(Err(Error::WebSocket(e.to_string()))).await;
                    return;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_order_event() {
        let line = r#"{
            "event": "order",
            "id": 229064,
            "account": "VA000001",
            "status": "filled",
            "symbol": "AAPL",
            "exec_quantity": "10",
            "last_fill_price": "185.92",
            "remaining_quantity": "0"
        }"#;

        let event = AccountEventStreamer::parse_event(line).unwrap();
        match event {
            AccountEvent::Order(order) => {
                assert_eq!(order.id, Some(229064));
                assert_eq!(order.status.as_deref(), Some("filled"));
                assert_eq!(order.last_fill_price, Some(dec!(185.92)));
            }
            other => panic!("Expected order event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_heartbeat() {
        let event = AccountEventStreamer::parse_event(r#"{"event": "heartbeat"}"#).unwrap();
        assert!(matches!(event, AccountEvent::Heartbeat));
    }

    #[test]
    fn test_parse_unknown_event() {
        let event =
            AccountEventStreamer::parse_event(r#"{"event": "position", "symbol": "F"}"#).unwrap();
        assert!(matches!(event, AccountEvent::Unknown(_)));
    }
}
