//! Market event streaming over WebSocket.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, RwLock};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::client::ClientInner;
use crate::{Error, Result};

use super::events::{EventFilter, StreamEvent};
use super::StreamSession;

type WsSink = futures_util::stream::SplitSink<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
    Message,
>;

type WsSource = futures_util::stream::SplitStream<
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
>;

/// Market data streamer.
///
/// Streams quote, trade, summary, and time-and-sales events for the
/// symbols passed to [`subscribe`](Self::subscribe). Each `subscribe`
/// call replaces the active symbol list.
pub struct MarketStreamer {
    write: Arc<RwLock<WsSink>>,
    event_rx: mpsc::Receiver<Result<StreamEvent>>,
    session: StreamSession,
}

impl MarketStreamer {
    /// Connect to the market event stream.
    pub(crate) async fn connect(client: Arc<ClientInner>) -> Result<Self> {
        // The stream session is created over REST and authorizes the
        // WebSocket subscription.
        let session = super::create_session(&client, "/markets/events/session").await?;

        let url = format!(
            "{}/markets/events",
            client.session.environment().await.stream_ws_url()
        );
        let (ws_stream, _) = connect_async(url.as_str()).await?;
        let (write, read) = ws_stream.split();

        let write = Arc::new(RwLock::new(write));
        let (event_tx, event_rx) = mpsc::channel(1024);

        tokio::spawn(async move {
            Self::process_messages(read, event_tx).await;
        });

        Ok(Self {
            write,
            event_rx,
            session,
        })
    }

    /// Subscribe to events for the given symbols.
    ///
    /// An empty `filter` streams every event type. Calling this again
    /// replaces the previous symbol list.
    pub async fn subscribe(&mut self, symbols: &[&str], filter: &[EventFilter]) -> Result<()> {
        let mut payload = serde_json::json!({
            "symbols": symbols,
            "sessionid": self.session.sessionid,
            "linebreak": true,
        });

        if !filter.is_empty() {
            payload["filter"] = serde_json::to_value(filter)?;
        }

        self.send_message(&payload).await
    }

    /// Get the next event.
    ///
    /// Returns `None` once the stream is closed and drained.
    pub async fn next(&mut self) -> Option<Result<StreamEvent>> {
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

    async fn process_messages(mut read: WsSource, event_tx: mpsc::Sender<Result<StreamEvent>>) {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    // linebreak mode delivers one JSON document per line
                    for line in text.lines() {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match StreamEvent::parse(line) {
                            Ok(event) => {
                                if event_tx.send(Ok(event)).await.is_err() {
                                    return;
                                }
                            }
                            Err(err) => {
                                tracing::warn!("Unparseable stream line: {}", err);
                            }
                        }
                    }
                }
                Ok(Message::Ping(_)) => {
                    // Pong replies are handled at the protocol level
                }
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
