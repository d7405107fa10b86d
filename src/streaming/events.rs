//! Market stream event types.
//!
//! Events arrive as JSON objects tagged by a `type` field. Numeric values
//! come over the wire as strings (`"price": "282.08"`), which `Decimal`
//! tolerates, and the date fields are epoch milliseconds carried as
//! strings, which the epoch codec tolerates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::serde_util::epoch_millis;
use crate::{Error, Result};

/// Event types that can be requested in the subscribe payload's filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventFilter {
    /// Top-of-book quote changes
    Quote,
    /// Executions
    Trade,
    /// Session summaries
    Summary,
    /// Time and sales
    Timesale,
    /// Extended trade details
    Tradex,
}

/// An event from the market stream.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// Top-of-book quote change
    Quote(StreamQuote),
    /// Execution
    Trade(StreamTrade),
    /// Session summary
    Summary(StreamSummary),
    /// Time and sales entry
    Timesale(StreamTimesale),
    /// Unknown event type (raw JSON)
    ///
    /// The API added an event type this library doesn't recognize yet.
    Unknown(Value),
}

impl StreamEvent {
    /// The symbol the event is for, when the event carries one.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            StreamEvent::Quote(e) => Some(&e.symbol),
            StreamEvent::Trade(e) => Some(&e.symbol),
            StreamEvent::Summary(e) => Some(&e.symbol),
            StreamEvent::Timesale(e) => Some(&e.symbol),
            StreamEvent::Unknown(json) => json.get("symbol").and_then(|s| s.as_str()),
        }
    }

    /// Parse one line of stream output.
    pub(crate) fn parse(text: &str) -> Result<StreamEvent> {
        let json: Value = serde_json::from_str(text)?;

        let kind = json.get("type").and_then(|t| t.as_str()).unwrap_or("");

        let event = match kind {
            "quote" => StreamEvent::Quote(serde_json::from_value(json)?),
            "trade" => StreamEvent::Trade(serde_json::from_value(json)?),
            "summary" => StreamEvent::Summary(serde_json::from_value(json)?),
            "timesale" => StreamEvent::Timesale(serde_json::from_value(json)?),
            _ => StreamEvent::Unknown(json),
        };

        Ok(event)
    }
}

impl std::str::FromStr for StreamEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A streamed top-of-book quote change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamQuote {
    /// Trading symbol
    pub symbol: String,
    /// Best bid price
    pub bid: Decimal,
    /// Best bid size
    #[serde(default)]
    pub bidsz: Option<Decimal>,
    /// Exchange of the best bid
    #[serde(default)]
    pub bidexch: Option<String>,
    /// When the bid was set (epoch milliseconds)
    #[serde(with = "epoch_millis")]
    pub biddate: DateTime<Utc>,
    /// Best ask price
    pub ask: Decimal,
    /// Best ask size
    #[serde(default)]
    pub asksz: Option<Decimal>,
    /// Exchange of the best ask
    #[serde(default)]
    pub askexch: Option<String>,
    /// When the ask was set (epoch milliseconds)
    #[serde(with = "epoch_millis")]
    pub askdate: DateTime<Utc>,
}

/// A streamed execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamTrade {
    /// Trading symbol
    pub symbol: String,
    /// Exchange code
    #[serde(default)]
    pub exch: Option<String>,
    /// Execution price
    pub price: Decimal,
    /// Execution size
    #[serde(default)]
    pub size: Option<Decimal>,
    /// Cumulative session volume
    #[serde(default)]
    pub cvol: Option<Decimal>,
    /// When the trade occurred (epoch milliseconds)
    #[serde(with = "epoch_millis")]
    pub date: DateTime<Utc>,
    /// Last trade price
    #[serde(default)]
    pub last: Option<Decimal>,
}

/// A streamed session summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSummary {
    /// Trading symbol
    pub symbol: String,
    /// Session open
    #[serde(default)]
    pub open: Option<Decimal>,
    /// Session high
    #[serde(default)]
    pub high: Option<Decimal>,
    /// Session low
    #[serde(default)]
    pub low: Option<Decimal>,
    /// Previous session's close
    #[serde(default, rename = "prevClose")]
    pub prev_close: Option<Decimal>,
    /// Session close, once set
    #[serde(default)]
    pub close: Option<Decimal>,
}

/// A streamed time-and-sales entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamTimesale {
    /// Trading symbol
    pub symbol: String,
    /// Exchange code
    #[serde(default)]
    pub exch: Option<String>,
    /// Best bid at trade time
    #[serde(default)]
    pub bid: Option<Decimal>,
    /// Best ask at trade time
    #[serde(default)]
    pub ask: Option<Decimal>,
    /// Trade price
    #[serde(default)]
    pub last: Option<Decimal>,
    /// Trade size
    #[serde(default)]
    pub size: Option<Decimal>,
    /// When the trade occurred (epoch milliseconds)
    #[serde(with = "epoch_millis")]
    pub date: DateTime<Utc>,
    /// Sequence number within the session
    #[serde(default)]
    pub seq: Option<u64>,
    /// Trade condition flag
    #[serde(default)]
    pub flag: Option<String>,
    /// Whether this entry cancels a prior report
    #[serde(default)]
    pub cancel: Option<bool>,
    /// Whether this entry corrects a prior report
    #[serde(default)]
    pub correction: Option<bool>,
    /// Session the trade printed in
    #[serde(default)]
    pub session: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_quote_with_string_numbers() {
        let line = r#"{
            "type": "quote",
            "symbol": "SPY",
            "bid": 281.84,
            "bidsz": 60,
            "bidexch": "M",
            "biddate": "1557757188000",
            "ask": 281.85,
            "asksz": 6,
            "askexch": "Z",
            "askdate": "1557757188000"
        }"#;

        let event = StreamEvent::parse(line).unwrap();
        match event {
            StreamEvent::Quote(quote) => {
                assert_eq!(quote.symbol, "SPY");
                assert_eq!(quote.bid, dec!(281.84));
                assert_eq!(quote.biddate.timestamp_millis(), 1557757188000);
            }
            other => panic!("Expected quote, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_trade_string_price() {
        let line = r#"{
            "type": "trade",
            "symbol": "SPY",
            "exch": "j",
            "price": "282.08",
            "size": "100",
            "cvol": "52652539",
            "date": "1557757189195",
            "last": "282.08"
        }"#;

        let event = StreamEvent::parse(line).unwrap();
        match event {
            StreamEvent::Trade(trade) => {
                assert_eq!(trade.price, dec!(282.08));
                assert_eq!(trade.size, Some(dec!(100)));
                assert_eq!(trade.date.timestamp_millis(), 1557757189195);
            }
            other => panic!("Expected trade, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_event_type() {
        let line = r#"{"type": "halts", "symbol": "XYZ", "state": "halted"}"#;
        let event = StreamEvent::parse(line).unwrap();
        match &event {
            StreamEvent::Unknown(json) => {
                assert_eq!(json.get("type").and_then(|t| t.as_str()), Some("halts"));
            }
            other => panic!("Expected unknown, got {:?}", other),
        }
        assert_eq!(event.symbol(), Some("XYZ"));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(StreamEvent::parse("not json at all").is_err());
    }

    #[test]
    fn test_event_filter_wire_names() {
        assert_eq!(
            serde_json::to_string(&EventFilter::Timesale).unwrap(),
            "\"timesale\""
        );
    }
}
