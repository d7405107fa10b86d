//! Market data models: quotes, bars, time and sales, clock, calendar, and
//! security lookup results.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{ExpirationType, MarketDayStatus, MarketState, OptionType, SecurityType};
use super::serde_util::{datetime_format, epoch_millis, epoch_seconds};

/// Snapshot quote for an equity, index, or option contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Trading symbol
    pub symbol: String,
    /// Instrument description
    #[serde(default)]
    pub description: Option<String>,
    /// Exchange code
    #[serde(default)]
    pub exch: Option<String>,
    /// Security type
    #[serde(rename = "type", default)]
    pub security_type: Option<SecurityType>,
    /// Last trade price
    #[serde(default)]
    pub last: Option<Decimal>,
    /// Net change from previous close
    #[serde(default)]
    pub change: Option<Decimal>,
    /// Percent change from previous close
    #[serde(default)]
    pub change_percentage: Option<Decimal>,
    /// Today's trading volume
    #[serde(default)]
    pub volume: Option<i64>,
    /// Average daily volume
    #[serde(default)]
    pub average_volume: Option<i64>,
    /// Size of the last trade
    #[serde(default)]
    pub last_volume: Option<i64>,
    /// When the last trade occurred (epoch milliseconds)
    #[serde(default, with = "epoch_millis::option")]
    pub trade_date: Option<DateTime<Utc>>,
    /// Today's open
    #[serde(default)]
    pub open: Option<Decimal>,
    /// Today's high
    #[serde(default)]
    pub high: Option<Decimal>,
    /// Today's low
    #[serde(default)]
    pub low: Option<Decimal>,
    /// Today's close (if the session has ended)
    #[serde(default)]
    pub close: Option<Decimal>,
    /// Previous session's close
    #[serde(default)]
    pub prevclose: Option<Decimal>,
    /// 52-week high
    #[serde(default)]
    pub week_52_high: Option<Decimal>,
    /// 52-week low
    #[serde(default)]
    pub week_52_low: Option<Decimal>,
    /// Best bid price
    #[serde(default)]
    pub bid: Option<Decimal>,
    /// Best bid size
    #[serde(default)]
    pub bidsize: Option<i64>,
    /// Exchange of the best bid
    #[serde(default)]
    pub bidexch: Option<String>,
    /// When the bid was set (epoch milliseconds)
    #[serde(default, with = "epoch_millis::option")]
    pub bid_date: Option<DateTime<Utc>>,
    /// Best ask price
    #[serde(default)]
    pub ask: Option<Decimal>,
    /// Best ask size
    #[serde(default)]
    pub asksize: Option<i64>,
    /// Exchange of the best ask
    #[serde(default)]
    pub askexch: Option<String>,
    /// When the ask was set (epoch milliseconds)
    #[serde(default, with = "epoch_millis::option")]
    pub ask_date: Option<DateTime<Utc>>,
    /// Open interest (options only)
    #[serde(default)]
    pub open_interest: Option<i64>,
    /// Underlying symbol (options only)
    #[serde(default)]
    pub underlying: Option<String>,
    /// Strike price (options only)
    #[serde(default)]
    pub strike: Option<Decimal>,
    /// Contract size (options only, usually 100)
    #[serde(default)]
    pub contract_size: Option<i64>,
    /// Expiration date (options only)
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    /// Expiration cycle (options only)
    #[serde(default)]
    pub expiration_type: Option<ExpirationType>,
    /// Call or put (options only)
    #[serde(default)]
    pub option_type: Option<OptionType>,
    /// Option root symbol (options only)
    #[serde(default)]
    pub root_symbol: Option<String>,
    /// Greeks and volatility block (when requested)
    #[serde(default)]
    pub greeks: Option<Greeks>,
}

impl Quote {
    /// Calculate the bid-ask spread.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.ask, self.bid) {
            (Some(ask), Some(bid)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Midpoint of the bid-ask spread.
    pub fn mid(&self) -> Option<Decimal> {
        match (self.ask, self.bid) {
            (Some(ask), Some(bid)) => Some((ask + bid) / Decimal::TWO),
            _ => None,
        }
    }

    /// Returns `true` if quote data is available.
    pub fn has_quote(&self) -> bool {
        self.bid.is_some() && self.ask.is_some()
    }

    /// Returns `true` if this quote is for an option contract.
    pub fn is_option(&self) -> bool {
        matches!(self.security_type, Some(SecurityType::Option))
    }
}

/// Greeks and implied volatility for an option contract.
///
/// Published by ORATS and updated once per hour during trading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta
    #[serde(default)]
    pub delta: Option<Decimal>,
    /// Gamma
    #[serde(default)]
    pub gamma: Option<Decimal>,
    /// Theta
    #[serde(default)]
    pub theta: Option<Decimal>,
    /// Vega
    #[serde(default)]
    pub vega: Option<Decimal>,
    /// Rho
    #[serde(default)]
    pub rho: Option<Decimal>,
    /// Phi
    #[serde(default)]
    pub phi: Option<Decimal>,
    /// Implied volatility at the bid
    #[serde(default)]
    pub bid_iv: Option<Decimal>,
    /// Implied volatility at the mid
    #[serde(default)]
    pub mid_iv: Option<Decimal>,
    /// Implied volatility at the ask
    #[serde(default)]
    pub ask_iv: Option<Decimal>,
    /// SMV volatility
    #[serde(default)]
    pub smv_vol: Option<Decimal>,
    /// When the block was computed (`yyyy-MM-dd HH:mm:ss`, UTC)
    #[serde(default, with = "datetime_format::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The result of a quote request: matched quotes plus any symbols the API
/// did not recognize.
#[derive(Debug, Clone, Default)]
pub struct QuoteBatch {
    /// Quotes for the recognized symbols
    pub quotes: Vec<Quote>,
    /// Symbols the API could not match
    pub unmatched_symbols: Vec<String>,
}

/// A single historical bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricBar {
    /// Session date
    pub date: NaiveDate,
    /// Opening price
    pub open: Decimal,
    /// Session high
    pub high: Decimal,
    /// Session low
    pub low: Decimal,
    /// Closing price
    pub close: Decimal,
    /// Session volume
    pub volume: i64,
}

/// A single intraday time-and-sales point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesalesPoint {
    /// Bar time (exchange local, no offset)
    pub time: NaiveDateTime,
    /// Bar time as a UTC instant (epoch seconds)
    #[serde(with = "epoch_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Trade price or bar average
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Bar open
    #[serde(default)]
    pub open: Option<Decimal>,
    /// Bar high
    #[serde(default)]
    pub high: Option<Decimal>,
    /// Bar low
    #[serde(default)]
    pub low: Option<Decimal>,
    /// Bar close
    #[serde(default)]
    pub close: Option<Decimal>,
    /// Bar volume
    #[serde(default)]
    pub volume: Option<i64>,
    /// Volume-weighted average price
    #[serde(default)]
    pub vwap: Option<Decimal>,
}

/// Current state of the market clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Today's date
    pub date: NaiveDate,
    /// Human-readable description ("Market is open from...")
    #[serde(default)]
    pub description: Option<String>,
    /// Current session state
    pub state: MarketState,
    /// Server time (epoch seconds)
    #[serde(with = "epoch_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Wall-clock time of the next state change ("16:00")
    #[serde(default)]
    pub next_change: Option<String>,
    /// The state the market changes to next
    #[serde(default)]
    pub next_state: Option<MarketState>,
}

/// Market calendar for one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketCalendar {
    /// Calendar month (1-12)
    pub month: u32,
    /// Calendar year
    pub year: i32,
    /// Days of the month
    pub days: CalendarDays,
}

/// Wrapper for the calendar day list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDays {
    /// One entry per calendar day
    #[serde(default, with = "super::serde_util::one_or_many")]
    pub day: Vec<CalendarDay>,
}

/// A single day in the market calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    /// Calendar date
    pub date: NaiveDate,
    /// Open or closed
    pub status: MarketDayStatus,
    /// Session description
    #[serde(default)]
    pub description: Option<String>,
    /// Pre-market session hours
    #[serde(default)]
    pub premarket: Option<SessionHours>,
    /// Regular session hours
    #[serde(default)]
    pub open: Option<SessionHours>,
    /// Post-market session hours
    #[serde(default)]
    pub postmarket: Option<SessionHours>,
}

/// Start and end of a trading session, as wall-clock strings ("09:30").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHours {
    /// Session start
    pub start: String,
    /// Session end
    pub end: String,
}

/// A security returned by search, lookup, or the easy-to-borrow list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    /// Trading symbol
    pub symbol: String,
    /// Listing exchange code
    #[serde(default)]
    pub exchange: Option<String>,
    /// Security type
    #[serde(rename = "type", default)]
    pub security_type: Option<SecurityType>,
    /// Company/instrument description
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_equity_fixture() {
        let json = r#"{
            "symbol": "AAPL",
            "description": "Apple Inc",
            "exch": "Q",
            "type": "stock",
            "last": 185.925,
            "change": 0.88,
            "volume": 10813308,
            "open": 186.06,
            "high": 186.74,
            "low": 185.19,
            "close": null,
            "bid": 185.92,
            "ask": 185.93,
            "change_percentage": 0.48,
            "average_volume": 27804479,
            "last_volume": 100,
            "trade_date": 1557758874355,
            "prevclose": 185.05,
            "week_52_high": 233.47,
            "week_52_low": 142.0,
            "bidsize": 2,
            "bidexch": "Q",
            "bid_date": 1557758874000,
            "asksize": 2,
            "askexch": "K",
            "ask_date": 1557758874000,
            "root_symbols": "AAPL"
        }"#;

        let quote: Quote = serde_json::from_str(json).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.security_type, Some(SecurityType::Stock));
        assert_eq!(quote.spread(), Some(dec!(0.01)));
        assert!(quote.has_quote());
        assert_eq!(
            quote.trade_date.unwrap().timestamp_millis(),
            1557758874355
        );
    }

    #[test]
    fn test_quote_option_with_greeks() {
        let json = r#"{
            "symbol": "SPY190614C00240000",
            "description": "SPY Jun 14 2019 $240.00 Call",
            "type": "option",
            "underlying": "SPY",
            "strike": 240.0,
            "contract_size": 100,
            "expiration_date": "2019-06-14",
            "expiration_type": "weeklys",
            "option_type": "call",
            "root_symbol": "SPY",
            "open_interest": 0,
            "greeks": {
                "delta": 0.99,
                "gamma": 0.0001,
                "theta": -0.0054,
                "vega": 0.0027,
                "rho": 0.016,
                "phi": -0.66,
                "bid_iv": 0.0,
                "mid_iv": 0.46,
                "ask_iv": 0.46,
                "smv_vol": 0.29,
                "updated_at": "2019-08-29 14:59:08"
            }
        }"#;

        let quote: Quote = serde_json::from_str(json).unwrap();
        assert!(quote.is_option());
        assert_eq!(quote.option_type, Some(OptionType::Call));
        assert_eq!(quote.expiration_type, Some(ExpirationType::Weeklys));
        let greeks = quote.greeks.unwrap();
        assert_eq!(greeks.delta, Some(dec!(0.99)));
        assert_eq!(
            greeks.updated_at.unwrap(),
            Utc.with_ymd_and_hms(2019, 8, 29, 14, 59, 8).unwrap()
        );
    }

    #[test]
    fn test_clock_epoch_seconds() {
        let json = r#"{
            "date": "2019-05-06",
            "description": "Market is open from 09:30 to 16:00",
            "state": "open",
            "timestamp": 1557150001,
            "next_change": "16:00",
            "next_state": "postmarket"
        }"#;

        let clock: Clock = serde_json::from_str(json).unwrap();
        assert_eq!(clock.state, MarketState::Open);
        assert_eq!(clock.timestamp.timestamp(), 1557150001);
        assert_eq!(clock.next_state, Some(MarketState::Postmarket));
    }

    #[test]
    fn test_timesales_point() {
        let json = r#"{
            "time": "2019-05-09T09:30:00",
            "timestamp": 1557408600,
            "price": 282.73,
            "open": 282.42,
            "high": 283.08,
            "low": 282.42,
            "close": 282.99,
            "volume": 1362642,
            "vwap": 282.73
        }"#;

        let point: TimesalesPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.timestamp.timestamp(), 1557408600);
        assert_eq!(point.vwap, Some(dec!(282.73)));
    }

    #[test]
    fn test_calendar_day_sessions() {
        let json = r#"{
            "date": "2019-05-01",
            "status": "open",
            "description": "Market is open",
            "premarket": {"start": "04:00", "end": "09:30"},
            "open": {"start": "09:30", "end": "16:00"},
            "postmarket": {"start": "16:00", "end": "20:00"}
        }"#;

        let day: CalendarDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.status, MarketDayStatus::Open);
        assert_eq!(day.open.unwrap().end, "16:00");
    }
}
