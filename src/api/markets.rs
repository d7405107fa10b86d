//! Market data service: quotes, history, time and sales, clock, calendar,
//! and security lookup.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::client::ClientInner;
use crate::models::serde_util::one_or_many;
use crate::models::{
    Clock, HistoricBar, HistoricalInterval, MarketCalendar, Quote, QuoteBatch, Security,
    SessionFilter, TimesalesInterval, TimesalesPoint,
};
use crate::{Error, Result};

/// Service for market data operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// // Snapshot quotes, with greeks for option symbols
/// let batch = client.markets().quotes(&["AAPL", "SPY"], false).await?;
/// for quote in &batch.quotes {
///     println!("{}: bid={:?} ask={:?}", quote.symbol, quote.bid, quote.ask);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MarketsService {
    inner: Arc<ClientInner>,
}

impl MarketsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get snapshot quotes for one or more symbols.
    ///
    /// Option symbols get a greeks block when `greeks` is `true`.
    /// Unrecognized symbols are reported in
    /// [`QuoteBatch::unmatched_symbols`] rather than failing the request.
    pub async fn quotes(&self, symbols: &[&str], greeks: bool) -> Result<QuoteBatch> {
        #[derive(Serialize)]
        struct Query {
            symbols: String,
            greeks: bool,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            quotes: Option<QuotesList>,
        }

        #[derive(serde::Deserialize)]
        struct QuotesList {
            #[serde(default, with = "one_or_many")]
            quote: Vec<Quote>,
            #[serde(default)]
            unmatched_symbols: Option<UnmatchedList>,
        }

        #[derive(serde::Deserialize)]
        struct UnmatchedList {
            #[serde(default, with = "one_or_many")]
            symbol: Vec<String>,
        }

        let query = Query {
            symbols: symbols.join(","),
            greeks,
        };

        let response: Response = self
            .inner
            .get_with_query("/markets/quotes", &query)
            .await?;

        Ok(match response.quotes {
            Some(list) => QuoteBatch {
                quotes: list.quote,
                unmatched_symbols: list
                    .unmatched_symbols
                    .map(|u| u.symbol)
                    .unwrap_or_default(),
            },
            None => QuoteBatch::default(),
        })
    }

    /// Get a snapshot quote for a single symbol.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSymbol`] when the API does not recognize
    /// the symbol.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let batch = self.quotes(&[symbol], false).await?;
        batch
            .quotes
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidSymbol(symbol.to_string()))
    }

    /// Get historical bars for a symbol.
    pub async fn history(
        &self,
        symbol: &str,
        interval: HistoricalInterval,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<HistoricBar>> {
        #[derive(Serialize)]
        struct Query<'a> {
            symbol: &'a str,
            interval: HistoricalInterval,
            #[serde(skip_serializing_if = "Option::is_none")]
            start: Option<NaiveDate>,
            #[serde(skip_serializing_if = "Option::is_none")]
            end: Option<NaiveDate>,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            history: Option<BarList>,
        }

        #[derive(serde::Deserialize)]
        struct BarList {
            #[serde(default, with = "one_or_many")]
            day: Vec<HistoricBar>,
        }

        let query = Query {
            symbol,
            interval,
            start,
            end,
        };

        let response: Response = self
            .inner
            .get_with_query("/markets/history", &query)
            .await?;
        Ok(response.history.map(|list| list.day).unwrap_or_default())
    }

    /// Get intraday time and sales for a symbol.
    ///
    /// Tick data is available for 5 days, minute data for 20 days, and
    /// 15-minute data for 40 days back.
    pub async fn timesales(
        &self,
        symbol: &str,
        interval: TimesalesInterval,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        session_filter: Option<SessionFilter>,
    ) -> Result<Vec<TimesalesPoint>> {
        #[derive(Serialize)]
        struct Query<'a> {
            symbol: &'a str,
            interval: TimesalesInterval,
            #[serde(skip_serializing_if = "Option::is_none")]
            start: Option<NaiveDateTime>,
            #[serde(skip_serializing_if = "Option::is_none")]
            end: Option<NaiveDateTime>,
            #[serde(skip_serializing_if = "Option::is_none")]
            session_filter: Option<SessionFilter>,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            series: Option<SeriesList>,
        }

        #[derive(serde::Deserialize)]
        struct SeriesList {
            #[serde(default, with = "one_or_many")]
            data: Vec<TimesalesPoint>,
        }

        let query = Query {
            symbol,
            interval,
            start,
            end,
            session_filter,
        };

        let response: Response = self
            .inner
            .get_with_query("/markets/timesales", &query)
            .await?;
        Ok(response.series.map(|list| list.data).unwrap_or_default())
    }

    /// Get the current state of the market clock.
    pub async fn clock(&self) -> Result<Clock> {
        #[derive(serde::Deserialize)]
        struct Response {
            clock: Clock,
        }

        let response: Response = self.inner.get("/markets/clock").await?;
        Ok(response.clock)
    }

    /// Get the market calendar for a month.
    ///
    /// Defaults to the current month when `month`/`year` are `None`.
    pub async fn calendar(&self, month: Option<u32>, year: Option<i32>) -> Result<MarketCalendar> {
        #[derive(Serialize)]
        struct Query {
            #[serde(skip_serializing_if = "Option::is_none")]
            month: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            year: Option<i32>,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            calendar: MarketCalendar,
        }

        let response: Response = self
            .inner
            .get_with_query("/markets/calendar", &Query { month, year })
            .await?;
        Ok(response.calendar)
    }

    /// Search for securities by company name.
    pub async fn search(&self, query: &str) -> Result<Vec<Security>> {
        #[derive(Serialize)]
        struct Query<'a> {
            q: &'a str,
        }

        let response: SecuritiesResponse = self
            .inner
            .get_with_query("/markets/search", &Query { q: query })
            .await?;
        Ok(response.into_vec())
    }

    /// Look up securities matching a symbol fragment.
    ///
    /// `exchanges` and `types` filter the results (e.g. `&["Q", "N"]` and
    /// `&["stock", "etf"]`).
    pub async fn lookup(
        &self,
        query: &str,
        exchanges: Option<&[&str]>,
        types: Option<&[&str]>,
    ) -> Result<Vec<Security>> {
        #[derive(Serialize)]
        struct Query<'a> {
            q: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            exchanges: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            types: Option<String>,
        }

        let query = Query {
            q: query,
            exchanges: exchanges.map(|e| e.join(",")),
            types: types.map(|t| t.join(",")),
        };

        let response: SecuritiesResponse = self
            .inner
            .get_with_query("/markets/lookup", &query)
            .await?;
        Ok(response.into_vec())
    }

    /// Get the list of securities currently easy to borrow.
    pub async fn etb(&self) -> Result<Vec<Security>> {
        let response: SecuritiesResponse = self.inner.get("/markets/etb").await?;
        Ok(response.into_vec())
    }
}

#[derive(serde::Deserialize)]
struct SecuritiesResponse {
    securities: Option<SecuritiesList>,
}

#[derive(serde::Deserialize)]
struct SecuritiesList {
    #[serde(default, with = "one_or_many")]
    security: Vec<Security>,
}

impl SecuritiesResponse {
    fn into_vec(self) -> Vec<Security> {
        self.securities.map(|list| list.security).unwrap_or_default()
    }
}
