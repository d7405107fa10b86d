//! Options data service: chains, expirations, strikes, and root lookup.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::client::ClientInner;
use crate::models::serde_util::one_or_many;
use crate::models::{Expiration, OptionContract, OptionRoot};
use crate::Result;

/// Service for option chain data.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// // Find the expirations trading for SPY
/// let expirations = client.options().expirations("SPY", true).await?;
///
/// // Fetch the chain for the front expiration, with greeks
/// if let Some(expiration) = expirations.first() {
///     let chain = client.options().chain("SPY", *expiration, true).await?;
///     println!("{} contracts", chain.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct OptionsService {
    inner: Arc<ClientInner>,
}

impl OptionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the option chain for a symbol and expiration.
    ///
    /// Greeks come from ORATS and update hourly when requested.
    pub async fn chain(
        &self,
        symbol: &str,
        expiration: NaiveDate,
        greeks: bool,
    ) -> Result<Vec<OptionContract>> {
        #[derive(Serialize)]
        struct Query<'a> {
            symbol: &'a str,
            expiration: NaiveDate,
            greeks: bool,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            options: Option<OptionsList>,
        }

        #[derive(serde::Deserialize)]
        struct OptionsList {
            #[serde(default, with = "one_or_many")]
            option: Vec<OptionContract>,
        }

        let query = Query {
            symbol,
            expiration,
            greeks,
        };

        let response: Response = self
            .inner
            .get_with_query("/markets/options/chains", &query)
            .await?;
        Ok(response.options.map(|list| list.option).unwrap_or_default())
    }

    /// Get the expiration dates trading for a symbol.
    ///
    /// Set `include_all_roots` to include expirations from non-standard
    /// roots (mini contracts, adjusted symbols).
    pub async fn expirations(
        &self,
        symbol: &str,
        include_all_roots: bool,
    ) -> Result<Vec<NaiveDate>> {
        #[derive(Serialize)]
        struct Query<'a> {
            symbol: &'a str,
            #[serde(rename = "includeAllRoots")]
            include_all_roots: bool,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            expirations: Option<DateList>,
        }

        #[derive(serde::Deserialize)]
        struct DateList {
            #[serde(default, with = "one_or_many")]
            date: Vec<NaiveDate>,
        }

        let query = Query {
            symbol,
            include_all_roots,
        };

        let response: Response = self
            .inner
            .get_with_query("/markets/options/expirations", &query)
            .await?;
        Ok(response
            .expirations
            .map(|list| list.date)
            .unwrap_or_default())
    }

    /// Get expiration dates with their strikes and contract terms.
    pub async fn expirations_detailed(
        &self,
        symbol: &str,
        include_all_roots: bool,
    ) -> Result<Vec<Expiration>> {
        #[derive(Serialize)]
        struct Query<'a> {
            symbol: &'a str,
            #[serde(rename = "includeAllRoots")]
            include_all_roots: bool,
            strikes: bool,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            expirations: Option<ExpirationList>,
        }

        #[derive(serde::Deserialize)]
        struct ExpirationList {
            #[serde(default, with = "one_or_many")]
            expiration: Vec<Expiration>,
        }

        let query = Query {
            symbol,
            include_all_roots,
            strikes: true,
        };

        let response: Response = self
            .inner
            .get_with_query("/markets/options/expirations", &query)
            .await?;
        Ok(response
            .expirations
            .map(|list| list.expiration)
            .unwrap_or_default())
    }

    /// Get the strike prices trading for a symbol and expiration.
    pub async fn strikes(&self, symbol: &str, expiration: NaiveDate) -> Result<Vec<Decimal>> {
        #[derive(Serialize)]
        struct Query<'a> {
            symbol: &'a str,
            expiration: NaiveDate,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            strikes: Option<StrikesList>,
        }

        #[derive(serde::Deserialize)]
        struct StrikesList {
            #[serde(default, with = "one_or_many")]
            strike: Vec<Decimal>,
        }

        let response: Response = self
            .inner
            .get_with_query("/markets/options/strikes", &Query { symbol, expiration })
            .await?;
        Ok(response.strikes.map(|list| list.strike).unwrap_or_default())
    }

    /// Look up the option roots trading for an underlying.
    pub async fn lookup(&self, underlying: &str) -> Result<Vec<OptionRoot>> {
        #[derive(Serialize)]
        struct Query<'a> {
            underlying: &'a str,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            symbols: Vec<OptionRoot>,
        }

        let response: Response = self
            .inner
            .get_with_query("/markets/options/lookup", &Query { underlying })
            .await?;
        Ok(response.symbols)
    }
}
