//! Fundamentals service for the beta company-data endpoints.
//!
//! These endpoints are in beta upstream and their deep table shapes churn;
//! see the notes on [`crate::models::fundamentals`].

use std::sync::Arc;

use serde::Serialize;

use crate::client::ClientInner;
use crate::models::{CompanyData, CorporateCalendarData, DividendsData, RawFundamentalsData};
use crate::Result;

/// Service for fundamental company data (beta).
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let companies = client.fundamentals().company(&["AAPL"]).await?;
/// for envelope in &companies {
///     println!("{}: {} result blocks", envelope.request, envelope.results.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct FundamentalsService {
    inner: Arc<ClientInner>,
}

#[derive(Serialize)]
struct SymbolsQuery {
    symbols: String,
}

impl FundamentalsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn symbols_query(symbols: &[&str]) -> SymbolsQuery {
        SymbolsQuery {
            symbols: symbols.join(","),
        }
    }

    /// Get company information for one or more symbols.
    pub async fn company(&self, symbols: &[&str]) -> Result<Vec<CompanyData>> {
        self.inner
            .get_with_query(
                "/beta/markets/fundamentals/company",
                &Self::symbols_query(symbols),
            )
            .await
    }

    /// Get scheduled corporate events (earnings calls, meetings).
    pub async fn corporate_calendars(
        &self,
        symbols: &[&str],
    ) -> Result<Vec<CorporateCalendarData>> {
        self.inner
            .get_with_query(
                "/beta/markets/fundamentals/calendars",
                &Self::symbols_query(symbols),
            )
            .await
    }

    /// Get dividend history.
    pub async fn dividends(&self, symbols: &[&str]) -> Result<Vec<DividendsData>> {
        self.inner
            .get_with_query(
                "/beta/markets/fundamentals/dividends",
                &Self::symbols_query(symbols),
            )
            .await
    }

    /// Get financial ratios.
    pub async fn ratios(&self, symbols: &[&str]) -> Result<Vec<RawFundamentalsData>> {
        self.inner
            .get_with_query(
                "/beta/markets/fundamentals/ratios",
                &Self::symbols_query(symbols),
            )
            .await
    }

    /// Get corporate financial statements.
    pub async fn financials(&self, symbols: &[&str]) -> Result<Vec<RawFundamentalsData>> {
        self.inner
            .get_with_query(
                "/beta/markets/fundamentals/financials",
                &Self::symbols_query(symbols),
            )
            .await
    }

    /// Get price statistics.
    pub async fn statistics(&self, symbols: &[&str]) -> Result<Vec<RawFundamentalsData>> {
        self.inner
            .get_with_query(
                "/beta/markets/fundamentals/statistics",
                &Self::symbols_query(symbols),
            )
            .await
    }
}
