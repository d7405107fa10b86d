//! Watchlists service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::serde_util::one_or_many;
use crate::models::{Watchlist, WatchlistId};
use crate::Result;

/// Service for watchlist operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// // Create a watchlist and add a symbol later
/// let watchlist = client.watchlists().create("Tech", &["AAPL", "MSFT"]).await?;
/// client.watchlists()
///     .add_symbols(&watchlist.id.clone().into(), &["NVDA"])
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct WatchlistsService {
    inner: Arc<ClientInner>,
}

#[derive(serde::Deserialize)]
struct WatchlistsResponse {
    watchlists: Option<WatchlistsList>,
}

#[derive(serde::Deserialize)]
struct WatchlistsList {
    #[serde(default, with = "one_or_many")]
    watchlist: Vec<Watchlist>,
}

impl WatchlistsResponse {
    fn into_vec(self) -> Vec<Watchlist> {
        self.watchlists.map(|list| list.watchlist).unwrap_or_default()
    }
}

#[derive(serde::Deserialize)]
struct WatchlistResponse {
    watchlist: Watchlist,
}

impl WatchlistsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List all watchlists.
    ///
    /// The index listing omits each list's items; use
    /// [`get`](Self::get) for the symbols.
    pub async fn list(&self) -> Result<Vec<Watchlist>> {
        let response: WatchlistsResponse = self.inner.get("/watchlists").await?;
        Ok(response.into_vec())
    }

    /// Get a specific watchlist with its items.
    pub async fn get(&self, id: &WatchlistId) -> Result<Watchlist> {
        let response: WatchlistResponse =
            self.inner.get(&format!("/watchlists/{}", id)).await?;
        Ok(response.watchlist)
    }

    /// Create a new watchlist.
    pub async fn create(&self, name: &str, symbols: &[&str]) -> Result<Watchlist> {
        let form = vec![
            ("name".to_string(), name.to_string()),
            ("symbols".to_string(), symbols.join(",")),
        ];

        let response: WatchlistResponse = self.inner.post_form("/watchlists", &form).await?;
        Ok(response.watchlist)
    }

    /// Replace a watchlist's name and symbols.
    pub async fn update(
        &self,
        id: &WatchlistId,
        name: &str,
        symbols: &[&str],
    ) -> Result<Watchlist> {
        let form = vec![
            ("name".to_string(), name.to_string()),
            ("symbols".to_string(), symbols.join(",")),
        ];

        let response: WatchlistResponse = self
            .inner
            .put_form(&format!("/watchlists/{}", id), &form)
            .await?;
        Ok(response.watchlist)
    }

    /// Delete a watchlist.
    ///
    /// Returns the remaining watchlists.
    pub async fn delete(&self, id: &WatchlistId) -> Result<Vec<Watchlist>> {
        let response: WatchlistsResponse =
            self.inner.delete(&format!("/watchlists/{}", id)).await?;
        Ok(response.into_vec())
    }

    /// Add symbols to a watchlist.
    pub async fn add_symbols(&self, id: &WatchlistId, symbols: &[&str]) -> Result<Watchlist> {
        let form = vec![("symbols".to_string(), symbols.join(","))];

        let response: WatchlistResponse = self
            .inner
            .post_form(&format!("/watchlists/{}/symbols", id), &form)
            .await?;
        Ok(response.watchlist)
    }

    /// Remove a symbol from a watchlist.
    pub async fn remove_symbol(&self, id: &WatchlistId, symbol: &str) -> Result<Watchlist> {
        let response: WatchlistResponse = self
            .inner
            .delete(&format!("/watchlists/{}/symbols/{}", id, symbol))
            .await?;
        Ok(response.watchlist)
    }
}
