//! Accounts service for profile, balance, position, and history operations.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::serde_util::one_or_many;
use crate::models::{
    AccountId, Balances, ClosedPosition, GainLossQuery, HistoryEvent, HistoryQuery, Position,
    UserProfile,
};
use crate::Result;

/// Service for account-related operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// // Get the user profile with all linked accounts
/// let profile = client.accounts().profile().await?;
/// for account in &profile.account {
///     println!("Account: {}", account.account_number);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountsService {
    inner: Arc<ClientInner>,
}

impl AccountsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the authenticated user's profile.
    ///
    /// Returns the user's identity and every account the token can see.
    pub async fn profile(&self) -> Result<UserProfile> {
        #[derive(serde::Deserialize)]
        struct Response {
            profile: UserProfile,
        }

        let response: Response = self.inner.get("/user/profile").await?;
        Ok(response.profile)
    }

    /// Get the balance snapshot for an account.
    pub async fn balances(&self, account: &AccountId) -> Result<Balances> {
        #[derive(serde::Deserialize)]
        struct Response {
            balances: Balances,
        }

        let response: Response = self
            .inner
            .get(&format!("/accounts/{}/balances", account))
            .await?;
        Ok(response.balances)
    }

    /// Get the open positions in an account.
    ///
    /// Returns an empty list when the account holds nothing; the API
    /// spells that as a `"null"` wrapper.
    pub async fn positions(&self, account: &AccountId) -> Result<Vec<Position>> {
        #[derive(serde::Deserialize)]
        struct Response {
            positions: Option<PositionsList>,
        }

        #[derive(serde::Deserialize)]
        struct PositionsList {
            #[serde(default, with = "one_or_many")]
            position: Vec<Position>,
        }

        let response: Response = self
            .inner
            .get(&format!("/accounts/{}/positions", account))
            .await?;
        Ok(response
            .positions
            .map(|list| list.position)
            .unwrap_or_default())
    }

    /// Get account activity history, optionally filtered and paged.
    pub async fn history(
        &self,
        account: &AccountId,
        query: Option<HistoryQuery>,
    ) -> Result<Vec<HistoryEvent>> {
        #[derive(serde::Deserialize)]
        struct Response {
            history: Option<EventList>,
        }

        #[derive(serde::Deserialize)]
        struct EventList {
            #[serde(default, with = "one_or_many")]
            event: Vec<HistoryEvent>,
        }

        let path = format!("/accounts/{}/history", account);
        let response: Response = match query {
            Some(q) => self.inner.get_with_query(&path, &q).await?,
            None => self.inner.get(&path).await?,
        };
        Ok(response.history.map(|list| list.event).unwrap_or_default())
    }

    /// Get realized gain/loss for closed positions.
    pub async fn gain_loss(
        &self,
        account: &AccountId,
        query: Option<GainLossQuery>,
    ) -> Result<Vec<ClosedPosition>> {
        #[derive(serde::Deserialize)]
        struct Response {
            gainloss: Option<ClosedList>,
        }

        #[derive(serde::Deserialize)]
        struct ClosedList {
            #[serde(default, with = "one_or_many")]
            closed_position: Vec<ClosedPosition>,
        }

        let path = format!("/accounts/{}/gainloss", account);
        let response: Response = match query {
            Some(q) => self.inner.get_with_query(&path, &q).await?,
            None => self.inner.get(&path).await?,
        };
        Ok(response
            .gainloss
            .map(|list| list.closed_position)
            .unwrap_or_default())
    }
}
