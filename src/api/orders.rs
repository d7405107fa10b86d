//! Orders service for order placement and management.

use std::sync::Arc;

use serde::Serialize;

use crate::client::ClientInner;
use crate::models::serde_util::one_or_many;
use crate::models::{AccountId, Order, OrderAck, OrderId, OrderModify, OrderPreview, OrderRequest};
use crate::Result;

/// Service for order operations.
///
/// # Example
///
/// ```no_run
/// use tradier_rs::AccountId;
/// use tradier_rs::models::{OrderRequestBuilder, OrderSide, OrderType, OrderDuration};
/// use rust_decimal_macros::dec;
///
/// # async fn example(client: tradier_rs::TradierClient) -> tradier_rs::Result<()> {
/// let account = AccountId::new("VA000001");
///
/// // Build an order
/// let order = OrderRequestBuilder::equity("AAPL")
///     .side(OrderSide::Buy)
///     .quantity(dec!(10))
///     .order_type(OrderType::Limit)
///     .duration(OrderDuration::Day)
///     .price(dec!(150.00))
///     .build()?;
///
/// // Preview first to see the cost and commission
/// let preview = client.orders().preview(&account, &order).await?;
/// println!("Cost: {:?}", preview.cost);
///
/// // Place the order
/// let ack = client.orders().place(&account, &order).await?;
/// println!("Order placed: {}", ack.id);
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the orders for an account.
    ///
    /// Returns an empty list when the account has no orders; the API
    /// spells that as a `"null"` wrapper.
    pub async fn list(&self, account: &AccountId) -> Result<Vec<Order>> {
        #[derive(Serialize)]
        struct Query {
            #[serde(rename = "includeTags")]
            include_tags: bool,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            orders: Option<OrdersList>,
        }

        #[derive(serde::Deserialize)]
        struct OrdersList {
            #[serde(default, with = "one_or_many")]
            order: Vec<Order>,
        }

        let response: Response = self
            .inner
            .get_with_query(
                &format!("/accounts/{}/orders", account),
                &Query { include_tags: true },
            )
            .await?;
        Ok(response.orders.map(|list| list.order).unwrap_or_default())
    }

    /// Get a specific order by ID.
    pub async fn get(&self, account: &AccountId, order_id: OrderId) -> Result<Order> {
        #[derive(serde::Deserialize)]
        struct Response {
            order: Order,
        }

        let response: Response = self
            .inner
            .get(&format!("/accounts/{}/orders/{}", account, order_id))
            .await?;
        Ok(response.order)
    }

    /// Place a new order.
    ///
    /// Returns an acknowledgement with the assigned order ID; fetch the
    /// order afterwards to watch its status.
    pub async fn place(&self, account: &AccountId, order: &OrderRequest) -> Result<OrderAck> {
        #[derive(serde::Deserialize)]
        struct Response {
            order: OrderAck,
        }

        let response: Response = self
            .inner
            .post_form(&format!("/accounts/{}/orders", account), &order.params())
            .await?;
        Ok(response.order)
    }

    /// Preview an order without placing it.
    ///
    /// The preview reports the cost, commission, and margin impact of the
    /// ticket. Use this for order confirmation screens.
    pub async fn preview(&self, account: &AccountId, order: &OrderRequest) -> Result<OrderPreview> {
        #[derive(serde::Deserialize)]
        struct Response {
            order: OrderPreview,
        }

        let mut params = order.params();
        params.push(("preview".to_string(), "true".to_string()));

        let response: Response = self
            .inner
            .post_form(&format!("/accounts/{}/orders", account), &params)
            .await?;
        Ok(response.order)
    }

    /// Modify a working order.
    ///
    /// Only the type, duration, and prices of an order can change; legs
    /// cannot.
    pub async fn modify(
        &self,
        account: &AccountId,
        order_id: OrderId,
        changes: &OrderModify,
    ) -> Result<OrderAck> {
        #[derive(serde::Deserialize)]
        struct Response {
            order: OrderAck,
        }

        let response: Response = self
            .inner
            .put_form(
                &format!("/accounts/{}/orders/{}", account, order_id),
                &changes.params(),
            )
            .await?;
        Ok(response.order)
    }

    /// Cancel a working order.
    pub async fn cancel(&self, account: &AccountId, order_id: OrderId) -> Result<OrderAck> {
        #[derive(serde::Deserialize)]
        struct Response {
            order: OrderAck,
        }

        let response: Response = self
            .inner
            .delete(&format!("/accounts/{}/orders/{}", account, order_id))
            .await?;
        Ok(response.order)
    }
}
