//! Order models for placing and managing trades.
//!
//! Tradier takes order tickets as form-encoded parameters rather than JSON;
//! [`OrderRequest::params`] produces the key/value pairs, expanding legs to
//! the indexed keys (`option_symbol[0]`, `side[0]`, ...) the API expects.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderClass, OrderDuration, OrderSide, OrderStatus, OrderType};
use super::serde_util::one_or_many;
use crate::{Error, Result};

/// A new order to be submitted.
///
/// Use [`OrderRequestBuilder`] for a convenient way to construct orders.
///
/// # Example
///
/// ```
/// use tradier_rs::models::{OrderRequestBuilder, OrderSide, OrderType, OrderDuration};
/// use rust_decimal_macros::dec;
///
/// let order = OrderRequestBuilder::equity("AAPL")
///     .side(OrderSide::Buy)
///     .quantity(dec!(10))
///     .order_type(OrderType::Limit)
///     .duration(OrderDuration::Day)
///     .price(dec!(150.00))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Order class (equity, option, multileg, ...)
    pub class: OrderClass,
    /// Underlying symbol
    pub symbol: Option<String>,
    /// Side (single-leg classes)
    pub side: Option<OrderSide>,
    /// Quantity (single-leg classes)
    pub quantity: Option<Decimal>,
    /// Order type
    pub order_type: Option<OrderType>,
    /// Time in force
    pub duration: OrderDuration,
    /// Limit price
    pub price: Option<Decimal>,
    /// Stop trigger price
    pub stop: Option<Decimal>,
    /// OCC option symbol (option class)
    pub option_symbol: Option<String>,
    /// Legs (multi-leg classes)
    pub legs: Vec<OrderLegRequest>,
    /// Free-form order tag (letters, numbers, and dashes)
    pub tag: Option<String>,
}

/// One leg of a multi-leg order.
///
/// For `oto`/`oco`/`otoco` classes each leg is a full ticket and carries
/// its own type, duration, and prices.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLegRequest {
    /// Side of the leg
    pub side: OrderSide,
    /// Quantity of the leg
    pub quantity: Decimal,
    /// OCC option symbol; `None` for an equity leg
    pub option_symbol: Option<String>,
    /// Equity symbol for advanced-class equity legs
    pub symbol: Option<String>,
    /// Per-leg order type (advanced classes only)
    pub order_type: Option<OrderType>,
    /// Per-leg duration (advanced classes only)
    pub duration: Option<OrderDuration>,
    /// Per-leg limit price (advanced classes only)
    pub price: Option<Decimal>,
    /// Per-leg stop price (advanced classes only)
    pub stop: Option<Decimal>,
}

impl OrderLegRequest {
    /// Create an option leg.
    pub fn option(option_symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            side,
            quantity,
            option_symbol: Some(option_symbol.into()),
            symbol: None,
            order_type: None,
            duration: None,
            price: None,
            stop: None,
        }
    }

    /// Create an equity leg (combo and advanced classes).
    pub fn equity(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            side,
            quantity,
            option_symbol: None,
            symbol: Some(symbol.into()),
            order_type: None,
            duration: None,
            price: None,
            stop: None,
        }
    }

    /// Attach a per-leg ticket (type/duration/price/stop) for the
    /// `oto`/`oco`/`otoco` classes.
    pub fn with_ticket(
        mut self,
        order_type: OrderType,
        duration: OrderDuration,
        price: Option<Decimal>,
        stop: Option<Decimal>,
    ) -> Self {
        self.order_type = Some(order_type);
        self.duration = Some(duration);
        self.price = price;
        self.stop = stop;
        self
    }
}

impl OrderRequest {
    /// Expand this request into the form parameters the API expects.
    ///
    /// Single-leg classes produce flat keys; multi-leg classes produce
    /// indexed keys per leg.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();
        params.push(("class".into(), self.class.as_str().into()));

        if let Some(symbol) = &self.symbol {
            params.push(("symbol".into(), symbol.clone()));
        }

        if self.class.legs_carry_ticket() {
            // Advanced classes: everything is per-leg and indexed.
            for (i, leg) in self.legs.iter().enumerate() {
                if let Some(symbol) = &leg.symbol {
                    params.push((format!("symbol[{}]", i), symbol.clone()));
                }
                if let Some(option_symbol) = &leg.option_symbol {
                    params.push((format!("option_symbol[{}]", i), option_symbol.clone()));
                }
                params.push((format!("side[{}]", i), leg.side.as_str().into()));
                params.push((format!("quantity[{}]", i), leg.quantity.to_string()));
                if let Some(order_type) = leg.order_type {
                    params.push((format!("type[{}]", i), order_type.as_str().into()));
                }
                if let Some(duration) = leg.duration {
                    params.push((format!("duration[{}]", i), duration.as_str().into()));
                }
                if let Some(price) = leg.price {
                    params.push((format!("price[{}]", i), price.to_string()));
                }
                if let Some(stop) = leg.stop {
                    params.push((format!("stop[{}]", i), stop.to_string()));
                }
            }
        } else if self.class.is_multi_leg() {
            // multileg/combo: one shared ticket, indexed legs.
            if let Some(order_type) = self.order_type {
                params.push(("type".into(), order_type.as_str().into()));
            }
            params.push(("duration".into(), self.duration.as_str().into()));
            if let Some(price) = self.price {
                params.push(("price".into(), price.to_string()));
            }
            for (i, leg) in self.legs.iter().enumerate() {
                if let Some(option_symbol) = &leg.option_symbol {
                    params.push((format!("option_symbol[{}]", i), option_symbol.clone()));
                }
                params.push((format!("side[{}]", i), leg.side.as_str().into()));
                params.push((format!("quantity[{}]", i), leg.quantity.to_string()));
            }
        } else {
            // equity/option: flat keys.
            if let Some(option_symbol) = &self.option_symbol {
                params.push(("option_symbol".into(), option_symbol.clone()));
            }
            if let Some(side) = self.side {
                params.push(("side".into(), side.as_str().into()));
            }
            if let Some(quantity) = self.quantity {
                params.push(("quantity".into(), quantity.to_string()));
            }
            if let Some(order_type) = self.order_type {
                params.push(("type".into(), order_type.as_str().into()));
            }
            params.push(("duration".into(), self.duration.as_str().into()));
            if let Some(price) = self.price {
                params.push(("price".into(), price.to_string()));
            }
            if let Some(stop) = self.stop {
                params.push(("stop".into(), stop.to_string()));
            }
        }

        if let Some(tag) = &self.tag {
            params.push(("tag".into(), tag.clone()));
        }

        params
    }
}

/// Builder for creating order requests with validation.
#[derive(Debug, Default, Clone)]
pub struct OrderRequestBuilder {
    class: OrderClass,
    symbol: Option<String>,
    side: Option<OrderSide>,
    quantity: Option<Decimal>,
    order_type: Option<OrderType>,
    duration: OrderDuration,
    price: Option<Decimal>,
    stop: Option<Decimal>,
    option_symbol: Option<String>,
    legs: Vec<OrderLegRequest>,
    tag: Option<String>,
}

impl OrderRequestBuilder {
    /// Start an equity order for the given symbol.
    pub fn equity(symbol: impl Into<String>) -> Self {
        Self {
            class: OrderClass::Equity,
            symbol: Some(symbol.into()),
            ..Default::default()
        }
    }

    /// Start a single-leg option order on the given underlying.
    pub fn option(underlying: impl Into<String>, option_symbol: impl Into<String>) -> Self {
        Self {
            class: OrderClass::Option,
            symbol: Some(underlying.into()),
            option_symbol: Some(option_symbol.into()),
            ..Default::default()
        }
    }

    /// Start a multi-leg option order on the given underlying.
    pub fn multileg(underlying: impl Into<String>) -> Self {
        Self {
            class: OrderClass::Multileg,
            symbol: Some(underlying.into()),
            ..Default::default()
        }
    }

    /// Start a combo (equity + option) order on the given underlying.
    pub fn combo(underlying: impl Into<String>) -> Self {
        Self {
            class: OrderClass::Combo,
            symbol: Some(underlying.into()),
            ..Default::default()
        }
    }

    /// Start an advanced order of the given class (`oto`/`oco`/`otoco`).
    pub fn advanced(class: OrderClass) -> Self {
        Self {
            class,
            ..Default::default()
        }
    }

    /// Set the side.
    pub fn side(mut self, side: OrderSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Set the quantity.
    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the order type.
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    /// Set the time in force.
    pub fn duration(mut self, duration: OrderDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the limit price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the stop trigger price.
    pub fn stop(mut self, stop: Decimal) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Add a leg (multi-leg classes).
    pub fn leg(mut self, leg: OrderLegRequest) -> Self {
        self.legs.push(leg);
        self
    }

    /// Set a free-form order tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Build the request, validating the fields required by the class.
    pub fn build(self) -> Result<OrderRequest> {
        match self.class {
            OrderClass::Equity | OrderClass::Option => {
                if self.symbol.is_none() {
                    return Err(Error::InvalidInput("symbol is required".to_string()));
                }
                let side = self
                    .side
                    .ok_or_else(|| Error::InvalidInput("side is required".to_string()))?;
                if self.quantity.is_none() {
                    return Err(Error::InvalidInput("quantity is required".to_string()));
                }
                if self.class == OrderClass::Option {
                    if self.option_symbol.is_none() {
                        return Err(Error::InvalidInput(
                            "option_symbol is required for option orders".to_string(),
                        ));
                    }
                    if !side.is_option_side() {
                        return Err(Error::InvalidInput(format!(
                            "{:?} is not a valid option side",
                            side
                        )));
                    }
                }
            }
            OrderClass::Multileg | OrderClass::Combo => {
                if self.symbol.is_none() {
                    return Err(Error::InvalidInput("symbol is required".to_string()));
                }
                if self.legs.is_empty() {
                    return Err(Error::InvalidInput(
                        "multi-leg orders require at least one leg".to_string(),
                    ));
                }
                if self.legs.len() > 4 {
                    return Err(Error::InvalidInput(
                        "multi-leg orders support at most 4 legs".to_string(),
                    ));
                }
            }
            OrderClass::Oto | OrderClass::Oco | OrderClass::Otoco => {
                let expected = match self.class {
                    OrderClass::Otoco => 3,
                    _ => 2,
                };
                if self.legs.len() != expected {
                    return Err(Error::InvalidInput(format!(
                        "{} orders require exactly {} legs",
                        self.class.as_str(),
                        expected
                    )));
                }
                for leg in &self.legs {
                    let order_type = leg.order_type.ok_or_else(|| {
                        Error::InvalidInput(
                            "each advanced-class leg requires an order type".to_string(),
                        )
                    })?;
                    if order_type.requires_price() && leg.price.is_none() {
                        return Err(Error::InvalidInput(format!(
                            "{} legs require a price",
                            order_type.as_str()
                        )));
                    }
                    if order_type.requires_stop() && leg.stop.is_none() {
                        return Err(Error::InvalidInput(format!(
                            "{} legs require a stop price",
                            order_type.as_str()
                        )));
                    }
                }
            }
        }

        // Shared-ticket validation for the non-advanced classes.
        if !self.class.legs_carry_ticket() {
            let order_type = self
                .order_type
                .ok_or_else(|| Error::InvalidInput("order type is required".to_string()))?;
            if order_type.requires_price() && self.price.is_none() {
                return Err(Error::InvalidInput(format!(
                    "{} orders require a price",
                    order_type.as_str()
                )));
            }
            if order_type.requires_stop() && self.stop.is_none() {
                return Err(Error::InvalidInput(format!(
                    "{} orders require a stop price",
                    order_type.as_str()
                )));
            }
        }

        Ok(OrderRequest {
            class: self.class,
            symbol: self.symbol,
            side: self.side,
            quantity: self.quantity,
            order_type: self.order_type,
            duration: self.duration,
            price: self.price,
            stop: self.stop,
            option_symbol: self.option_symbol,
            legs: self.legs,
            tag: self.tag,
        })
    }
}

/// Changes to apply to a working order.
#[derive(Debug, Default, Clone)]
pub struct OrderModify {
    /// New order type
    pub order_type: Option<OrderType>,
    /// New duration
    pub duration: Option<OrderDuration>,
    /// New limit price
    pub price: Option<Decimal>,
    /// New stop price
    pub stop: Option<Decimal>,
}

impl OrderModify {
    /// Expand the changes into form parameters.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(order_type) = self.order_type {
            params.push(("type".into(), order_type.as_str().into()));
        }
        if let Some(duration) = self.duration {
            params.push(("duration".into(), duration.as_str().into()));
        }
        if let Some(price) = self.price {
            params.push(("price".into(), price.to_string()));
        }
        if let Some(stop) = self.stop {
            params.push(("stop".into(), stop.to_string()));
        }
        params
    }
}

/// Acknowledgement returned by place, modify, and cancel calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAck {
    /// ID of the affected order
    pub id: u64,
    /// Acknowledgement status (`ok` on success)
    pub status: OrderStatus,
    /// Partner tracking ID, when assigned
    #[serde(default)]
    pub partner_id: Option<String>,
}

/// Cost and margin preview returned when placing with `preview=true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPreview {
    /// Preview status
    #[serde(default)]
    pub status: Option<OrderStatus>,
    /// Commission for the order
    #[serde(default)]
    pub commission: Option<Decimal>,
    /// Total cost including fees
    #[serde(default)]
    pub cost: Option<Decimal>,
    /// Regulatory and exchange fees
    #[serde(default)]
    pub fees: Option<Decimal>,
    /// Order symbol
    #[serde(default)]
    pub symbol: Option<String>,
    /// Order quantity
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Order side
    #[serde(default)]
    pub side: Option<OrderSide>,
    /// Order type
    #[serde(rename = "type", default)]
    pub order_type: Option<OrderType>,
    /// Order duration
    #[serde(default)]
    pub duration: Option<OrderDuration>,
    /// Whether the ticket passed validation
    #[serde(default)]
    pub result: Option<bool>,
    /// Principal cost excluding fees
    #[serde(default)]
    pub order_cost: Option<Decimal>,
    /// Change in margin requirement
    #[serde(default)]
    pub margin_change: Option<Decimal>,
    /// Order class
    #[serde(default)]
    pub class: Option<OrderClass>,
    /// Detected strategy (e.g. "equity", "spread")
    #[serde(default)]
    pub strategy: Option<String>,
    /// Number of day trades this order would incur
    #[serde(default)]
    pub day_trades: Option<i64>,
    /// Whether the order routes to extended hours
    #[serde(default)]
    pub extended_hours: Option<bool>,
}

/// A placed/existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID
    pub id: u64,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Trading symbol
    pub symbol: String,
    /// Side
    pub side: OrderSide,
    /// Ordered quantity
    pub quantity: Decimal,
    /// Current status
    pub status: OrderStatus,
    /// Time in force
    pub duration: OrderDuration,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Stop trigger price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Average fill price
    #[serde(default)]
    pub avg_fill_price: Option<Decimal>,
    /// Quantity executed so far
    #[serde(default)]
    pub exec_quantity: Option<Decimal>,
    /// Price of the most recent fill
    #[serde(default)]
    pub last_fill_price: Option<Decimal>,
    /// Quantity of the most recent fill
    #[serde(default)]
    pub last_fill_quantity: Option<Decimal>,
    /// Quantity still working
    #[serde(default)]
    pub remaining_quantity: Option<Decimal>,
    /// When the order was created
    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,
    /// When the order last changed
    #[serde(default)]
    pub transaction_date: Option<DateTime<Utc>>,
    /// Order class
    #[serde(default)]
    pub class: Option<OrderClass>,
    /// OCC option symbol (single-leg option orders)
    #[serde(default)]
    pub option_symbol: Option<String>,
    /// Number of legs (multi-leg orders)
    #[serde(default)]
    pub num_legs: Option<u32>,
    /// Legs of a multi-leg order
    #[serde(default, with = "one_or_many")]
    pub leg: Vec<OrderLeg>,
    /// Detected strategy (multi-leg orders)
    #[serde(default)]
    pub strategy: Option<String>,
    /// Reason the order was rejected, when it was
    #[serde(default)]
    pub reason_description: Option<String>,
    /// Order tag, when one was supplied
    #[serde(default)]
    pub tag: Option<String>,
}

impl Order {
    /// Get the order ID as a strongly-typed value.
    pub fn order_id(&self) -> super::OrderId {
        super::OrderId::new(self.id)
    }

    /// Returns `true` if the order is completely filled.
    pub fn is_filled(&self) -> bool {
        matches!(self.status, OrderStatus::Filled)
    }

    /// Returns `true` if the order is still working.
    pub fn is_working(&self) -> bool {
        self.status.is_working()
    }

    /// Fraction of the order filled so far, as a percentage.
    pub fn fill_percentage(&self) -> Option<Decimal> {
        match self.exec_quantity {
            Some(filled) if self.quantity > Decimal::ZERO => {
                Some((filled / self.quantity) * Decimal::from(100))
            }
            _ => None,
        }
    }
}

/// A leg of a placed multi-leg order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLeg {
    /// Leg ID
    pub id: u64,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Trading symbol
    pub symbol: String,
    /// Side
    pub side: OrderSide,
    /// Ordered quantity
    pub quantity: Decimal,
    /// Current status
    pub status: OrderStatus,
    /// Time in force
    pub duration: OrderDuration,
    /// Limit price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Average fill price
    #[serde(default)]
    pub avg_fill_price: Option<Decimal>,
    /// Quantity executed so far
    #[serde(default)]
    pub exec_quantity: Option<Decimal>,
    /// Quantity still working
    #[serde(default)]
    pub remaining_quantity: Option<Decimal>,
    /// OCC option symbol, for option legs
    #[serde(default)]
    pub option_symbol: Option<String>,
    /// When the leg was created
    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,
    /// When the leg last changed
    #[serde(default)]
    pub transaction_date: Option<DateTime<Utc>>,
}
