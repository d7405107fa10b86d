//! Enumeration types for the Tradier API.
//!
//! This module contains all the enum types used throughout the API,
//! including order classes, sides, durations, statuses, and more.
//! Tradier serializes its enums as lowercase/snake_case strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The class of an order, which determines its required parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderClass {
    /// Single-leg equity order
    #[default]
    Equity,
    /// Single-leg option order
    Option,
    /// Multi-leg option order (up to 4 legs)
    Multileg,
    /// Combined equity and option legs
    Combo,
    /// One-triggers-other
    Oto,
    /// One-cancels-other
    Oco,
    /// One-triggers-one-cancels-other
    Otoco,
}

impl OrderClass {
    /// Returns `true` if this class carries its legs as indexed parameters.
    pub fn is_multi_leg(&self) -> bool {
        !matches!(self, OrderClass::Equity | OrderClass::Option)
    }

    /// Returns `true` if each leg carries its own order type and duration.
    pub fn legs_carry_ticket(&self) -> bool {
        matches!(self, OrderClass::Oto | OrderClass::Oco | OrderClass::Otoco)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OrderClass::Equity => "equity",
            OrderClass::Option => "option",
            OrderClass::Multileg => "multileg",
            OrderClass::Combo => "combo",
            OrderClass::Oto => "oto",
            OrderClass::Oco => "oco",
            OrderClass::Otoco => "otoco",
        }
    }
}

/// Side of an order leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    /// Buy equity
    Buy,
    /// Buy equity to cover a short position
    BuyToCover,
    /// Sell equity
    Sell,
    /// Sell equity short
    SellShort,
    /// Buy to open an option position
    BuyToOpen,
    /// Buy to close a short option position
    BuyToClose,
    /// Sell to open a short option position
    SellToOpen,
    /// Sell to close a long option position
    SellToClose,
}

impl OrderSide {
    /// Returns `true` if this is a buy-side action.
    pub fn is_buy(&self) -> bool {
        matches!(
            self,
            OrderSide::Buy | OrderSide::BuyToCover | OrderSide::BuyToOpen | OrderSide::BuyToClose
        )
    }

    /// Returns `true` if this is a sell-side action.
    pub fn is_sell(&self) -> bool {
        !self.is_buy()
    }

    /// Returns `true` if this side is valid for an option leg.
    pub fn is_option_side(&self) -> bool {
        matches!(
            self,
            OrderSide::BuyToOpen
                | OrderSide::BuyToClose
                | OrderSide::SellToOpen
                | OrderSide::SellToClose
        )
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::BuyToCover => "buy_to_cover",
            OrderSide::Sell => "sell",
            OrderSide::SellShort => "sell_short",
            OrderSide::BuyToOpen => "buy_to_open",
            OrderSide::BuyToClose => "buy_to_close",
            OrderSide::SellToOpen => "sell_to_open",
            OrderSide::SellToClose => "sell_to_close",
        }
    }
}

/// Order type specifying how the order should be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Market order - execute immediately at current market price
    Market,
    /// Limit order - execute at specified price or better
    Limit,
    /// Stop order - becomes market order when stop price is reached
    Stop,
    /// Stop limit - becomes limit order when stop price is reached
    StopLimit,
    /// Net debit (multi-leg)
    Debit,
    /// Net credit (multi-leg)
    Credit,
    /// Even money (multi-leg)
    Even,
}

impl OrderType {
    /// Returns `true` if this order type requires a limit price.
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            OrderType::Limit | OrderType::StopLimit | OrderType::Debit | OrderType::Credit
        )
    }

    /// Returns `true` if this order type requires a stop price.
    pub fn requires_stop(&self) -> bool {
        matches!(self, OrderType::Stop | OrderType::StopLimit)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Stop => "stop",
            OrderType::StopLimit => "stop_limit",
            OrderType::Debit => "debit",
            OrderType::Credit => "credit",
            OrderType::Even => "even",
        }
    }
}

/// Time in force specification for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderDuration {
    /// Day order - expires at end of trading day
    #[default]
    Day,
    /// Good till cancelled - remains active until filled or cancelled
    Gtc,
    /// Pre-market session only
    Pre,
    /// Post-market session only
    Post,
}

impl OrderDuration {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OrderDuration::Day => "day",
            OrderDuration::Gtc => "gtc",
            OrderDuration::Pre => "pre",
            OrderDuration::Post => "post",
        }
    }
}

/// Current status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order is live and working
    Open,
    /// Order partially filled
    PartiallyFilled,
    /// Order completely filled
    Filled,
    /// Order expired
    Expired,
    /// Order cancelled
    Canceled,
    /// Order received but not yet working
    Pending,
    /// Order rejected
    Rejected,
    /// Order failed with an error
    Error,
    /// Acknowledgement status returned by place/modify/cancel calls
    Ok,
    /// Order held pending review
    Held,
    /// Unknown status (forward-compatibility)
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Returns `true` if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::Expired
                | OrderStatus::Canceled
                | OrderStatus::Rejected
                | OrderStatus::Error
        )
    }

    /// Returns `true` if the order is still working.
    pub fn is_working(&self) -> bool {
        matches!(
            self,
            OrderStatus::Open
                | OrderStatus::PartiallyFilled
                | OrderStatus::Pending
                | OrderStatus::Held
        )
    }
}

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option
    Call,
    /// Put option
    Put,
}

impl OptionType {
    /// Returns `true` if this is a call option.
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns `true` if this is a put option.
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }
}

/// Brokerage account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Cash account
    Cash,
    /// Margin account
    Margin,
    /// Pattern day trader account
    Pdt,
}

/// Lifecycle status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account is open for trading
    Active,
    /// Account has been closed
    Closed,
}

/// Regulatory classification of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClassification {
    /// Individual account
    Individual,
    /// Joint account
    Joint,
    /// Entity (corporate) account
    Entity,
    /// Traditional IRA
    TraditionalIra,
    /// Roth IRA
    RothIra,
    /// Rollover IRA
    RolloverIra,
    /// Unknown classification (forward-compatibility)
    #[serde(other)]
    Unknown,
}

/// Current state of the equity market session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketState {
    /// Pre-market session
    Premarket,
    /// Regular session
    Open,
    /// Post-market session
    Postmarket,
    /// Market closed
    Closed,
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketState::Premarket => write!(f, "premarket"),
            MarketState::Open => write!(f, "open"),
            MarketState::Postmarket => write!(f, "postmarket"),
            MarketState::Closed => write!(f, "closed"),
        }
    }
}

/// Whether a trading day is a session day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketDayStatus {
    /// Full or partial trading session
    Open,
    /// No session (weekend/holiday)
    Closed,
}

/// Type of a security returned by search/lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    /// Common stock
    Stock,
    /// Option contract
    Option,
    /// Exchange-traded fund
    Etf,
    /// Index
    Index,
    /// Mutual fund
    #[serde(rename = "mutual_fund")]
    MutualFund,
    /// Unknown security type (forward-compatibility)
    #[serde(other)]
    Unknown,
}

/// Category of an account history event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryEventKind {
    /// Trade execution
    Trade,
    /// Option event (expiration/assignment/exercise)
    Option,
    /// ACH transfer
    Ach,
    /// Wire transfer
    Wire,
    /// Dividend payment
    Dividend,
    /// Fee charged
    Fee,
    /// Tax withholding
    Tax,
    /// Journal entry
    Journal,
    /// Check deposit
    Check,
    /// Internal transfer
    Transfer,
    /// Balance adjustment
    Adjustment,
    /// Interest payment
    Interest,
    /// Other event type (forward-compatibility)
    #[serde(other)]
    Other,
}

/// Bar interval for historical pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoricalInterval {
    /// One bar per trading day
    #[default]
    Daily,
    /// One bar per week
    Weekly,
    /// One bar per month
    Monthly,
}

/// Aggregation interval for intraday time and sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimesalesInterval {
    /// Raw ticks
    #[serde(rename = "tick")]
    Tick,
    /// One-minute bars
    #[serde(rename = "1min")]
    #[default]
    OneMinute,
    /// Five-minute bars
    #[serde(rename = "5min")]
    FiveMinute,
    /// Fifteen-minute bars
    #[serde(rename = "15min")]
    FifteenMinute,
}

/// Session filter for time and sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionFilter {
    /// All sessions, including extended hours
    #[default]
    All,
    /// Regular session only
    Open,
}

/// Expiration cycle of an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationType {
    /// Standard monthly expiration
    Standard,
    /// Weekly expiration
    Weeklys,
    /// Quarterly expiration
    Quarterlys,
    /// End-of-month expiration
    #[serde(rename = "endofmonth")]
    EndOfMonth,
    /// Unknown expiration cycle (forward-compatibility)
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_class_predicates() {
        assert!(!OrderClass::Equity.is_multi_leg());
        assert!(OrderClass::Multileg.is_multi_leg());
        assert!(OrderClass::Oco.legs_carry_ticket());
        assert!(!OrderClass::Multileg.legs_carry_ticket());
    }

    #[test]
    fn test_order_side_buy_sell() {
        assert!(OrderSide::Buy.is_buy());
        assert!(OrderSide::BuyToOpen.is_buy());
        assert!(OrderSide::SellShort.is_sell());
        assert!(OrderSide::SellToClose.is_option_side());
        assert!(!OrderSide::Buy.is_option_side());
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
        assert!(!OrderStatus::Open.is_terminal());
        assert!(OrderStatus::PartiallyFilled.is_working());
    }

    #[test]
    fn test_order_status_forward_compat() {
        let parsed: OrderStatus = serde_json::from_str("\"calculated\"").unwrap();
        assert_eq!(parsed, OrderStatus::Unknown);
    }

    #[test]
    fn test_serde_names_match_wire() {
        assert_eq!(
            serde_json::to_string(&OrderSide::SellToOpen).unwrap(),
            "\"sell_to_open\""
        );
        assert_eq!(
            serde_json::to_string(&OrderType::StopLimit).unwrap(),
            "\"stop_limit\""
        );
        assert_eq!(
            serde_json::to_string(&TimesalesInterval::FiveMinute).unwrap(),
            "\"5min\""
        );

        let parsed: OrderDuration = serde_json::from_str("\"gtc\"").unwrap();
        assert_eq!(parsed, OrderDuration::Gtc);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for side in [
            OrderSide::Buy,
            OrderSide::BuyToCover,
            OrderSide::Sell,
            OrderSide::SellShort,
            OrderSide::BuyToOpen,
            OrderSide::BuyToClose,
            OrderSide::SellToOpen,
            OrderSide::SellToClose,
        ] {
            let json = serde_json::to_string(&side).unwrap();
            assert_eq!(json, format!("\"{}\"", side.as_str()));
        }
    }
}
