//! Account, balance, position, and account-history models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{AccountClassification, AccountStatus, AccountType, HistoryEventKind};
use super::serde_util::one_or_many;

/// The authenticated user's profile, including every account the token can
/// see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Tradier user ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Accounts linked to this user (bare object when there is only one)
    #[serde(default, with = "one_or_many")]
    pub account: Vec<Account>,
}

/// A single brokerage account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account number
    pub account_number: String,
    /// Regulatory classification
    #[serde(default)]
    pub classification: Option<AccountClassification>,
    /// When the account was opened
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    /// Pattern day trader flag
    #[serde(default)]
    pub day_trader: bool,
    /// Approved option trading level (0-5)
    #[serde(default)]
    pub option_level: Option<u8>,
    /// Account lifecycle status
    #[serde(default)]
    pub status: Option<AccountStatus>,
    /// Cash/margin/PDT
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Last account update
    #[serde(default)]
    pub last_update_date: Option<DateTime<Utc>>,
}

/// Balance snapshot for an account.
///
/// Exactly one of [`margin`](Self::margin), [`cash`](Self::cash), or
/// [`pdt`](Self::pdt) is populated, matching the account type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balances {
    /// Account number
    pub account_number: String,
    /// Cash/margin/PDT
    #[serde(default)]
    pub account_type: Option<AccountType>,
    /// Total account equity
    #[serde(default)]
    pub total_equity: Option<Decimal>,
    /// Total cash balance
    #[serde(default)]
    pub total_cash: Option<Decimal>,
    /// Cash not yet cleared
    #[serde(default)]
    pub uncleared_funds: Option<Decimal>,
    /// Cash pending settlement
    #[serde(default)]
    pub pending_cash: Option<Decimal>,
    /// Market value of long positions
    #[serde(default)]
    pub long_market_value: Option<Decimal>,
    /// Market value of short positions
    #[serde(default)]
    pub short_market_value: Option<Decimal>,
    /// Combined market value
    #[serde(default)]
    pub market_value: Option<Decimal>,
    /// Realized profit/loss for the day
    #[serde(default)]
    pub close_pl: Option<Decimal>,
    /// Unrealized profit/loss
    #[serde(default)]
    pub open_pl: Option<Decimal>,
    /// Current margin requirement
    #[serde(default)]
    pub current_requirement: Option<Decimal>,
    /// Account equity excluding unsettled activity
    #[serde(default)]
    pub equity: Option<Decimal>,
    /// Value of long stock positions
    #[serde(default)]
    pub stock_long_value: Option<Decimal>,
    /// Value of short stock positions
    #[serde(default)]
    pub stock_short_value: Option<Decimal>,
    /// Value of long option positions
    #[serde(default)]
    pub option_long_value: Option<Decimal>,
    /// Value of short option positions
    #[serde(default)]
    pub option_short_value: Option<Decimal>,
    /// Option margin requirement
    #[serde(default)]
    pub option_requirement: Option<Decimal>,
    /// Number of orders awaiting execution
    #[serde(default)]
    pub pending_orders_count: Option<i64>,
    /// Margin-account figures
    #[serde(default)]
    pub margin: Option<MarginBalances>,
    /// Cash-account figures
    #[serde(default)]
    pub cash: Option<CashBalances>,
    /// Pattern-day-trader figures
    #[serde(default)]
    pub pdt: Option<PdtBalances>,
}

/// Margin-account specific balance figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginBalances {
    /// Outstanding federal call amount
    #[serde(default)]
    pub fed_call: Option<Decimal>,
    /// Outstanding maintenance call amount
    #[serde(default)]
    pub maintenance_call: Option<Decimal>,
    /// Buying power for options
    #[serde(default)]
    pub option_buying_power: Option<Decimal>,
    /// Buying power for stocks
    #[serde(default)]
    pub stock_buying_power: Option<Decimal>,
    /// Value of shorted stock
    #[serde(default)]
    pub stock_short_value: Option<Decimal>,
    /// Sweep balance
    #[serde(default)]
    pub sweep: Option<Decimal>,
}

/// Cash-account specific balance figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashBalances {
    /// Settled cash available for trading
    #[serde(default)]
    pub cash_available: Option<Decimal>,
    /// Sweep balance
    #[serde(default)]
    pub sweep: Option<Decimal>,
    /// Funds from unsettled trades
    #[serde(default)]
    pub unsettled_funds: Option<Decimal>,
}

/// Pattern-day-trader specific balance figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdtBalances {
    /// Outstanding federal call amount
    #[serde(default)]
    pub fed_call: Option<Decimal>,
    /// Outstanding maintenance call amount
    #[serde(default)]
    pub maintenance_call: Option<Decimal>,
    /// Buying power for options
    #[serde(default)]
    pub option_buying_power: Option<Decimal>,
    /// Buying power for stocks
    #[serde(default)]
    pub stock_buying_power: Option<Decimal>,
    /// Intraday buying power
    #[serde(default)]
    pub day_trade_buying_power: Option<Decimal>,
    /// Value of shorted stock
    #[serde(default)]
    pub stock_short_value: Option<Decimal>,
}

/// An open position in an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Position ID
    pub id: i64,
    /// Trading symbol
    pub symbol: String,
    /// Signed quantity (negative for short)
    pub quantity: Decimal,
    /// Total cost basis
    pub cost_basis: Decimal,
    /// When the position was opened
    pub date_acquired: DateTime<Utc>,
}

impl Position {
    /// Returns `true` if this is a short position.
    pub fn is_short(&self) -> bool {
        self.quantity < Decimal::ZERO
    }

    /// Average cost per unit, if the quantity is non-zero.
    pub fn average_cost(&self) -> Option<Decimal> {
        if self.quantity == Decimal::ZERO {
            None
        } else {
            Some(self.cost_basis / self.quantity)
        }
    }
}

/// A single account activity event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Net cash amount of the event
    pub amount: Decimal,
    /// When the event occurred
    pub date: DateTime<Utc>,
    /// Event category
    #[serde(rename = "type")]
    pub kind: HistoryEventKind,
    /// Trade details, for trade events
    #[serde(default)]
    pub trade: Option<TradeActivity>,
    /// Option event details
    #[serde(default)]
    pub option: Option<OptionActivity>,
    /// Journal entry details
    #[serde(default)]
    pub journal: Option<JournalActivity>,
    /// Adjustment details
    #[serde(default)]
    pub adjustment: Option<AdjustmentActivity>,
}

/// Details of a trade history event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeActivity {
    /// Commission charged
    #[serde(default)]
    pub commission: Option<Decimal>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Execution price
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Executed quantity
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Trading symbol
    #[serde(default)]
    pub symbol: Option<String>,
    /// Equity or option
    #[serde(default)]
    pub trade_type: Option<String>,
}

/// Details of an option expiration/assignment/exercise event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionActivity {
    /// Event subtype (expiration, assignment, exercise)
    #[serde(default)]
    pub option_type: Option<String>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Affected quantity
    #[serde(default)]
    pub quantity: Option<Decimal>,
}

/// Details of a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalActivity {
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Affected quantity
    #[serde(default)]
    pub quantity: Option<Decimal>,
}

/// Details of a balance adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentActivity {
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Affected quantity
    #[serde(default)]
    pub quantity: Option<Decimal>,
}

/// A closed position with realized gain/loss figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedPosition {
    /// When the position was closed
    pub close_date: DateTime<Utc>,
    /// Total cost of the position
    pub cost: Decimal,
    /// Realized gain or loss
    pub gain_loss: Decimal,
    /// Realized gain or loss as a percentage of cost
    #[serde(default)]
    pub gain_loss_percent: Option<Decimal>,
    /// When the position was opened
    pub open_date: DateTime<Utc>,
    /// Proceeds from closing
    pub proceeds: Decimal,
    /// Quantity closed
    pub quantity: Decimal,
    /// Trading symbol
    pub symbol: String,
    /// Holding period in days
    #[serde(default)]
    pub term: Option<i64>,
}

impl ClosedPosition {
    /// Returns `true` if the holding period qualifies as long-term
    /// (more than 365 days).
    pub fn is_long_term(&self) -> bool {
        self.term.map(|days| days > 365).unwrap_or(false)
    }
}

/// Query parameters for account history.
#[derive(Debug, Default, Clone, Serialize)]
pub struct HistoryQuery {
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Results per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Filter by event category
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<HistoryEventKind>,
    /// Events on or after this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    /// Events on or before this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    /// Filter by symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Query parameters for realized gain/loss.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GainLossQuery {
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Results per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Sort field (`openDate` or `closeDate`)
    #[serde(rename = "sortBy", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction (`asc` or `desc`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Positions closed on or after this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    /// Positions closed on or before this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    /// Filter by symbol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profile_single_account_normalizes_to_vec() {
        let json = r#"{
            "id": "id-gcostanza",
            "name": "George Costanza",
            "account": {
                "account_number": "VA000001",
                "day_trader": false,
                "option_level": 6,
                "type": "margin",
                "classification": "individual"
            }
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.account.len(), 1);
        assert_eq!(profile.account[0].account_number, "VA000001");
        assert_eq!(profile.account[0].account_type, AccountType::Margin);
    }

    #[test]
    fn test_profile_multiple_accounts() {
        let json = r#"{
            "id": "id-gcostanza",
            "name": "George Costanza",
            "account": [
                {"account_number": "VA000001", "type": "margin"},
                {"account_number": "VA000002", "type": "cash"}
            ]
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.account.len(), 2);
        assert_eq!(profile.account[1].account_type, AccountType::Cash);
    }

    #[test]
    fn test_balances_margin_section() {
        let json = r#"{
            "account_number": "VA000001",
            "account_type": "margin",
            "total_equity": 17798.36,
            "total_cash": 14498.36,
            "open_pl": -4813.1,
            "margin": {
                "fed_call": 0,
                "maintenance_call": 0,
                "option_buying_power": 6363.86,
                "stock_buying_power": 12727.72,
                "stock_short_value": 0,
                "sweep": 0
            }
        }"#;

        let balances: Balances = serde_json::from_str(json).unwrap();
        assert_eq!(balances.total_equity, Some(dec!(17798.36)));
        let margin = balances.margin.unwrap();
        assert_eq!(margin.stock_buying_power, Some(dec!(12727.72)));
        assert!(balances.cash.is_none());
    }

    #[test]
    fn test_position_helpers() {
        let pos = Position {
            id: 123458,
            symbol: "F".to_string(),
            quantity: dec!(100),
            cost_basis: dec!(1024.0),
            date_acquired: "2018-08-08T14:42:00.774Z".parse().unwrap(),
        };
        assert!(!pos.is_short());
        assert_eq!(pos.average_cost(), Some(dec!(10.24)));
    }

    #[test]
    fn test_history_event_trade_payload() {
        let json = r#"{
            "amount": -3000.00,
            "date": "2018-05-23T00:00:00Z",
            "type": "trade",
            "trade": {
                "commission": 0.0,
                "description": "Sold 1 AAPL Jun 21 185 Put",
                "price": 185.0,
                "quantity": -1.0,
                "symbol": "AAPL180621P00185000",
                "trade_type": "Option"
            }
        }"#;

        let event: HistoryEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, HistoryEventKind::Trade);
        let trade = event.trade.unwrap();
        assert_eq!(trade.symbol.as_deref(), Some("AAPL180621P00185000"));
        assert!(event.journal.is_none());
    }

    #[test]
    fn test_closed_position_term() {
        let json = r#"{
            "close_date": "2018-10-31T00:00:00.000Z",
            "cost": 913.95,
            "gain_loss": 6.05,
            "gain_loss_percent": 0.662,
            "open_date": "2018-06-19T00:00:00.000Z",
            "proceeds": 920.0,
            "quantity": 100.0,
            "symbol": "SNAP",
            "term": 134
        }"#;

        let closed: ClosedPosition = serde_json::from_str(json).unwrap();
        assert!(!closed.is_long_term());
        assert_eq!(closed.gain_loss, dec!(6.05));
    }
}
