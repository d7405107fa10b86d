//! Option chain, expiration, and strike models, plus OCC symbology.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{ExpirationType, OptionType};
use super::market::Greeks;
use super::serde_util::one_or_many;

/// A single contract from an option chain.
///
/// Chains carry the same pricing fields as snapshot quotes plus the
/// contract terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContract {
    /// OCC option symbol
    pub symbol: String,
    /// Contract description
    #[serde(default)]
    pub description: Option<String>,
    /// Underlying symbol
    #[serde(default)]
    pub underlying: Option<String>,
    /// Strike price
    pub strike: Decimal,
    /// Expiration date
    pub expiration_date: NaiveDate,
    /// Expiration cycle
    #[serde(default)]
    pub expiration_type: Option<ExpirationType>,
    /// Call or put
    pub option_type: OptionType,
    /// Option root symbol
    #[serde(default)]
    pub root_symbol: Option<String>,
    /// Contract size (usually 100)
    #[serde(default)]
    pub contract_size: Option<i64>,
    /// Last trade price
    #[serde(default)]
    pub last: Option<Decimal>,
    /// Net change from previous close
    #[serde(default)]
    pub change: Option<Decimal>,
    /// Today's volume
    #[serde(default)]
    pub volume: Option<i64>,
    /// Best bid
    #[serde(default)]
    pub bid: Option<Decimal>,
    /// Best bid size
    #[serde(default)]
    pub bidsize: Option<i64>,
    /// Best ask
    #[serde(default)]
    pub ask: Option<Decimal>,
    /// Best ask size
    #[serde(default)]
    pub asksize: Option<i64>,
    /// Open interest
    #[serde(default)]
    pub open_interest: Option<i64>,
    /// Greeks and volatility block (when requested)
    #[serde(default)]
    pub greeks: Option<Greeks>,
}

impl OptionContract {
    /// Returns `true` if the contract is in the money relative to the
    /// given underlying price.
    pub fn is_itm(&self, underlying_price: Decimal) -> bool {
        match self.option_type {
            OptionType::Call => underlying_price > self.strike,
            OptionType::Put => underlying_price < self.strike,
        }
    }

    /// Midpoint of the bid-ask spread.
    pub fn mid(&self) -> Option<Decimal> {
        match (self.ask, self.bid) {
            (Some(ask), Some(bid)) => Some((ask + bid) / Decimal::TWO),
            _ => None,
        }
    }
}

/// An expiration date with its strike prices, from the detailed
/// expirations endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expiration {
    /// Expiration date
    pub date: NaiveDate,
    /// Contract size (usually 100)
    #[serde(default)]
    pub contract_size: Option<i64>,
    /// Expiration cycle
    #[serde(default)]
    pub expiration_type: Option<ExpirationType>,
    /// Strike prices trading for this expiration
    #[serde(default)]
    pub strikes: Option<StrikeList>,
}

/// Wrapper for a strike price list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrikeList {
    /// Strike prices
    #[serde(default, with = "one_or_many")]
    pub strike: Vec<Decimal>,
}

/// The components of an OCC option symbol.
///
/// Tradier identifies contracts by the unpadded OCC form: root, `YYMMDD`
/// expiration, `C`/`P`, and the strike times 1000 as eight digits
/// (`SPY190614C00240000`).
///
/// # Example
///
/// ```
/// use tradier_rs::models::{OccSymbol, OptionType};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let occ = OccSymbol::new(
///     "SPY",
///     NaiveDate::from_ymd_opt(2019, 6, 14).unwrap(),
///     OptionType::Call,
///     dec!(240),
/// );
/// assert_eq!(occ.to_string(), "SPY190614C00240000");
/// assert_eq!(OccSymbol::parse("SPY190614C00240000"), Some(occ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccSymbol {
    /// Option root (usually the underlying symbol)
    pub underlying: String,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Call or put
    pub option_type: OptionType,
    /// Strike price
    pub strike: Decimal,
}

impl OccSymbol {
    /// Assemble an OCC symbol from its components.
    pub fn new(
        underlying: impl Into<String>,
        expiration: NaiveDate,
        option_type: OptionType,
        strike: Decimal,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            expiration,
            option_type,
            strike,
        }
    }

    /// Parse an OCC symbol.
    ///
    /// Tolerates the space-padded variant some feeds emit
    /// (`"AAPL  240119C00185000"`). Returns `None` when the input does not
    /// decode as root + `YYMMDD` + `C`/`P` + eight strike digits.
    pub fn parse(symbol: &str) -> Option<Self> {
        let normalized: String = symbol
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        // root (>= 1 char) + 6 date digits + type char + 8 strike digits
        if normalized.len() < 16 || !normalized.is_ascii() {
            return None;
        }

        let (head, strike_raw) = normalized.split_at(normalized.len() - 8);
        let (head, type_char) = head.split_at(head.len() - 1);
        let (underlying, date_raw) = head.split_at(head.len() - 6);

        if underlying.is_empty() || !date_raw.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let option_type = match type_char {
            "C" => OptionType::Call,
            "P" => OptionType::Put,
            _ => return None,
        };

        let yy: i32 = date_raw[0..2].parse().ok()?;
        let mm: u32 = date_raw[2..4].parse().ok()?;
        let dd: u32 = date_raw[4..6].parse().ok()?;
        let expiration = NaiveDate::from_ymd_opt(2000 + yy, mm, dd)?;

        // Strike is in mills: 00240000 -> 240.000
        let strike = Decimal::new(strike_raw.parse::<i64>().ok()?, 3).normalize();

        Some(Self {
            underlying: underlying.to_string(),
            expiration,
            option_type,
            strike,
        })
    }
}

impl fmt::Display for OccSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mills = (self.strike * Decimal::from(1000))
            .round()
            .to_u64()
            .unwrap_or(0);
        write!(
            f,
            "{}{:02}{:02}{:02}{}{:08}",
            self.underlying.to_uppercase(),
            self.expiration.year() % 100,
            self.expiration.month(),
            self.expiration.day(),
            match self.option_type {
                OptionType::Call => 'C',
                OptionType::Put => 'P',
            },
            mills
        )
    }
}

/// An option root with the symbols trading under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionRoot {
    /// Root symbol (e.g. "SPY")
    #[serde(rename = "rootSymbol")]
    pub root_symbol: String,
    /// OCC option symbols under this root
    #[serde(default)]
    pub options: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_chain_contract_fixture() {
        let json = r#"{
            "symbol": "SPY190614C00240000",
            "description": "SPY Jun 14 2019 $240.00 Call",
            "underlying": "SPY",
            "strike": 240.0,
            "expiration_date": "2019-06-14",
            "expiration_type": "weeklys",
            "option_type": "call",
            "root_symbol": "SPY",
            "contract_size": 100,
            "last": 42.01,
            "bid": 44.18,
            "bidsize": 50,
            "ask": 44.6,
            "asksize": 58,
            "volume": 0,
            "open_interest": 0
        }"#;

        let contract: OptionContract = serde_json::from_str(json).unwrap();
        assert_eq!(contract.option_type, OptionType::Call);
        assert!(contract.is_itm(dec!(284.0)));
        assert!(!contract.is_itm(dec!(239.0)));
        assert_eq!(contract.mid(), Some(dec!(44.39)));
    }

    #[test]
    fn test_expiration_with_strikes() {
        let json = r#"{
            "date": "2019-05-17",
            "contract_size": 100,
            "expiration_type": "standard",
            "strikes": {"strike": [222.0, 225.0, 230.0]}
        }"#;

        let exp: Expiration = serde_json::from_str(json).unwrap();
        assert_eq!(exp.expiration_type, Some(ExpirationType::Standard));
        assert_eq!(exp.strikes.unwrap().strike.len(), 3);
    }

    #[test]
    fn test_strike_list_scalar() {
        let list: StrikeList = serde_json::from_str(r#"{"strike": 250.0}"#).unwrap();
        assert_eq!(list.strike, vec![dec!(250.0)]);
    }

    #[test]
    fn test_occ_symbol_roundtrip() {
        let occ = OccSymbol::new(
            "SPY",
            NaiveDate::from_ymd_opt(2019, 6, 14).unwrap(),
            OptionType::Call,
            dec!(240),
        );
        assert_eq!(occ.to_string(), "SPY190614C00240000");
        assert_eq!(OccSymbol::parse("SPY190614C00240000"), Some(occ));
    }

    #[test]
    fn test_occ_symbol_fractional_strike() {
        let occ = OccSymbol::new(
            "F",
            NaiveDate::from_ymd_opt(2024, 1, 19).unwrap(),
            OptionType::Put,
            dec!(12.5),
        );
        assert_eq!(occ.to_string(), "F240119P00012500");

        let parsed = OccSymbol::parse("F240119P00012500").unwrap();
        assert_eq!(parsed.strike, dec!(12.5));
        assert_eq!(parsed.option_type, OptionType::Put);
    }

    #[test]
    fn test_occ_symbol_parse_padded_form() {
        let parsed = OccSymbol::parse("AAPL  240119C00185000").unwrap();
        assert_eq!(parsed.underlying, "AAPL");
        assert_eq!(
            parsed.expiration,
            NaiveDate::from_ymd_opt(2024, 1, 19).unwrap()
        );
        assert_eq!(parsed.strike, dec!(185));
    }

    #[test]
    fn test_occ_symbol_parse_rejects_malformed() {
        assert!(OccSymbol::parse("AAPL").is_none());
        assert!(OccSymbol::parse("AAPL240119X00185000").is_none());
        assert!(OccSymbol::parse("240119C00185000").is_none());
        assert!(OccSymbol::parse("AAPL241340C00185000").is_none());
    }

    #[test]
    fn test_option_root_camel_case_key() {
        let json = r#"{"rootSymbol": "SPY", "options": ["SPY190614C00240000"]}"#;
        let root: OptionRoot = serde_json::from_str(json).unwrap();
        assert_eq!(root.root_symbol, "SPY");
        assert_eq!(root.options.len(), 1);
    }
}
