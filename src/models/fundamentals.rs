//! Fundamentals models for the beta company-data endpoints.
//!
//! The fundamentals feeds return one envelope per requested symbol, each
//! carrying a list of typed result blocks. Only the blocks with stable,
//! commonly-used shapes are fully typed; the deep vendor tables stay
//! [`serde_json::Value`] so a feed-side change cannot break deserialization
//! of the parts callers rely on.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::serde_util::one_or_many;

/// Per-symbol envelope returned by every fundamentals endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundamentalsEnvelope<T> {
    /// The symbol as requested
    pub request: String,
    /// Request type (usually "Symbol")
    #[serde(rename = "type")]
    pub kind: String,
    /// Result blocks for this symbol
    #[serde(default = "Vec::new")]
    pub results: Vec<FundamentalsItem<T>>,
    /// Error for this symbol, when the feed could not serve it
    #[serde(default)]
    pub error: Option<String>,
}

/// A single result block inside a fundamentals envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct FundamentalsItem<T> {
    /// Block type (e.g. "Company", "Stock")
    #[serde(rename = "type")]
    pub kind: String,
    /// Vendor entity ID
    #[serde(default)]
    pub id: Option<String>,
    /// The data tables of this block
    #[serde(default)]
    pub tables: Option<T>,
}

/// Tables of a company block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyTables {
    /// Company profile
    #[serde(default)]
    pub company_profile: Option<CompanyProfile>,
    /// Current sector/industry classification
    #[serde(default)]
    pub asset_classification: Option<Value>,
    /// Historical classification
    #[serde(default)]
    pub historical_asset_classification: Option<Value>,
    /// Long-form business descriptions
    #[serde(default)]
    pub long_descriptions: Option<String>,
}

/// Company profile facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Vendor company ID
    #[serde(default)]
    pub company_id: Option<String>,
    /// Average employee count
    #[serde(default)]
    pub average_employee_number: Option<i64>,
    /// Total employee count
    #[serde(default)]
    pub total_employee_number: Option<i64>,
    /// Contact email
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Whether headquarters and registered office coincide
    #[serde(default)]
    pub is_head_office_same_with_registered_office_flag: Option<bool>,
    /// Headquarters address
    #[serde(default)]
    pub headquarter: Option<CompanyAddress>,
}

/// A company address block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyAddress {
    /// Street address
    #[serde(default)]
    pub address_line1: Option<String>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// Country
    #[serde(default)]
    pub country: Option<String>,
    /// Postal code
    #[serde(default)]
    pub postal_code: Option<String>,
    /// State or province
    #[serde(default)]
    pub province: Option<String>,
    /// Main phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Company homepage
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Tables of a dividends block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendTables {
    /// Cash dividend records (bare object when there is only one)
    #[serde(default, with = "one_or_many")]
    pub cash_dividends: Vec<CashDividend>,
}

/// A single cash dividend record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashDividend {
    /// Vendor share-class ID
    #[serde(default)]
    pub share_class_id: Option<String>,
    /// Dividend type code
    #[serde(default)]
    pub dividend_type: Option<String>,
    /// Ex-dividend date
    #[serde(default)]
    pub ex_date: Option<NaiveDate>,
    /// Amount per share
    #[serde(default)]
    pub cash_amount: Option<Decimal>,
    /// Payment currency
    #[serde(default, rename = "currency_i_d")]
    pub currency_id: Option<String>,
    /// Declaration date
    #[serde(default)]
    pub declaration_date: Option<NaiveDate>,
    /// Payments per year
    #[serde(default)]
    pub frequency: Option<i32>,
    /// Payment date
    #[serde(default)]
    pub pay_date: Option<NaiveDate>,
    /// Record date
    #[serde(default)]
    pub record_date: Option<NaiveDate>,
}

/// Tables of a corporate calendar block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorporateCalendarTables {
    /// Scheduled corporate events (bare object when there is only one)
    #[serde(default, with = "one_or_many")]
    pub corporate_calendars: Vec<CorporateEvent>,
}

/// A scheduled corporate event (earnings call, shareholder meeting, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorporateEvent {
    /// Vendor company ID
    #[serde(default)]
    pub company_id: Option<String>,
    /// Event start date
    #[serde(default)]
    pub begin_date_time: Option<NaiveDate>,
    /// Event end date
    #[serde(default)]
    pub end_date_time: Option<NaiveDate>,
    /// Vendor event type code
    #[serde(default)]
    pub event_type: Option<i32>,
    /// Estimated date of the next occurrence
    #[serde(default)]
    pub estimated_date_for_next_event: Option<NaiveDate>,
    /// Event description
    #[serde(default)]
    pub event: Option<String>,
    /// Fiscal year the event reports on
    #[serde(default)]
    pub event_fiscal_year: Option<i32>,
    /// Confirmed/unconfirmed status
    #[serde(default)]
    pub event_status: Option<String>,
    /// Vendor time zone code
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Company block envelope.
pub type CompanyData = FundamentalsEnvelope<CompanyTables>;
/// Dividends block envelope.
pub type DividendsData = FundamentalsEnvelope<DividendTables>;
/// Corporate calendar block envelope.
pub type CorporateCalendarData = FundamentalsEnvelope<CorporateCalendarTables>;
/// Untyped envelope for the ratios/financials/statistics feeds.
pub type RawFundamentalsData = FundamentalsEnvelope<Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_company_envelope() {
        let json = r#"[{
            "request": "AAPL",
            "type": "Symbol",
            "results": [{
                "type": "Company",
                "id": "0C000001GB",
                "tables": {
                    "company_profile": {
                        "company_id": "0C000001GB",
                        "average_employee_number": 0,
                        "total_employee_number": 132000,
                        "contact_email": "investor_relations@apple.com",
                        "headquarter": {
                            "address_line1": "One Apple Park Way",
                            "city": "Cupertino",
                            "country": "USA",
                            "postal_code": "95014",
                            "province": "CA"
                        }
                    }
                }
            }]
        }]"#;

        let envelopes: Vec<CompanyData> = serde_json::from_str(json).unwrap();
        assert_eq!(envelopes.len(), 1);
        let profile = envelopes[0].results[0]
            .tables
            .as_ref()
            .unwrap()
            .company_profile
            .as_ref()
            .unwrap();
        assert_eq!(profile.total_employee_number, Some(132000));
        assert_eq!(
            profile.headquarter.as_ref().unwrap().city.as_deref(),
            Some("Cupertino")
        );
    }

    #[test]
    fn test_dividends_single_record_normalizes() {
        let json = r#"{
            "cash_dividends": {
                "share_class_id": "0P000000GY",
                "dividend_type": "CD",
                "ex_date": "2019-05-10",
                "cash_amount": 0.77,
                "currency_i_d": "USD",
                "frequency": 4,
                "pay_date": "2019-05-16",
                "record_date": "2019-05-13"
            }
        }"#;

        let tables: DividendTables = serde_json::from_str(json).unwrap();
        assert_eq!(tables.cash_dividends.len(), 1);
        assert_eq!(tables.cash_dividends[0].cash_amount, Some(dec!(0.77)));
    }

    #[test]
    fn test_envelope_with_error() {
        let json = r#"[{"request": "NOPE", "type": "Symbol", "results": [], "error": "unknown symbol"}]"#;
        let envelopes: Vec<RawFundamentalsData> = serde_json::from_str(json).unwrap();
        assert_eq!(envelopes[0].error.as_deref(), Some("unknown symbol"));
        assert!(envelopes[0].results.is_empty());
    }
}
