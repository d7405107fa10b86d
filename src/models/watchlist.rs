//! Watchlist models.

use serde::{Deserialize, Serialize};

use super::serde_util::one_or_many;

/// A named list of symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Watchlist {
    /// Watchlist ID (slug assigned by the API)
    pub id: String,
    /// Display name
    pub name: String,
    /// Public sharing ID, when the list is shared
    #[serde(default)]
    pub public_id: Option<String>,
    /// Symbols on the list; absent in the index listing
    #[serde(default)]
    pub items: Option<WatchlistItems>,
}

impl Watchlist {
    /// The symbols on this watchlist, in order.
    pub fn symbols(&self) -> Vec<&str> {
        self.items
            .as_ref()
            .map(|items| items.item.iter().map(|i| i.symbol.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Wrapper for the watchlist entry list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistItems {
    /// Entries (bare object when there is only one)
    #[serde(default, with = "one_or_many")]
    pub item: Vec<WatchlistItem>,
}

/// A single watchlist entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistItem {
    /// Trading symbol
    pub symbol: String,
    /// Entry ID
    #[serde(default)]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watchlist_single_item() {
        let json = r#"{
            "id": "default-1594571234",
            "name": "My Watchlist",
            "public_id": null,
            "items": {"item": {"symbol": "AAPL", "id": "item-1"}}
        }"#;

        let watchlist: Watchlist = serde_json::from_str(json).unwrap();
        assert_eq!(watchlist.symbols(), vec!["AAPL"]);
    }

    #[test]
    fn test_watchlist_without_items() {
        let json = r#"{"id": "tech", "name": "Tech"}"#;
        let watchlist: Watchlist = serde_json::from_str(json).unwrap();
        assert!(watchlist.symbols().is_empty());
    }

    #[test]
    fn test_watchlist_many_items() {
        let json = r#"{
            "id": "tech",
            "name": "Tech",
            "items": {"item": [
                {"symbol": "AAPL", "id": "1"},
                {"symbol": "MSFT", "id": "2"}
            ]}
        }"#;

        let watchlist: Watchlist = serde_json::from_str(json).unwrap();
        assert_eq!(watchlist.symbols(), vec!["AAPL", "MSFT"]);
    }
}
