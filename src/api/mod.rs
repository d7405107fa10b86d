//! API service modules for Tradier endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the Tradier API.

mod accounts;
mod fundamentals;
mod markets;
mod options;
mod orders;
mod watchlists;

pub use accounts::AccountsService;
pub use fundamentals::FundamentalsService;
pub use markets::MarketsService;
pub use options::OptionsService;
pub use orders::OrdersService;
pub use watchlists::WatchlistsService;
