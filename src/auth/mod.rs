//! Authentication for the Tradier API.
//!
//! Tradier authenticates every request with a bearer access token. Sandbox
//! tokens come straight from the developer dashboard; production tokens are
//! obtained through the OAuth authorization-code flow and refreshed with
//! the accompanying refresh token.

mod session;

pub use session::Session;
