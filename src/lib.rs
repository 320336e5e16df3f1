//! cm-pricer - Fast, stateless Cardmarket single-card price lookup
//!
//! Resolves a card identifier or free-text query to its Cardmarket
//! product page, then extracts the lowest and median listed prices
//! from the filtered offer pages. TLS fingerprint emulation keeps the
//! anti-bot layer from rejecting requests.

pub mod cardmarket;
pub mod commands;
pub mod config;
pub mod cookies;
pub mod error;
pub mod format;

pub use cardmarket::models::PriceReport;
pub use commands::PricesCommand;
pub use config::Config;
pub use error::ScrapeError;
