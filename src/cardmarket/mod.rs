//! Cardmarket-specific modules: HTTP client, product resolution, URL
//! filtering, and price extraction.

pub mod client;
pub mod extract;
pub mod models;
pub mod resolver;
pub mod selectors;
pub mod urls;

pub use client::{CardmarketClient, MarketFetch, SearchResponse};
pub use models::PriceReport;
