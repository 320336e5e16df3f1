//! Error taxonomy for the resolution + extraction pipeline.
//!
//! Absence of a price is *not* an error: the extractors return `None`
//! and the report carries a NOT_FOUND sentinel instead.

use thiserror::Error;

/// Failures surfaced to the pipeline caller, unmodified.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Cardmarket refused the request (anti-bot or auth wall).
    /// Actionable: supply session cookies or rely on fingerprint emulation.
    #[error(
        "Cardmarket refused access (HTTP {status}): pass --cookie '...' or --cookie-file to authenticate"
    )]
    Blocked { status: u16 },

    /// The search produced neither a redirect to a product page nor a
    /// result link. Likely a bad or unknown query.
    #[error("no product page found for '{query}'")]
    NotFound { query: String },

    /// Non-success HTTP status other than access-denied.
    #[error("request failed with status {status}")]
    Status { status: u16 },

    /// Network-level failure or timeout.
    #[error("transport error: {0}")]
    Transport(#[from] wreq::Error),

    /// Malformed or unjoinable URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Local HTML override could not be read.
    #[error("failed to read local HTML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("query must not be empty")]
    EmptyQuery,
}
