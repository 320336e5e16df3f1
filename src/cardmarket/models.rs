//! Data model for a pricing lookup.

use serde::{Deserialize, Serialize};

/// Display sentinel for an absent price.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Result of one pipeline invocation.
///
/// Prices are carried as displayed text ("3,50 €"), never parsed to a
/// numeric type: the locale-dependent separators make a blind float
/// conversion lossy, so any numeric use is a caller concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceReport {
    /// Lowest displayed price on the filtered page, if any.
    pub lowest: Option<String>,
    /// Price of the median offer row on the seller-restricted page.
    pub median: Option<String>,
    /// The filtered URL used for the lowest-price lookup.
    pub url: String,
}

impl PriceReport {
    /// Lowest price text, or the NOT_FOUND sentinel.
    pub fn lowest_display(&self) -> &str {
        self.lowest.as_deref().unwrap_or(NOT_FOUND)
    }

    /// Median price text, or the NOT_FOUND sentinel.
    pub fn median_display(&self) -> &str {
        self.median.as_deref().unwrap_or(NOT_FOUND)
    }
}
