//! Product resolution: from a free-text or exact-identifier query to
//! the canonical product page URL.
//!
//! The search endpoint sometimes redirects straight to a unique product
//! (exact identifier match) and sometimes renders a results listing
//! (fuzzy query); the resolver handles both without the caller knowing
//! which occurred.

use crate::cardmarket::client::{MarketFetch, SITE_ROOT};
use crate::cardmarket::selectors::{PRODUCT_LINK_STRATEGIES, PRODUCT_PATH_MARKER};
use crate::error::ScrapeError;
use scraper::Html;
use tracing::debug;
use url::Url;

/// Resolves `query` to a fully-qualified product page URL.
pub async fn resolve(client: &impl MarketFetch, query: &str) -> Result<String, ScrapeError> {
    let response = client.search(query).await?;

    // An exact match redirects straight to the product page; that
    // outranks everything else, including the status code.
    if response.final_url.contains(PRODUCT_PATH_MARKER) {
        debug!("Search redirected directly to product page");
        return Ok(response.final_url);
    }

    if response.status == 403 {
        return Err(ScrapeError::Blocked { status: response.status });
    }
    if !(200..300).contains(&response.status) {
        return Err(ScrapeError::Status { status: response.status });
    }

    match first_product_link(&response.body)? {
        Some(url) => {
            debug!("Resolved via results listing: {}", url);
            Ok(url)
        }
        None => Err(ScrapeError::NotFound { query: query.to_string() }),
    }
}

/// Selects the first single-product link from a results listing,
/// trying each strategy scope in order and resolving the href against
/// the site root.
pub fn first_product_link(html: &str) -> Result<Option<String>, ScrapeError> {
    let document = Html::parse_document(html);

    for selector in PRODUCT_LINK_STRATEGIES.iter() {
        let href = document
            .select(selector)
            .next()
            .and_then(|link| link.value().attr("href"));
        if let Some(href) = href {
            let absolute = Url::parse(SITE_ROOT)?.join(href)?;
            return Ok(Some(absolute.into()));
        }
    }

    Ok(None)
}
