//! Structural markers for Cardmarket HTML parsing.
//!
//! Cardmarket publishes no versioned markup contract, so every fragile
//! marker lives here: CSS selectors, anchor phrases, the currency
//! pattern, and the product path marker. When parsing stops matching,
//! this is the only file that should need updating.

use regex_lite::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// URL path segment identifying a single-card product page.
pub const PRODUCT_PATH_MARKER: &str = "/Products/Singles/";

/// Ordered link-selection strategies for search result pages, most
/// specific scope first. The typed results table beats the generic
/// results container, which beats "anywhere in the document"; this
/// keeps unrelated page chrome from shadowing the real first result.
pub static PRODUCT_LINK_STRATEGIES: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    [
        Selector::parse("table#ProductsTable a[href*='/Products/Singles/']").unwrap(),
        Selector::parse("div#ProductsTable a[href*='/Products/Singles/']").unwrap(),
        Selector::parse("a[href*='/Products/Singles/']").unwrap(),
    ]
});

/// Offers-listing container on a filtered product page.
pub static OFFERS_BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.table-body").unwrap());

/// Individual offer row, used when the container's direct children
/// carry intermediate wrappers.
pub static OFFER_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.article-row").unwrap());

/// Phrases expected adjacent to the price-summary widget, in lookup
/// order. French and English first (the scraped locale is /fr), then
/// the other storefront languages.
pub const PRICE_TREND_ANCHORS: &[&str] = &[
    "tendance des prix",
    "prix moyen",
    "articles disponibles",
    "price trend",
    "average price",
    "available items",
    "preistrend",
    "durchschnittspreis",
    "verfügbare artikel",
    "andamento del prezzo",
    "prezzo medio",
    "articoli disponibili",
    "tendencia de precios",
    "precio medio",
    "artículos disponibles",
    "prijstrend",
    "gemiddelde prijs",
    "beschikbare artikelen",
];

/// Displayed EUR amount: optional thousands grouping, `.` or `,` as
/// either separator, optional two decimals, trailing euro sign.
/// Matches "12,50 €", "1.250,00 €" and "7 €".
pub static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\d{1,3}(?:[.,]\d{3})*|\d+)(?:[.,]\d{2})?\s*€").unwrap());
