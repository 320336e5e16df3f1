//! Integration tests for extraction and link selection using fixture
//! files shaped like real Cardmarket pages.

use cm_pricer::cardmarket::extract::{extract_lowest, extract_median};
use cm_pricer::cardmarket::resolver::first_product_link;

const PRODUCT_FIXTURE: &str = include_str!("fixtures/product_page.html");
const SEARCH_FIXTURE: &str = include_str!("fixtures/search_results.html");

#[test]
fn test_lowest_price_from_product_page() {
    // The price-trend widget wins over the cart total in the header.
    assert_eq!(extract_lowest(PRODUCT_FIXTURE).as_deref(), Some("4,45 €"));
}

#[test]
fn test_median_price_from_offer_rows() {
    // Five offer rows: the third one is the median.
    assert_eq!(extract_median(PRODUCT_FIXTURE).as_deref(), Some("4,50 €"));
}

#[test]
fn test_first_result_from_search_listing() {
    // The navbar's featured-card link sits outside ProductsTable and
    // must not shadow the first real result.
    let url = first_product_link(SEARCH_FIXTURE).unwrap();
    assert_eq!(
        url.as_deref(),
        Some("https://www.cardmarket.com/fr/Pokemon/Products/Singles/SetX/Card123")
    );
}

#[test]
fn test_extractors_disagree_on_fallback_policy() {
    // A page with currency text but no offers container: the lowest
    // extractor may fall back to a document-wide scan, the median
    // extractor must not.
    let html = r#"<html><body><p>Promo: 1,99 €</p></body></html>"#;
    assert_eq!(extract_lowest(html).as_deref(), Some("1,99 €"));
    assert_eq!(extract_median(html), None);
}
