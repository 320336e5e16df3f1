//! Price extraction from loosely-structured product page HTML.
//!
//! Cardmarket renders prices as plain text with no stable anchors, so
//! both extractors work by text heuristics: the lowest price via an
//! anchor-phrase search narrowed to the price-summary widget, the
//! median via positional selection inside the offers table. Malformed
//! HTML never errors; absence of structure is absence of data.

use crate::cardmarket::selectors::{OFFERS_BODY, OFFER_ROW, PRICE_RE, PRICE_TREND_ANCHORS};
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Finds the lowest displayed price.
///
/// Anchor phrases are tried in list order. For each, the first matching
/// text node is located and the walk moves up to the smallest ancestor
/// element whose full text still contains an anchor phrase; that
/// narrows the scan from "the whole document" to the summary widget,
/// keeping unrelated prices elsewhere on the page out of reach. The
/// first anchor that yields a price wins. If no anchor produces one,
/// the whole document is scanned in order as a fallback.
pub fn extract_lowest(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for anchor in PRICE_TREND_ANCHORS {
        let found = document.tree.root().descendants().find(|node| {
            node.value()
                .as_text()
                .is_some_and(|text| text.to_lowercase().contains(anchor))
        });
        let Some(text_node) = found else {
            continue;
        };

        let mut current = text_node.parent();
        while let Some(node) = current {
            if let Some(element) = ElementRef::wrap(node) {
                let text = element.text().collect::<String>().to_lowercase();
                if PRICE_TREND_ANCHORS.iter().any(|a| text.contains(a)) {
                    if let Some(price) = first_price_in(element) {
                        trace!("Anchor '{}' yielded price {}", anchor, price);
                        return Some(price);
                    }
                    // Anchor widget holds no price; try the next anchor.
                    break;
                }
            }
            current = node.parent();
        }
    }

    debug!("No anchor phrase yielded a price, scanning whole document");
    first_price_in(document.root_element())
}

/// Finds the price of the statistical median offer row.
///
/// Unlike [`extract_lowest`] there is no whole-document fallback: any
/// currency text on the page could be mistaken for an offer row, so a
/// missing offers container means a missing result.
pub fn extract_median(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let container = document.select(&OFFERS_BODY).next()?;

    // Direct children only; descendants would count nested price
    // elements as separate rows.
    let mut rows: Vec<ElementRef> = container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "div")
        .collect();
    if rows.is_empty() {
        rows = container.select(&OFFER_ROW).collect();
    }

    let n = rows.len();
    if n == 0 {
        return None;
    }
    let row = rows[median_index(n)];
    debug!("Selected offer row {} of {}", median_index(n) + 1, n);

    row.text()
        .map(str::trim)
        .filter(|fragment| fragment.contains('€'))
        .find_map(|fragment| PRICE_RE.find(fragment).map(|m| m.as_str().trim().to_string()))
}

/// Upper-middle median: exact middle for odd counts, the lower of the
/// two central rows (1-indexed `(n + 1) / 2`) for even counts.
pub(crate) fn median_index(n: usize) -> usize {
    ((n + 1) / 2).saturating_sub(1)
}

/// First currency-pattern match among the scope's `€`-bearing text
/// nodes, in document order.
fn first_price_in(scope: ElementRef<'_>) -> Option<String> {
    scope
        .text()
        .filter(|text| text.contains('€'))
        .find_map(|text| PRICE_RE.find(text).map(|m| m.as_str().trim().to_string()))
}
