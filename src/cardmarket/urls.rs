//! Marketplace filter parameters and URL rewriting.

use url::Url;

/// A set of filter query parameters, applied in order.
pub type FilterSet = [(&'static str, &'static str)];

/// Filters for the lowest-price lookup: French sellers, French-language
/// cards, Near Mint or better.
pub const LOWEST_FILTERS: &FilterSet = &[
    ("sellerCountry", "12"), // France
    ("language", "2"),       // Français
    ("minCondition", "2"),   // Near Mint
];

/// Filters for the median lookup: the lowest-price set narrowed to
/// professional sellers. The median is computed over that population
/// of offers, not the one behind [`LOWEST_FILTERS`].
pub const MEDIAN_FILTERS: &FilterSet = &[
    ("sellerCountry", "12"),
    ("sellerType", "1"), // professional sellers
    ("language", "2"),
    ("minCondition", "2"),
];

/// Returns `base_url` with the filter parameters merged into its query
/// string. Keys named in `filters` are overwritten with a single value;
/// every other parameter keeps its position and all of its values.
pub fn apply_filters(base_url: &str, filters: &FilterSet) -> Result<String, url::ParseError> {
    let mut url = Url::parse(base_url)?;

    // Group existing pairs by key, first-occurrence order. A key may
    // legitimately repeat in the source URL.
    let mut keys: Vec<String> = Vec::new();
    let mut values: Vec<Vec<String>> = Vec::new();
    for (key, value) in url.query_pairs() {
        match keys.iter().position(|k| k.as_str() == key.as_ref()) {
            Some(i) => values[i].push(value.into_owned()),
            None => {
                keys.push(key.into_owned());
                values.push(vec![value.into_owned()]);
            }
        }
    }

    for &(key, value) in filters {
        match keys.iter().position(|k| k.as_str() == key) {
            Some(i) => values[i] = vec![value.to_string()],
            None => {
                keys.push(key.to_string());
                values.push(vec![value.to_string()]);
            }
        }
    }

    if keys.is_empty() {
        url.set_query(None);
    } else {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, group) in keys.iter().zip(&values) {
            for value in group {
                pairs.append_pair(key, value);
            }
        }
    }

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT: &str = "https://www.cardmarket.com/fr/Pokemon/Products/Singles/SetX/Card123";

    #[test]
    fn appends_filters_to_bare_url() {
        let filtered = apply_filters(PRODUCT, LOWEST_FILTERS).unwrap();
        assert_eq!(
            filtered,
            format!("{}?sellerCountry=12&language=2&minCondition=2", PRODUCT)
        );
    }

    #[test]
    fn median_filters_add_seller_type() {
        let filtered = apply_filters(PRODUCT, MEDIAN_FILTERS).unwrap();
        assert_eq!(
            filtered,
            format!("{}?sellerCountry=12&sellerType=1&language=2&minCondition=2", PRODUCT)
        );
    }

    #[test]
    fn overwrites_existing_filter_keys_in_place() {
        let url = format!("{}?language=1&foo=bar", PRODUCT);
        let filtered = apply_filters(&url, &[("language", "2")]).unwrap();
        assert_eq!(filtered, format!("{}?language=2&foo=bar", PRODUCT));
    }

    #[test]
    fn untouched_keys_are_never_altered() {
        let url = format!("{}?foo=bar&isSigned=N", PRODUCT);
        let filtered = apply_filters(&url, LOWEST_FILTERS).unwrap();
        assert!(filtered.contains("foo=bar"));
        assert!(filtered.contains("isSigned=N"));
    }

    #[test]
    fn repeated_untouched_key_keeps_all_values() {
        let url = format!("{}?idExpansion=1&idExpansion=2&foo=x", PRODUCT);
        let filtered = apply_filters(&url, &[("foo", "y")]).unwrap();
        assert_eq!(
            filtered,
            format!("{}?idExpansion=1&idExpansion=2&foo=y", PRODUCT)
        );
    }

    #[test]
    fn repeated_filtered_key_collapses_to_single_value() {
        let url = format!("{}?language=1&language=3", PRODUCT);
        let filtered = apply_filters(&url, &[("language", "2")]).unwrap();
        assert_eq!(filtered, format!("{}?language=2", PRODUCT));
    }

    #[test]
    fn applying_twice_equals_applying_once() {
        let once = apply_filters(PRODUCT, LOWEST_FILTERS).unwrap();
        let twice = apply_filters(&once, LOWEST_FILTERS).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn idempotent_with_preexisting_query() {
        let url = format!("{}?foo=a+b&language=9", PRODUCT);
        let once = apply_filters(&url, MEDIAN_FILTERS).unwrap();
        let twice = apply_filters(&once, MEDIAN_FILTERS).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_filter_set_preserves_url_query() {
        let url = format!("{}?foo=bar", PRODUCT);
        let filtered = apply_filters(&url, &[]).unwrap();
        assert_eq!(filtered, url);
    }

    #[test]
    fn malformed_url_propagates_parse_error() {
        assert!(apply_filters("not a url", LOWEST_FILTERS).is_err());
    }
}
