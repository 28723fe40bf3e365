//! SKU autocomplete.

use crate::stone::Stone;

/// Default number of suggestions.
pub const DEFAULT_SUGGEST_LIMIT: usize = 8;

/// Shortest query that produces suggestions.
pub const MIN_QUERY_CHARS: usize = 2;

/// Up to `limit` stones whose SKU contains the trimmed `query`, ignoring
/// case, in catalog order.
pub fn suggest<'a>(stones: &'a [Stone], query: &str, limit: usize) -> Vec<&'a Stone> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    stones
        .iter()
        .filter(|stone| stone.sku.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(skus: &[&str]) -> Vec<Stone> {
        skus.iter().map(|s| Stone::new(*s, *s)).collect()
    }

    #[test]
    fn test_short_query_is_empty() {
        let stones = catalog(&["T9548"]);
        assert!(suggest(&stones, "", 8).is_empty());
        assert!(suggest(&stones, "T", 8).is_empty());
        assert!(suggest(&stones, "  T  ", 8).is_empty());
    }

    #[test]
    fn test_limit_and_order() {
        let skus: Vec<String> = (0..20).map(|i| format!("EM-{i:02}")).collect();
        let refs: Vec<&str> = skus.iter().map(String::as_str).collect();
        let stones = catalog(&refs);
        let out = suggest(&stones, "em", DEFAULT_SUGGEST_LIMIT);
        assert_eq!(out.len(), 8);
        assert_eq!(out[0].sku, "EM-00");
        assert_eq!(out[7].sku, "EM-07");
    }

    #[test]
    fn test_case_insensitive_trimmed() {
        let stones = catalog(&["T9548", "X1", "t9999"]);
        let out = suggest(&stones, " t9 ", 8);
        let skus: Vec<&str> = out.iter().map(|s| s.sku.as_str()).collect();
        assert_eq!(skus, vec!["T9548", "t9999"]);
    }

    #[test]
    fn test_zero_limit() {
        let stones = catalog(&["AB1"]);
        assert!(suggest(&stones, "ab", 0).is_empty());
    }
}
