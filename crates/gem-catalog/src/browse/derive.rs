//! Derivation of the visible result set, with memoization.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::browse::{BrowseState, PageWindow};
use crate::search::{filter, paginate, sort, FilterCriteria, Page, SortSpec};
use crate::stone::Stone;

/// The page of stones currently on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub page: Page<Stone>,
    /// Stones passing the filters, across all pages.
    pub total_matches: usize,
}

impl ResultSet {
    pub fn stones(&self) -> &[Stone] {
        &self.page.items
    }

    pub fn total_pages(&self) -> usize {
        self.page.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }
}

/// Filter, then sort (when a sort is set), then paginate.
pub fn derive_result_set(
    stones: &[Stone],
    criteria: &FilterCriteria,
    sort_spec: Option<&SortSpec>,
    window: PageWindow,
) -> ResultSet {
    let matched = filter(stones, criteria);
    let ordered = match sort_spec {
        Some(spec) => sort(matched, spec),
        None => matched,
    };
    let page = paginate(&ordered, window.page_index, window.page_size).map(Stone::clone);

    ResultSet {
        total_matches: ordered.len(),
        page,
    }
}

struct CacheEntry {
    stones: Arc<[Stone]>,
    criteria: FilterCriteria,
    sort: Option<SortSpec>,
    window: PageWindow,
    result: Arc<ResultSet>,
}

impl CacheEntry {
    fn matches(
        &self,
        stones: &Arc<[Stone]>,
        criteria: &FilterCriteria,
        sort: Option<&SortSpec>,
        window: PageWindow,
    ) -> bool {
        Arc::ptr_eq(&self.stones, stones)
            && self.criteria == *criteria
            && self.sort.as_ref() == sort
            && self.window == window
    }
}

/// Remembers the last derived result set and reuses it while the snapshot,
/// criteria, sort and page window are unchanged.
///
/// Snapshots are compared by identity, so a refetch always recomputes.
#[derive(Default)]
pub struct ResultCache {
    last: Option<CacheEntry>,
    hits: u64,
    misses: u64,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the result set, reusing the previous one when inputs match.
    pub fn get(
        &mut self,
        stones: &Arc<[Stone]>,
        criteria: &FilterCriteria,
        sort: Option<&SortSpec>,
        window: PageWindow,
    ) -> Arc<ResultSet> {
        if let Some(entry) = &self.last {
            if entry.matches(stones, criteria, sort, window) {
                self.hits += 1;
                tracing::debug!(hits = self.hits, "result cache hit");
                return Arc::clone(&entry.result);
            }
        }

        self.misses += 1;
        let result = Arc::new(derive_result_set(stones, criteria, sort, window));
        tracing::debug!(
            matches = result.total_matches,
            page = window.page_index,
            "derived result set"
        );
        self.last = Some(CacheEntry {
            stones: Arc::clone(stones),
            criteria: criteria.clone(),
            sort: sort.copied(),
            window,
            result: Arc::clone(&result),
        });
        result
    }

    /// Derive the result set for a browse state.
    pub fn for_state(&mut self, stones: &Arc<[Stone]>, state: &BrowseState) -> Arc<ResultSet> {
        self.get(stones, &state.criteria, state.sort.as_ref(), state.window())
    }

    /// Drop the remembered result.
    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SortField;

    fn snapshot(n: usize) -> Arc<[Stone]> {
        (0..n)
            .map(|i| {
                let mut s = Stone::new(i.to_string(), format!("S{i:03}"));
                s.price_total = Some((n - i) as f64 * 100.0);
                s
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_derive_without_sort_keeps_order() {
        let stones = snapshot(5);
        let result = derive_result_set(&stones, &FilterCriteria::new(), None, PageWindow::new(1, 2));
        assert_eq!(result.total_matches, 5);
        assert_eq!(result.total_pages(), 3);
        assert_eq!(result.stones()[0].sku, "S000");
    }

    #[test]
    fn test_derive_sorted_and_filtered() {
        let stones = snapshot(10);
        let criteria = FilterCriteria::new().with_price(Some(300.0), None);
        let spec = SortSpec::ascending(SortField::PriceTotal);
        let result = derive_result_set(&stones, &criteria, Some(&spec), PageWindow::new(1, 3));
        assert_eq!(result.total_matches, 8);
        let prices: Vec<f64> = result.stones().iter().filter_map(|s| s.price_total).collect();
        assert_eq!(prices, vec![300.0, 400.0, 500.0]);
    }

    #[test]
    fn test_cache_hits_on_identical_inputs() {
        let stones = snapshot(4);
        let mut cache = ResultCache::new();
        let criteria = FilterCriteria::new();
        let a = cache.get(&stones, &criteria, None, PageWindow::default());
        let b = cache.get(&stones, &criteria, None, PageWindow::default());
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_cache_misses_on_any_change() {
        let stones = snapshot(4);
        let mut cache = ResultCache::new();
        let mut state = BrowseState::new();
        cache.for_state(&stones, &state);

        state.select_sort(SortField::Sku);
        cache.for_state(&stones, &state);

        state.set_page_size(2);
        cache.for_state(&stones, &state);

        let refetched = snapshot(4);
        cache.for_state(&refetched, &state);

        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.misses(), 4);
    }
}
