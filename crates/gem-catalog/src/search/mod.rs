//! Search module.
//!
//! The query pipeline stages: filter, sort, paginate, plus SKU suggestions.

mod filter;
mod results;
mod sort;
mod suggest;

pub use filter::{filter, Filter, FilterCriteria, Selector, MATCH_ALL};
pub use results::{paginate, Page, Pagination, DEFAULT_PAGE_SIZE};
pub use sort::{collate, compare_keys, sort, SortDirection, SortField, SortKey, SortSpec};
pub use suggest::{suggest, DEFAULT_SUGGEST_LIMIT, MIN_QUERY_CHARS};
