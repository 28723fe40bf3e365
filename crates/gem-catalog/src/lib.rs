//! Gemstone catalog model and query engine.
//!
//! This crate turns raw catalog JSON into stones and answers browse queries
//! over them:
//!
//! - **Stone**: normalized records, category classification, field visibility
//! - **Search**: filter, sort, paginate, SKU suggestions
//! - **Browse**: serializable UI state and memoized result derivation
//! - **Inventory**: last-writer-wins snapshot store
//!
//! # Example
//!
//! ```rust
//! use gem_catalog::prelude::*;
//! use serde_json::json;
//!
//! let stones = normalize_catalog(&json!({
//!     "stones": [
//!         {"sku": "T9548", "weightCt": "1.25", "priceTotal": null},
//!         {"sku": "E1001", "weightCt": 2.1, "category": "Emerald"}
//!     ]
//! }));
//!
//! let mut state = BrowseState::new();
//! state.update_criteria(|c| c.sku = "t95".into());
//! state.select_sort(SortField::WeightCt);
//!
//! let result = derive_result_set(&stones, &state.criteria, state.sort.as_ref(), state.window());
//! assert_eq!(result.total_matches, 1);
//! assert_eq!(result.stones()[0].weight_ct, Some(1.25));
//! ```

pub mod error;
pub mod ids;

pub mod browse;
pub mod inventory;
pub mod search;
pub mod stone;
pub mod tag;

pub use error::CatalogError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;

    // Stones
    pub use crate::stone::{
        normalize_catalog, normalize_stone, normalize_stones, DisplayField, Stone,
        StoneCategory,
    };
    pub use crate::tag::{parse_tags, Tag};

    // Search
    pub use crate::search::{
        filter, paginate, sort, suggest, Filter, FilterCriteria, Page, Pagination, Selector,
        SortDirection, SortField, SortSpec,
    };

    // Browse
    pub use crate::browse::{
        derive_result_set, BrowseState, PageWindow, ResultCache, ResultSet, ViewMode,
    };
    pub use crate::inventory::{CatalogPayload, CatalogSnapshot, FetchTicket, Inventory, LoadState};
}
