//! Browse UI state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::search::{FilterCriteria, SortField, SortSpec, DEFAULT_PAGE_SIZE};

/// How results are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Table,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::Table => "table",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "table" => Ok(ViewMode::Table),
            _ => Err(CatalogError::UnknownViewMode(s.to_string())),
        }
    }
}

/// A page request: 1-based index and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Everything the user has chosen while browsing.
///
/// Changing the criteria, the sort or the page size returns to page 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowseState {
    pub criteria: FilterCriteria,
    /// `None` keeps catalog order.
    pub sort: Option<SortSpec>,
    pub page_index: usize,
    pub page_size: usize,
    pub view_mode: ViewMode,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: None,
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
            view_mode: ViewMode::default(),
        }
    }
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size used for new states.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    /// The current page request.
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page_index, self.page_size)
    }

    /// Replace the filter criteria.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.page_index = 1;
    }

    /// Edit the filter criteria in place.
    pub fn update_criteria(&mut self, f: impl FnOnce(&mut FilterCriteria)) {
        f(&mut self.criteria);
        self.page_index = 1;
    }

    /// Clear every filter.
    pub fn reset_criteria(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Pick a sort column; picking the active one flips its direction.
    pub fn select_sort(&mut self, field: SortField) {
        self.sort = Some(SortSpec::select(self.sort, field));
        self.page_index = 1;
    }

    /// Set the sort outright.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
        self.page_index = 1;
    }

    /// Return to catalog order.
    pub fn clear_sort(&mut self) {
        self.set_sort(None);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 1;
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    /// Jump to `page`, clamped to `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.page_index = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to_page(self.page_index.saturating_add(1), total_pages);
    }

    pub fn prev_page(&mut self, total_pages: usize) {
        self.go_to_page(self.page_index.saturating_sub(1), total_pages);
    }

    /// Pull the page index back into range after the result count shrank.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.go_to_page(self.page_index, total_pages);
    }
}
