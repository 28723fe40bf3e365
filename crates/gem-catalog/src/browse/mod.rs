//! Browse state and result derivation.

mod derive;
mod state;

pub use derive::{derive_result_set, ResultCache, ResultSet};
pub use state::{BrowseState, PageWindow, ViewMode};
