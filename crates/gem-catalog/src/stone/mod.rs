//! Stone records.
//!
//! Contains the normalized record, category classification and the
//! normalizer that builds records from raw catalog JSON.

mod category;
mod normalize;
mod record;

pub use category::{DisplayField, StoneCategory};
pub use normalize::{normalize_catalog, normalize_stone, normalize_stones};
pub use record::{Stone, NOT_AVAILABLE};
