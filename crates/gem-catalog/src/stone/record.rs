//! The normalized stone record.

use serde::{Deserialize, Serialize};

use crate::ids::StoneId;
use crate::stone::{DisplayField, StoneCategory};

/// Default for `lab` and `origin` when the source omits them.
pub const NOT_AVAILABLE: &str = "N/A";

/// One catalog item after normalization.
///
/// Every field is always present. Numeric fields hold a finite number or
/// `None`; `None` means unknown and is never treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stone {
    /// Source id, or the record's position when the source has none.
    pub id: StoneId,
    /// Stock keeping unit. Not enforced unique.
    pub sku: String,
    pub shape: String,
    /// Carat weight.
    pub weight_ct: Option<f64>,
    pub measurements: String,
    /// Total price, already decrypted.
    pub price_total: Option<f64>,
    pub price_per_ct: Option<f64>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub certificate_url: Option<String>,
    /// Grading lab; `"N/A"` when absent.
    pub lab: String,
    /// Country of origin; `"N/A"` when absent.
    pub origin: String,
    /// Length to width ratio.
    pub ratio: Option<f64>,
    pub color: String,
    pub clarity: String,
    pub luster: String,
    pub fluorescence: String,
    pub certificate_number: String,
    pub treatment: String,
    /// Free-form category text, e.g. "Emerald" or "Fancy Sapphire".
    pub category: String,
}

impl Stone {
    /// Create a stone with the given id and SKU and every other field at its
    /// default.
    pub fn new(id: impl Into<StoneId>, sku: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sku: sku.into(),
            shape: String::new(),
            weight_ct: None,
            measurements: String::new(),
            price_total: None,
            price_per_ct: None,
            image_url: None,
            video_url: None,
            certificate_url: None,
            lab: NOT_AVAILABLE.to_string(),
            origin: NOT_AVAILABLE.to_string(),
            ratio: None,
            color: String::new(),
            clarity: String::new(),
            luster: String::new(),
            fluorescence: String::new(),
            certificate_number: String::new(),
            treatment: String::new(),
            category: String::new(),
        }
    }

    /// Classify the free-form category text.
    pub fn kind(&self) -> StoneCategory {
        StoneCategory::classify(&self.category)
    }

    /// Fields to show for this stone, in display order.
    pub fn visible_fields(&self) -> &'static [DisplayField] {
        self.kind().visible_fields()
    }

    /// Whether any image, video or certificate link is present.
    pub fn has_media(&self) -> bool {
        self.image_url.is_some() || self.video_url.is_some() || self.certificate_url.is_some()
    }
}
