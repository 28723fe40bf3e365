//! Stone categories and per-category field visibility.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stone::Stone;

/// Closed classification of the free-form category text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoneCategory {
    Diamond,
    Emerald,
    /// Fancy colored stones.
    Fancy,
    #[default]
    Other,
}

impl StoneCategory {
    /// Classify category text by case-insensitive substring.
    ///
    /// Checked in the order emerald, fancy, diamond, so "Fancy Diamond" is
    /// [`StoneCategory::Fancy`].
    pub fn classify(category: &str) -> Self {
        let lower = category.to_lowercase();
        if lower.contains("emerald") {
            StoneCategory::Emerald
        } else if lower.contains("fancy") {
            StoneCategory::Fancy
        } else if lower.contains("diamond") {
            StoneCategory::Diamond
        } else {
            StoneCategory::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoneCategory::Diamond => "diamond",
            StoneCategory::Emerald => "emerald",
            StoneCategory::Fancy => "fancy",
            StoneCategory::Other => "other",
        }
    }

    /// Fields shown for stones of this category, in display order.
    pub fn visible_fields(&self) -> &'static [DisplayField] {
        use DisplayField::*;
        match self {
            StoneCategory::Diamond => &[
                Shape,
                Weight,
                Measurements,
                Color,
                Clarity,
                Fluorescence,
                Lab,
                CertificateNumber,
                Ratio,
            ],
            StoneCategory::Emerald => &[
                Shape,
                Weight,
                Measurements,
                Origin,
                Treatment,
                Luster,
                Clarity,
                Lab,
                CertificateNumber,
            ],
            StoneCategory::Fancy => &[
                Shape,
                Weight,
                Measurements,
                Color,
                Origin,
                Treatment,
                Lab,
                Ratio,
            ],
            StoneCategory::Other => &[
                Shape,
                Weight,
                Measurements,
                Color,
                Clarity,
                Origin,
                Lab,
            ],
        }
    }

    /// Whether `field` is shown for this category.
    pub fn shows(&self, field: DisplayField) -> bool {
        self.visible_fields().contains(&field)
    }
}

impl fmt::Display for StoneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detail field that may be shown for a stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayField {
    Shape,
    Weight,
    Measurements,
    Color,
    Clarity,
    Fluorescence,
    Lab,
    CertificateNumber,
    Ratio,
    Origin,
    Treatment,
    Luster,
}

impl DisplayField {
    /// Human label.
    pub fn label(&self) -> &'static str {
        match self {
            DisplayField::Shape => "Shape",
            DisplayField::Weight => "Weight",
            DisplayField::Measurements => "Measurements",
            DisplayField::Color => "Color",
            DisplayField::Clarity => "Clarity",
            DisplayField::Fluorescence => "Fluorescence",
            DisplayField::Lab => "Lab",
            DisplayField::CertificateNumber => "Certificate",
            DisplayField::Ratio => "Ratio",
            DisplayField::Origin => "Origin",
            DisplayField::Treatment => "Treatment",
            DisplayField::Luster => "Luster",
        }
    }

    /// Formatted value of this field on `stone`; `"-"` when unknown or empty.
    pub fn value(&self, stone: &Stone) -> String {
        let text = |s: &str| {
            if s.is_empty() {
                "-".to_string()
            } else {
                s.to_string()
            }
        };
        match self {
            DisplayField::Shape => text(&stone.shape),
            DisplayField::Weight => stone
                .weight_ct
                .map(|w| format!("{:.2} ct", w))
                .unwrap_or_else(|| "-".to_string()),
            DisplayField::Measurements => text(&stone.measurements),
            DisplayField::Color => text(&stone.color),
            DisplayField::Clarity => text(&stone.clarity),
            DisplayField::Fluorescence => text(&stone.fluorescence),
            DisplayField::Lab => text(&stone.lab),
            DisplayField::CertificateNumber => text(&stone.certificate_number),
            DisplayField::Ratio => stone
                .ratio
                .map(|r| format!("{:.2}", r))
                .unwrap_or_else(|| "-".to_string()),
            DisplayField::Origin => text(&stone.origin),
            DisplayField::Treatment => text(&stone.treatment),
            DisplayField::Luster => text(&stone.luster),
        }
    }
}
