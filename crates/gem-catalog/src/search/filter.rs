//! Filter criteria and the filter engine.

use std::fmt;

use gem_pricing::parse_leading_float;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::stone::Stone;

/// Selector value meaning "no constraint".
pub const MATCH_ALL: &str = "all";

/// An exact-match selector with a match-all sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    #[default]
    All,
    Exactly(String),
}

impl Selector {
    /// Create a selector. `"all"` and the empty string select everything.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() || value == MATCH_ALL {
            Selector::All
        } else {
            Selector::Exactly(value)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    /// The required value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Selector::All => None,
            Selector::Exactly(v) => Some(v),
        }
    }

    pub fn as_str(&self) -> &str {
        self.value().unwrap_or(MATCH_ALL)
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Selector::new(s)
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Selector::new(s)
    }
}

impl From<Selector> for String {
    fn from(s: Selector) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User filter input. All constraints are conjunctive; an unset field does
/// not constrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive SKU substring.
    pub sku: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_carat: Option<f64>,
    pub max_carat: Option<f64>,
    pub shape: Selector,
    pub treatment: Selector,
    pub category: Selector,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Set the inclusive total price bounds.
    pub fn with_price(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Set the inclusive carat weight bounds.
    pub fn with_carat(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_carat = min;
        self.max_carat = max;
        self
    }

    pub fn with_shape(mut self, shape: impl Into<Selector>) -> Self {
        self.shape = shape.into();
        self
    }

    pub fn with_treatment(mut self, treatment: impl Into<Selector>) -> Self {
        self.treatment = treatment.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<Selector>) -> Self {
        self.category = category.into();
        self
    }

    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.filters().is_empty()
    }

    /// The active filters. Non-finite bounds are ignored.
    pub fn filters(&self) -> Vec<Filter> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        let mut filters = Vec::new();

        if !self.sku.is_empty() {
            filters.push(Filter::sku_contains(self.sku.clone()));
        }
        let (min, max) = (finite(self.min_price), finite(self.max_price));
        if min.is_some() || max.is_some() {
            filters.push(Filter::price_range(min, max));
        }
        let (min, max) = (finite(self.min_carat), finite(self.max_carat));
        if min.is_some() || max.is_some() {
            filters.push(Filter::carat_range(min, max));
        }
        if let Some(shape) = self.shape.value() {
            filters.push(Filter::Shape(shape.to_string()));
        }
        if let Some(treatment) = self.treatment.value() {
            filters.push(Filter::Treatment(treatment.to_string()));
        }
        if let Some(category) = self.category.value() {
            filters.push(Filter::Category(category.to_string()));
        }
        filters
    }

    /// Parse a bound typed into a form field. Blank input clears the bound.
    pub fn parse_bound(field: &str, raw: &str) -> Result<Option<f64>, CatalogError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        parse_leading_float(raw)
            .map(Some)
            .ok_or_else(|| CatalogError::InvalidBound {
                field: field.to_string(),
                value: raw.to_string(),
            })
    }
}

/// A single stone predicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// SKU contains the text, ignoring case.
    SkuContains(String),
    /// Inclusive bounds on the total price. Unknown prices pass.
    PriceRange { min: Option<f64>, max: Option<f64> },
    /// Inclusive bounds on the carat weight. Unknown weights pass.
    CaratRange { min: Option<f64>, max: Option<f64> },
    /// Exact shape.
    Shape(String),
    /// Exact treatment.
    Treatment(String),
    /// Exact category text.
    Category(String),
}

impl Filter {
    /// Create a SKU substring filter.
    pub fn sku_contains(text: impl Into<String>) -> Self {
        Filter::SkuContains(text.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<f64>, max: Option<f64>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a carat range filter.
    pub fn carat_range(min: Option<f64>, max: Option<f64>) -> Self {
        Filter::CaratRange { min, max }
    }

    /// Whether the stone passes this filter.
    pub fn matches(&self, stone: &Stone) -> bool {
        match self {
            Filter::SkuContains(text) => stone.sku.to_lowercase().contains(&text.to_lowercase()),
            Filter::PriceRange { min, max } => within(stone.price_total, *min, *max),
            Filter::CaratRange { min, max } => within(stone.weight_ct, *min, *max),
            Filter::Shape(shape) => stone.shape == *shape,
            Filter::Treatment(treatment) => stone.treatment == *treatment,
            Filter::Category(category) => stone.category == *category,
        }
    }
}

fn within(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(value) = value else {
        return true;
    };
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

/// Select the stones passing every constraint in `criteria`, in input order.
pub fn filter<'a>(stones: &'a [Stone], criteria: &FilterCriteria) -> Vec<&'a Stone> {
    let filters = criteria.filters();
    let matched: Vec<&Stone> = stones
        .iter()
        .filter(|stone| filters.iter().all(|f| f.matches(stone)))
        .collect();

    tracing::debug!(
        filters = filters.len(),
        total = stones.len(),
        matched = matched.len(),
        "filtered stones"
    );
    matched
}
