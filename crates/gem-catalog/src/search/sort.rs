//! Sort fields, sort direction and the sort engine.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use gem_pricing::render_number;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::stone::Stone;

/// A sortable stone field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Sku,
    Shape,
    WeightCt,
    Measurements,
    PriceTotal,
    PricePerCt,
    Ratio,
    Lab,
    Origin,
    Color,
    Clarity,
    Luster,
    Fluorescence,
    CertificateNumber,
    Treatment,
    Category,
}

impl SortField {
    /// Every sortable field, in column order.
    pub const ALL: [SortField; 16] = [
        SortField::Sku,
        SortField::Shape,
        SortField::WeightCt,
        SortField::Measurements,
        SortField::PriceTotal,
        SortField::PricePerCt,
        SortField::Ratio,
        SortField::Lab,
        SortField::Origin,
        SortField::Color,
        SortField::Clarity,
        SortField::Luster,
        SortField::Fluorescence,
        SortField::CertificateNumber,
        SortField::Treatment,
        SortField::Category,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Sku => "sku",
            SortField::Shape => "shape",
            SortField::WeightCt => "weightCt",
            SortField::Measurements => "measurements",
            SortField::PriceTotal => "priceTotal",
            SortField::PricePerCt => "pricePerCt",
            SortField::Ratio => "ratio",
            SortField::Lab => "lab",
            SortField::Origin => "origin",
            SortField::Color => "color",
            SortField::Clarity => "clarity",
            SortField::Luster => "luster",
            SortField::Fluorescence => "fluorescence",
            SortField::CertificateNumber => "certificateNumber",
            SortField::Treatment => "treatment",
            SortField::Category => "category",
        }
    }

    /// The value this field contributes to ordering.
    pub fn key<'a>(&self, stone: &'a Stone) -> SortKey<'a> {
        let number = |v: Option<f64>| v.map_or(SortKey::Null, SortKey::Number);
        match self {
            SortField::Sku => SortKey::Text(&stone.sku),
            SortField::Shape => SortKey::Text(&stone.shape),
            SortField::WeightCt => number(stone.weight_ct),
            SortField::Measurements => SortKey::Text(&stone.measurements),
            SortField::PriceTotal => number(stone.price_total),
            SortField::PricePerCt => number(stone.price_per_ct),
            SortField::Ratio => number(stone.ratio),
            SortField::Lab => SortKey::Text(&stone.lab),
            SortField::Origin => SortKey::Text(&stone.origin),
            SortField::Color => SortKey::Text(&stone.color),
            SortField::Clarity => SortKey::Text(&stone.clarity),
            SortField::Luster => SortKey::Text(&stone.luster),
            SortField::Fluorescence => SortKey::Text(&stone.fluorescence),
            SortField::CertificateNumber => SortKey::Text(&stone.certificate_number),
            SortField::Treatment => SortKey::Text(&stone.treatment),
            SortField::Category => SortKey::Text(&stone.category),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortField {
    type Err = CatalogError;

    /// Accepts the wire name in any case, with or without underscores
    /// (`weightCt`, `weight_ct`, `WEIGHTCT`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == wanted)
            .ok_or_else(|| CatalogError::UnknownSortField(s.to_string()))
    }
}

/// A field value as seen by the comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Number(f64),
    Text(&'a str),
    Null,
}

impl SortKey<'_> {
    fn as_text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            SortKey::Number(n) => render_number(*n).into(),
            SortKey::Text(s) => (*s).into(),
            SortKey::Null => "".into(),
        }
    }
}

/// Compare two keys: numerically when both are numbers, otherwise as
/// collated text with null as the empty string.
pub fn compare_keys(a: &SortKey<'_>, b: &SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => collate(&a.as_text(), &b.as_text()),
    }
}

/// Case-insensitive ordering with case as the tie-breaker (lowercase first).
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Apply the direction to an ascending ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// The active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// The sort after the user picks `field`: the active field flips
    /// direction, a new field starts ascending.
    pub fn select(current: Option<SortSpec>, field: SortField) -> SortSpec {
        match current {
            Some(spec) if spec.field == field => Self::new(field, spec.direction.flip()),
            _ => Self::ascending(field),
        }
    }

    /// Compare two stones under this spec.
    pub fn compare(&self, a: &Stone, b: &Stone) -> Ordering {
        self.direction
            .apply(compare_keys(&self.field.key(a), &self.field.key(b)))
    }

    pub fn display_name(&self) -> String {
        let arrow = match self.direction {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        };
        format!("{} {}", self.field, arrow)
    }
}

/// Return the stones in a new vector, stably ordered by `spec`.
pub fn sort<'a, I>(stones: I, spec: &SortSpec) -> Vec<&'a Stone>
where
    I: IntoIterator<Item = &'a Stone>,
{
    let mut sorted: Vec<&Stone> = stones.into_iter().collect();
    sorted.sort_by(|a, b| spec.compare(a, b));
    tracing::debug!(
        field = spec.field.as_str(),
        direction = spec.direction.as_str(),
        count = sorted.len(),
        "sorted stones"
    );
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(sku: &str, weight: Option<f64>) -> Stone {
        let mut s = Stone::new(sku, sku);
        s.weight_ct = weight;
        s
    }

    fn skus(stones: &[&Stone]) -> Vec<String> {
        stones.iter().map(|s| s.sku.clone()).collect()
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("weightCt".parse::<SortField>().unwrap(), SortField::WeightCt);
        assert_eq!("weight_ct".parse::<SortField>().unwrap(), SortField::WeightCt);
        assert_eq!("SKU".parse::<SortField>().unwrap(), SortField::Sku);
        assert_eq!(
            "certificate-number".parse::<SortField>().unwrap(),
            SortField::CertificateNumber
        );
        assert!("rating".parse::<SortField>().is_err());
    }

    #[test]
    fn test_every_field_round_trips_its_name() {
        for field in SortField::ALL {
            assert_eq!(field.as_str().parse::<SortField>().unwrap(), field);
        }
    }

    #[test]
    fn test_select_toggles() {
        let spec = SortSpec::select(None, SortField::Sku);
        assert_eq!(spec, SortSpec::ascending(SortField::Sku));
        let spec = SortSpec::select(Some(spec), SortField::Sku);
        assert_eq!(spec.direction, SortDirection::Desc);
        let spec = SortSpec::select(Some(spec), SortField::Shape);
        assert_eq!(spec, SortSpec::ascending(SortField::Shape));
    }

    #[test]
    fn test_numeric_sort() {
        let stones = vec![
            weighted("A", Some(2.0)),
            weighted("B", Some(10.0)),
            weighted("C", Some(1.5)),
        ];
        let out = sort(&stones, &SortSpec::ascending(SortField::WeightCt));
        assert_eq!(skus(&out), vec!["C", "A", "B"]);
        let out = sort(&stones, &SortSpec::descending(SortField::WeightCt));
        assert_eq!(skus(&out), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_null_sorts_as_empty_string() {
        let stones = vec![weighted("A", Some(2.0)), weighted("B", None)];
        let out = sort(&stones, &SortSpec::ascending(SortField::WeightCt));
        assert_eq!(skus(&out), vec!["B", "A"]);
    }

    #[test]
    fn test_collation() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("ABC", "abd"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
        assert_eq!(collate("", "a"), Ordering::Less);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let mut stones = Vec::new();
        for sku in ["A", "B", "C", "D"] {
            let mut s = Stone::new(sku, sku);
            s.shape = "Oval".into();
            stones.push(s);
        }
        let out = sort(&stones, &SortSpec::descending(SortField::Shape));
        assert_eq!(skus(&out), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let stones = vec![weighted("B", Some(2.0)), weighted("A", Some(1.0))];
        let _ = sort(&stones, &SortSpec::ascending(SortField::WeightCt));
        assert_eq!(stones[0].sku, "B");
    }
}
