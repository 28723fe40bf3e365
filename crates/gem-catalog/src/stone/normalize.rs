//! Conversion of loosely-typed catalog rows into [`Stone`] records.
//!
//! Nothing here fails. Unexpected payload shapes normalize to an empty list,
//! and a malformed field falls back to its default without dropping the
//! record.

use gem_pricing::parse_leading_float;
use serde_json::{Map, Value};

use crate::ids::StoneId;
use crate::stone::{Stone, NOT_AVAILABLE};

/// Normalize a catalog response.
///
/// Accepts `{ "stones": [...] }` or a bare array. Anything else yields an
/// empty list.
pub fn normalize_catalog(payload: &Value) -> Vec<Stone> {
    match payload {
        Value::Array(_) => normalize_stones(payload),
        Value::Object(obj) => match obj.get("stones") {
            Some(rows @ Value::Array(_)) => normalize_stones(rows),
            _ => {
                tracing::warn!("catalog payload has no stones array");
                Vec::new()
            }
        },
        _ => {
            tracing::warn!("catalog payload is neither an array nor an object");
            Vec::new()
        }
    }
}

/// Normalize an array of raw rows, in order. A non-array yields an empty list.
pub fn normalize_stones(rows: &Value) -> Vec<Stone> {
    let Value::Array(rows) = rows else {
        return Vec::new();
    };

    let stones: Vec<Stone> = rows
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_stone(raw, index))
        .collect();

    tracing::debug!(count = stones.len(), "normalized stones");
    stones
}

/// Normalize a single raw row found at `index` in its source array.
///
/// A row that is not an object still produces a stone with every field at its
/// default.
pub fn normalize_stone(raw: &Value, index: usize) -> Stone {
    let empty = Map::new();
    let row = raw.as_object().unwrap_or(&empty);

    let id = row
        .get("id")
        .and_then(StoneId::from_json)
        .unwrap_or_else(|| StoneId::from_index(index));

    Stone {
        id,
        sku: text_field(row, "sku", ""),
        shape: text_field(row, "shape", ""),
        weight_ct: number_field(row, "weightCt"),
        measurements: text_field(row, "measurements", ""),
        price_total: number_field(row, "priceTotal"),
        price_per_ct: number_field(row, "pricePerCt"),
        image_url: url_field(row, "imageUrl"),
        video_url: url_field(row, "videoUrl"),
        certificate_url: url_field(row, "certificateUrl"),
        lab: text_field(row, "lab", NOT_AVAILABLE),
        origin: text_field(row, "origin", NOT_AVAILABLE),
        ratio: number_field(row, "ratio"),
        color: text_field(row, "color", ""),
        clarity: text_field(row, "clarity", ""),
        luster: text_field(row, "luster", ""),
        fluorescence: text_field(row, "fluorescence", ""),
        certificate_number: text_field(row, "certificateNumber", ""),
        treatment: text_field(row, "treatment", ""),
        category: text_field(row, "category", ""),
    }
}

/// Coerce a numeric field. Null, missing and `""` are unknown; so is anything
/// that does not parse to a finite number.
fn number_field(row: &Map<String, Value>, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => parse_leading_float(s),
        _ => None,
    }
}

/// Coerce a text field. Scalars are rendered as text; null, missing and
/// structured values fall back to `default`.
fn text_field(row: &Map<String, Value>, key: &str, default: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

fn url_field(row: &Map<String, Value>, key: &str) -> Option<String> {
    match row.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
