//! The digit-to-glyph substitution table.
//!
//! The table is an external, versioned asset. This module only knows its
//! shape: one glyph for each of `"0"`..`"9"`, `"00"` and `"000"`. Files look
//! like
//!
//! ```toml
//! "0" = "…"
//! "1" = "…"
//! # … through "9"
//! "00" = "…"
//! "000" = "…"
//! ```
//!
//! or the equivalent JSON object.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Symbols every table must define, in canonical order.
pub const SYMBOLS: [&str; 12] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "00", "000",
];

/// A validated glyph table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, String>", into = "BTreeMap<String, String>")]
pub struct PriceCipherTable {
    digits: [String; 10],
    double_zero: String,
    triple_zero: String,
}

impl PriceCipherTable {
    /// Build a table from a symbol → glyph map.
    ///
    /// Every symbol in [`SYMBOLS`] is required and must map to a non-empty
    /// glyph. Unknown keys are rejected.
    pub fn from_map(map: HashMap<String, String>) -> Result<Self, CodecError> {
        if let Some(unknown) = map.keys().find(|k| !SYMBOLS.contains(&k.as_str())) {
            return Err(CodecError::UnknownSymbol(unknown.clone()));
        }

        let glyph = |symbol: &str| -> Result<String, CodecError> {
            match map.get(symbol) {
                Some(g) if g.is_empty() => Err(CodecError::EmptyGlyph(symbol.to_string())),
                Some(g) => Ok(g.clone()),
                None => Err(CodecError::MissingSymbol(symbol.to_string())),
            }
        };

        Ok(Self {
            digits: [
                glyph("0")?,
                glyph("1")?,
                glyph("2")?,
                glyph("3")?,
                glyph("4")?,
                glyph("5")?,
                glyph("6")?,
                glyph("7")?,
                glyph("8")?,
                glyph("9")?,
            ],
            double_zero: glyph("00")?,
            triple_zero: glyph("000")?,
        })
    }

    /// Parse a table from a JSON object.
    pub fn from_json(source: &str) -> Result<Self, CodecError> {
        let map: HashMap<String, String> = serde_json::from_str(source)?;
        Self::from_map(map)
    }

    /// Parse a table from a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, CodecError> {
        let map: HashMap<String, String> = toml::from_str(source)?;
        Self::from_map(map)
    }

    /// Load a table from disk; `.json` files are parsed as JSON, anything else
    /// as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CodecError::Table(format!("{}: {}", path.display(), e)))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Glyph for a single character, if the character is a digit.
    pub fn digit(&self, c: char) -> Option<&str> {
        c.to_digit(10).map(|d| self.digits[d as usize].as_str())
    }

    /// Glyph for a run of two zeros.
    pub fn double_zero(&self) -> &str {
        &self.double_zero
    }

    /// Glyph for a run of three zeros.
    pub fn triple_zero(&self) -> &str {
        &self.triple_zero
    }

    /// Look up any table symbol.
    pub fn glyph(&self, symbol: &str) -> Option<&str> {
        match symbol {
            "00" => Some(self.double_zero()),
            "000" => Some(self.triple_zero()),
            s if s.len() == 1 => s.chars().next().and_then(|c| self.digit(c)),
            _ => None,
        }
    }
}

impl TryFrom<HashMap<String, String>> for PriceCipherTable {
    type Error = CodecError;

    fn try_from(map: HashMap<String, String>) -> Result<Self, Self::Error> {
        Self::from_map(map)
    }
}

impl From<PriceCipherTable> for BTreeMap<String, String> {
    fn from(table: PriceCipherTable) -> Self {
        let mut map = BTreeMap::new();
        for (d, glyph) in table.digits.into_iter().enumerate() {
            map.insert(d.to_string(), glyph);
        }
        map.insert("00".to_string(), table.double_zero);
        map.insert("000".to_string(), table.triple_zero);
        map
    }
}
