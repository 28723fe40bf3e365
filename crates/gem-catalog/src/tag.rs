//! Catalog tags.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::TagId;

/// A tag served by the tag endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// Display color, e.g. `"#2e7d32"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Number of stones carrying the tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stone_count: Option<u64>,
}

impl Tag {
    pub fn new(id: impl Into<TagId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            stone_count: None,
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the stone count.
    pub fn with_stone_count(mut self, count: u64) -> Self {
        self.stone_count = Some(count);
        self
    }

    /// Build a tag from a raw element of the tag array.
    ///
    /// Requires an object with a usable `id` and a string `name`; other
    /// fields are optional and ignored when mistyped.
    pub fn from_json(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;
        let id = obj.get("id").and_then(TagId::from_json)?;
        let name = obj.get("name")?.as_str()?.to_string();
        let color = obj
            .get("color")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let stone_count = obj.get("stone_count").and_then(Value::as_u64);

        Some(Self {
            id,
            name,
            color,
            stone_count,
        })
    }
}

/// Parse the tag endpoint payload.
///
/// A non-array payload yields an empty list; malformed elements are skipped.
pub fn parse_tags(payload: &Value) -> Vec<Tag> {
    let Value::Array(items) = payload else {
        tracing::warn!("tag payload is not an array");
        return Vec::new();
    };

    let tags: Vec<Tag> = items.iter().filter_map(Tag::from_json).collect();
    if tags.len() < items.len() {
        tracing::debug!(
            skipped = items.len() - tags.len(),
            "skipped malformed tag entries"
        );
    }
    tags
}
