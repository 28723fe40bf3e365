//! Newtype IDs for type-safe identifiers.
//!
//! The catalog service sends ids as either JSON strings or numbers, so both
//! collapse into a string-backed newtype here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A catalog identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Build an ID from a record's position in its source array.
            pub fn from_index(index: usize) -> Self {
                Self(index.to_string())
            }

            /// Build an ID from a raw JSON value.
            ///
            /// Strings and numbers are accepted; anything else (including an
            /// empty string) yields `None`.
            pub fn from_json(value: &serde_json::Value) -> Option<Self> {
                match value {
                    serde_json::Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
                    serde_json::Value::Number(n) => Some(Self(n.to_string())),
                    _ => None,
                }
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(StoneId);
define_id!(TagId);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_creation() {
        let id = StoneId::new("st-123");
        assert_eq!(id.as_str(), "st-123");
    }

    #[test]
    fn test_id_from_index() {
        assert_eq!(StoneId::from_index(7).as_str(), "7");
    }

    #[test]
    fn test_id_from_json() {
        assert_eq!(StoneId::from_json(&json!("abc")), Some(StoneId::new("abc")));
        assert_eq!(StoneId::from_json(&json!(42)), Some(StoneId::new("42")));
        assert_eq!(StoneId::from_json(&json!("")), None);
        assert_eq!(StoneId::from_json(&json!(null)), None);
        assert_eq!(StoneId::from_json(&json!({"nested": 1})), None);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = TagId::new("t-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t-1\"");
    }

    #[test]
    fn test_id_display() {
        let id = StoneId::new("st-789");
        assert_eq!(format!("{}", id), "st-789");
    }
}
