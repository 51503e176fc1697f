// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Row keys.
//
// A row key is an ordered sequence of scalar parts; the order is part of
// the identity, not just formatting. Parts are `Eq + Hash` so keys can
// index the local cache; callers with fractional key parts format them as
// text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One scalar component of a row key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPart {
    /// A text component.
    Text(String),
    /// An integer component.
    Int(i64),
    /// A boolean component.
    Bool(bool),
}

impl KeyPart {
    /// The JSON value a mapper would embed in a document for this part.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            KeyPart::Text(s) => serde_json::Value::String(s.clone()),
            KeyPart::Int(i) => serde_json::Value::from(*i),
            KeyPart::Bool(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Text(s) => write!(f, "{s}"),
            KeyPart::Int(i) => write!(f, "{i}"),
            KeyPart::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::Text(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        KeyPart::Text(s)
    }
}

impl From<i64> for KeyPart {
    fn from(i: i64) -> Self {
        KeyPart::Int(i)
    }
}

impl From<bool> for KeyPart {
    fn from(b: bool) -> Self {
        KeyPart::Bool(b)
    }
}

/// An ordered sequence of key parts identifying one logical state cell.
/// Two keys are equal only when their parts match pairwise, in order.
pub type RowKey = Vec<KeyPart>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_part_of_identity() {
        let ab: RowKey = vec!["a".into(), "b".into()];
        let ba: RowKey = vec!["b".into(), "a".into()];
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_untagged_serialization() {
        let key: RowKey = vec!["word".into(), 7i64.into(), true.into()];
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json, serde_json::json!(["word", 7, true]));

        let back: RowKey = serde_json::from_value(json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyPart::from("storm").to_string(), "storm");
        assert_eq!(KeyPart::from(42i64).to_string(), "42");
        assert_eq!(KeyPart::from(false).to_string(), "false");
    }

    #[test]
    fn test_to_value() {
        assert_eq!(KeyPart::from("a").to_value(), serde_json::json!("a"));
        assert_eq!(KeyPart::from(1i64).to_value(), serde_json::json!(1));
    }
}
