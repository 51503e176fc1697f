// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document model for the Sluice store layer.
//
// A document is a flat JSON object. The store owns no schema: the shape of
// stored documents, retrieval predicates, and update documents is entirely
// decided by the row mapper in the state layer. This module only provides
// the matching and projection primitives the drivers share.

use serde_json::Value;

/// A store-native document: an ordered JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Build a [`Document`] from a `serde_json::Value`, if it is an object.
///
/// Convenient with the `json!` macro:
///
/// ```rust
/// use sluice_store::document::from_value;
/// let doc = from_value(serde_json::json!({"word": "storm", "count": 3})).unwrap();
/// assert_eq!(doc.get("count"), Some(&serde_json::json!(3)));
/// ```
pub fn from_value(value: Value) -> Option<Document> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Equality-predicate matching: every field of `filter` must be present in
/// `doc` with an equal value. An empty filter matches every document.
pub fn matches(filter: &Document, doc: &Document) -> bool {
    filter.iter().all(|(k, v)| doc.get(k) == Some(v))
}

/// Keep only the fields of `doc` that `projection` names with a truthy
/// value (anything other than `false`, `0`, or `null`).
pub fn project(doc: &Document, projection: &Document) -> Document {
    doc.iter()
        .filter(|(k, _)| projection.get(*k).is_some_and(included))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn included(flag: &Value) -> bool {
    match flag {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        from_value(v).unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(from_value(json!([1, 2, 3])).is_none());
        assert!(from_value(json!("scalar")).is_none());
        assert!(from_value(json!({"a": 1})).is_some());
    }

    #[test]
    fn test_matches_subset_of_fields() {
        let stored = doc(json!({"word": "storm", "count": 3, "lang": "en"}));
        assert!(matches(&doc(json!({"word": "storm"})), &stored));
        assert!(matches(&doc(json!({"word": "storm", "count": 3})), &stored));
        assert!(!matches(&doc(json!({"word": "storm", "count": 4})), &stored));
        assert!(!matches(&doc(json!({"missing": 1})), &stored));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let stored = doc(json!({"anything": true}));
        assert!(matches(&Document::new(), &stored));
    }

    #[test]
    fn test_project_keeps_named_truthy_fields() {
        let stored = doc(json!({"word": "storm", "count": 3, "lang": "en"}));
        let projection = doc(json!({"word": 1, "count": true, "lang": 0}));
        let projected = project(&stored, &projection);
        assert_eq!(projected.len(), 2);
        assert_eq!(projected.get("word"), Some(&json!("storm")));
        assert_eq!(projected.get("count"), Some(&json!(3)));
        assert!(!projected.contains_key("lang"));
    }

    #[test]
    fn test_project_ignores_fields_absent_from_projection() {
        let stored = doc(json!({"a": 1, "b": 2}));
        let projected = project(&stored, &doc(json!({"a": 1})));
        assert_eq!(projected.len(), 1);
        assert!(projected.contains_key("a"));
    }
}
