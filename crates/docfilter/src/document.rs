//! The compiled filter document.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::op::Operator;
use crate::value::FilterValue;

/// Operators and values recorded under one document key.
pub type OperatorMap = BTreeMap<Operator, FilterValue>;

/// A filter document: target key -> operator -> value.
///
/// Serializes to the shape document stores expect, for example
/// `{"age": {"$gte": 18, "$lt": 65}, "name": {"$regex": "^a"}}`.
///
/// Every key present holds at least one operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterDocument {
    entries: BTreeMap<String, OperatorMap>,
}

impl FilterDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        FilterDocument::default()
    }

    /// Returns the operators recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&OperatorMap> {
        self.entries.get(key)
    }

    /// Returns the value recorded for `key` under `op`.
    pub fn value(&self, key: &str, op: Operator) -> Option<&FilterValue> {
        self.entries.get(key).and_then(|ops| ops.get(&op))
    }

    /// Returns `true` if `key` has any operator recorded.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the top-level keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(key, operators)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, OperatorMap> {
        self.entries.iter()
    }

    /// Renders the document as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // Keys are strings and values are plain scalars/arrays; this cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Sets `op` under `key`, replacing any value already recorded for that pair.
    pub(crate) fn insert(&mut self, key: String, op: Operator, value: FilterValue) {
        match self.entries.entry(key) {
            btree_map::Entry::Occupied(mut slot) => {
                slot.get_mut().insert(op, value);
            }
            btree_map::Entry::Vacant(slot) => {
                slot.insert(BTreeMap::from([(op, value)]));
            }
        }
    }
}

impl<'a> IntoIterator for &'a FilterDocument {
    type Item = (&'a String, &'a OperatorMap);
    type IntoIter = btree_map::Iter<'a, String, OperatorMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for FilterDocument {
    type Item = (String, OperatorMap);
    type IntoIter = btree_map::IntoIter<String, OperatorMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_creates_entry() {
        let mut doc = FilterDocument::new();
        doc.insert("age".into(), Operator::Gte, FilterValue::Int(18));

        assert_eq!(doc.len(), 1);
        assert!(doc.contains_key("age"));
        assert_eq!(doc.value("age", Operator::Gte), Some(&FilterValue::Int(18)));
    }

    #[test]
    fn insert_merges_operators() {
        let mut doc = FilterDocument::new();
        doc.insert("age".into(), Operator::Gte, FilterValue::Int(18));
        doc.insert("age".into(), Operator::Lt, FilterValue::Int(65));

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("age").map(|ops| ops.len()), Some(2));
    }

    #[test]
    fn insert_same_pair_last_write_wins() {
        let mut doc = FilterDocument::new();
        doc.insert("age".into(), Operator::Eq, FilterValue::Int(1));
        doc.insert("age".into(), Operator::Eq, FilterValue::Int(2));

        assert_eq!(doc.value("age", Operator::Eq), Some(&FilterValue::Int(2)));
    }

    #[test]
    fn serializes_to_store_shape() {
        let mut doc = FilterDocument::new();
        doc.insert("age".into(), Operator::Gte, FilterValue::Int(18));
        doc.insert("age".into(), Operator::Lte, FilterValue::Int(30));
        doc.insert("name".into(), Operator::Regex, FilterValue::from("^a"));

        assert_eq!(
            doc.to_json(),
            json!({
                "age": { "$gte": 18, "$lte": 30 },
                "name": { "$regex": "^a" },
            })
        );
    }

    #[test]
    fn empty_document() {
        let doc = FilterDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.keys().count(), 0);
        assert_eq!(doc.to_json(), json!({}));
    }
}
