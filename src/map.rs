//! Ordered record type for the value tree.
//!
//! This module provides [`Record`], a wrapper around [`IndexMap`] that keeps
//! the KeySet order of its fields. Field order matters in both formats: it is
//! the column order of a CSV row and the element order of an XML record.
//!
//! ## Duplicate keys
//!
//! A record holds each key once. [`Record::insert`] replaces the value of an
//! existing key in place, keeping the key's original position. Decoders
//! that meet a repeated key (two sibling XML elements with the same tag) keep
//! the first occurrence, matching keyed lookup, which resolves to the first
//! matching element.
//!
//! ## Examples
//!
//! ```rust
//! use serde_csvxml::{Record, Value};
//!
//! let mut record = Record::new();
//! record.insert("name".to_string(), Value::from("Alice"));
//! record.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(record.len(), 2);
//! assert_eq!(record.get("age").and_then(|v| v.as_str()), Some("30"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of field names to values.
///
/// # Examples
///
/// ```rust
/// use serde_csvxml::{Record, Value};
///
/// let mut record = Record::new();
/// record.insert("first".to_string(), Value::from(1));
/// record.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = record.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record(IndexMap<String, crate::Value>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Record(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Record(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the record.
    ///
    /// If the record already contained this key, the old value is replaced in
    /// place and returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_csvxml::{Record, Value};
    ///
    /// let mut record = Record::new();
    /// assert!(record.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(record.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Inserts only if `key` is not present yet; returns whether it was inserted.
    pub fn insert_first(&mut self, key: String, value: crate::Value) -> bool {
        match self.0.entry(key) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Removes `key`, keeping the order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Position of `key` in the KeySet.
    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.0.get_index_of(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the record, in KeySet order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the record, in KeySet order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the fields of the record, in KeySet order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for Record {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        Record(map.into_iter().collect())
    }
}

impl From<Record> for HashMap<String, crate::Value> {
    fn from(record: Record) -> Self {
        record.0.into_iter().collect()
    }
}

impl IntoIterator for Record {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        Record(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = Record::new();
        record.insert("a".to_string(), Value::from("1"));
        record.insert("b".to_string(), Value::from("2"));
        record.insert("a".to_string(), Value::from("3"));

        let keys: Vec<_> = record.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&Value::from("3")));
    }

    #[test]
    fn test_insert_first_keeps_first() {
        let mut record = Record::new();
        assert!(record.insert_first("a".to_string(), Value::from("1")));
        assert!(!record.insert_first("a".to_string(), Value::from("2")));
        assert_eq!(record.get("a"), Some(&Value::from("1")));
        assert_eq!(record.index_of("a"), Some(0));
        assert_eq!(record.index_of("z"), None);
    }
}
