use indexmap::IndexMap;

use crate::prelude_internal::*;

/// Keyed values in insertion order. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct Map(IndexMap<String, Value>);

impl Map {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Mapping stored under `key`, created empty when absent. Any other
    /// value already stored there is replaced.
    pub fn mapping_entry(&mut self, key: &str) -> &mut Map {
        self.0
            .entry(key.to_string())
            .or_insert_with(Value::empty_mapping)
            .require_mapping()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Ordered list elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct List(Vec<Value>);

impl List {
    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.0.get_mut(index)
    }

    pub fn last(&self) -> Option<&Value> {
        self.0.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Value> {
        self.0.last_mut()
    }

    /// Last element, pushing `default()` first when the list is empty.
    pub fn last_or_push_with(&mut self, default: impl FnOnce() -> Value) -> &mut Value {
        if self.0.is_empty() {
            self.0.push(default());
        }
        let index = self.0.len() - 1;
        &mut self.0[index]
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl FromIterator<Value> for List {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_equality_ignores_order() {
        let a = Map::from_iter([("x", Value::from("1")), ("y", Value::from("2"))]);
        let b = Map::from_iter([("y", Value::from("2")), ("x", Value::from("1"))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_map_insert_keeps_position() {
        let mut map = Map::from_iter([("x", Value::from("1")), ("y", Value::from("2"))]);
        map.insert("x", Value::from("3"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(map.get("x"), Some(&Value::from("3")));
    }

    #[test]
    fn test_mapping_entry_creates_and_reuses() {
        let mut map = Map::new();
        map.mapping_entry("scope").insert("a", Value::from("1"));
        map.mapping_entry("scope").insert("b", Value::from("2"));
        assert_eq!(map.get("scope").and_then(Value::as_mapping).map(Map::len), Some(2));
    }

    #[test]
    fn test_mapping_entry_replaces_other_values() {
        let mut map = Map::from_iter([("scope", Value::from("text"))]);
        assert!(map.mapping_entry("scope").is_empty());
        assert_eq!(map.get("scope"), Some(&Value::empty_mapping()));
    }
}
