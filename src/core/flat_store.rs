//! Immutable dotted-key dictionary backing a leaf configuration.

use std::collections::HashMap;

/// An immutable mapping from a dotted key (`"a.b.c"`) to a raw string value.
///
/// Sources build a `FlatStore` once; after construction it is only read.
/// Empty keys are dropped on construction, so every stored key is non-empty.
///
/// # Examples
///
/// ```rust
/// use layered_config::core::FlatStore;
///
/// let store = FlatStore::from([("server.port", "8080"), ("server.host", "localhost")]);
/// assert_eq!(store.get("server.port"), Some("8080"));
/// assert_eq!(store.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatStore {
    entries: HashMap<String, String>,
}

impl FlatStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Check whether `key` is stored.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over all stored keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if any key starts with `criteria` and has a non-empty remainder.
    pub(crate) fn has_prefixed(&self, criteria: &str) -> bool {
        self.entries
            .keys()
            .any(|key| key.len() > criteria.len() && key.starts_with(criteria))
    }

    /// Copy every entry whose key starts with `criteria`, stripping it.
    pub(crate) fn strip_prefix(&self, criteria: &str) -> FlatStore {
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(criteria)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for FlatStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { entries }
    }
}

impl From<HashMap<String, String>> for FlatStore {
    fn from(mut entries: HashMap<String, String>) -> Self {
        entries.remove("");
        Self { entries }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FlatStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
