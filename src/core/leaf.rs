//! Single-source configuration over one flat store.

use super::configuration::{Configuration, RawValue};
use super::flat_store::FlatStore;
use super::key_path::{self, full_key, namespace_criteria, require_non_empty};
use crate::error::{ConfigError, Result};
use std::sync::{Arc, OnceLock};

/// A configuration backed by a single immutable [`FlatStore`].
///
/// Carving a namespace copies the matching entries into a new leaf whose keys
/// have the namespace prefix stripped. The child remembers the fully
/// qualified namespace so that error messages always report complete paths.
///
/// # Examples
///
/// ```rust
/// use layered_config::prelude::*;
///
/// # fn example() -> Result<()> {
/// let config = LeafConfiguration::new(FlatStore::from([("a.b.c.url", "not a url")]));
/// let err = config
///     .get_namespace("a")?
///     .get_namespace("b")?
///     .get_namespace("c")?
///     .get_url("url")
///     .unwrap_err();
/// assert!(err.to_string().contains("a.b.c.url"));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug)]
pub struct LeafConfiguration {
    store: FlatStore,
    namespace: Option<String>,
    keys: OnceLock<Vec<String>>,
}

impl LeafConfiguration {
    /// Create a root configuration over `store`.
    pub fn new(store: impl Into<FlatStore>) -> Self {
        Self {
            store: store.into(),
            namespace: None,
            keys: OnceLock::new(),
        }
    }

    /// Create a configuration that reports `namespace` as its carved path.
    ///
    /// The keys of `store` are taken as already relative to `namespace`.
    pub fn with_namespace(store: impl Into<FlatStore>, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            store: store.into(),
            namespace: (!namespace.is_empty()).then_some(namespace),
            keys: OnceLock::new(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &FlatStore {
        &self.store
    }

    /// Carve `namespace` into a new leaf.
    pub fn carve(&self, namespace: &str) -> Result<LeafConfiguration> {
        require_non_empty(namespace, "namespace")?;
        let full_namespace = full_key(self.namespace.as_deref(), namespace);
        let store = self.store.strip_prefix(&namespace_criteria(namespace));
        if store.is_empty() {
            return Err(ConfigError::NamespaceNotFound {
                namespace: full_namespace,
            });
        }

        tracing::debug!(
            namespace = %full_namespace,
            keys = store.len(),
            "carved configuration namespace"
        );
        Ok(Self::with_namespace(store, full_namespace))
    }
}

impl Configuration for LeafConfiguration {
    fn configuration_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn keys(&self) -> &[String] {
        self.keys
            .get_or_init(|| self.store.keys().map(str::to_string).collect())
    }

    fn lookup(&self, key: &str) -> Result<Option<RawValue<'_>>> {
        require_non_empty(key, "key")?;
        Ok(self.store.get(key).map(|value| RawValue {
            value,
            namespace: self.configuration_namespace(),
        }))
    }

    fn has(&self, key: &str) -> Result<bool> {
        require_non_empty(key, "key")?;
        Ok(self.store.contains_key(key))
    }

    fn has_non_empty(&self, key: &str) -> Result<bool> {
        require_non_empty(key, "key")?;
        Ok(self.store.get(key).is_some_and(|value| !value.is_empty()))
    }

    fn has_namespace(&self, namespace: &str) -> Result<bool> {
        require_non_empty(namespace, "namespace")?;
        Ok(self.store.has_prefixed(&namespace_criteria(namespace)))
    }

    fn get_namespace(&self, namespace: &str) -> Result<Arc<dyn Configuration>> {
        Ok(Arc::new(self.carve(namespace)?))
    }

    fn get_indexer(&self, indexer_name: &str) -> Result<Vec<Arc<dyn Configuration>>> {
        require_non_empty(indexer_name, "indexer_name")?;
        let tokens = self.get_string(indexer_name)?;
        tokens
            .split(key_path::INDEX_SEPARATOR)
            .filter(|token| !token.is_empty())
            .map(|token| self.get_namespace(token))
            .collect()
    }
}
