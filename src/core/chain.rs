//! Composite configuration with first-match-wins precedence.

use super::configuration::{Configuration, RawValue};
use super::key_path::{full_key, require_non_empty};
use crate::error::{ConfigError, Result};
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

/// An ordered stack of configurations presented as one.
///
/// Item 0 has the highest priority. A scalar read is handled entirely by the
/// first item that has the key: a value that fails conversion there is an
/// error, it never falls through to a lower-priority item.
///
/// A key equal to a namespace whose value is the empty string masks that
/// namespace: items below the masking item no longer contribute to it.
///
/// # Examples
///
/// ```rust
/// use layered_config::prelude::*;
/// use std::sync::Arc;
///
/// # fn example() -> Result<()> {
/// let defaults = LeafConfiguration::new(FlatStore::from([
///     ("db.host", "localhost"),
///     ("db.ssl.ca", "/etc/ca.crt"),
/// ]));
/// let overrides = LeafConfiguration::new(FlatStore::from([
///     ("db.host", "db.internal"),
///     ("db.ssl", ""),
/// ]));
///
/// let config = chain_configuration([
///     Arc::new(overrides) as Arc<dyn Configuration>,
///     Arc::new(defaults) as Arc<dyn Configuration>,
/// ])?;
/// assert_eq!(config.get_string("db.host")?, "db.internal");
/// assert!(!config.has_namespace("db.ssl")?);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug)]
pub struct ChainConfiguration {
    items: Vec<Arc<dyn Configuration>>,
    keys: OnceLock<Vec<String>>,
}

impl ChainConfiguration {
    /// Create a chain, highest priority first.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidArgument`] if `items` is empty.
    pub fn new(items: Vec<Arc<dyn Configuration>>) -> Result<Self> {
        if items.is_empty() {
            return Err(ConfigError::InvalidArgument("configurations"));
        }
        tracing::debug!(items = items.len(), "created configuration chain");
        Ok(Self {
            items,
            keys: OnceLock::new(),
        })
    }

    /// The chained configurations, highest priority first.
    pub fn items(&self) -> &[Arc<dyn Configuration>] {
        &self.items
    }

    fn first(&self) -> &Arc<dyn Configuration> {
        // Non-empty by construction.
        &self.items[0]
    }

    fn first_having(&self, key: &str) -> Result<Option<&Arc<dyn Configuration>>> {
        for item in &self.items {
            if item.has(key)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Items that contribute keys under `namespace`, in precedence order.
    ///
    /// The scan stops at the first item that masks the namespace.
    fn contributors(&self, namespace: &str) -> Result<Vec<&Arc<dyn Configuration>>> {
        require_non_empty(namespace, "namespace")?;
        let mut found = Vec::new();
        for (index, item) in self.items.iter().enumerate() {
            if item.has_namespace(namespace)? {
                found.push(item);
            } else if masks(item.as_ref(), namespace)? {
                tracing::debug!(namespace, item = index, "namespace masked in chain");
                break;
            }
        }
        Ok(found)
    }
}

/// An empty value stored at the namespace's own key hides the namespace.
fn masks(item: &dyn Configuration, namespace: &str) -> Result<bool> {
    Ok(item
        .lookup(namespace)?
        .is_some_and(|raw| raw.value.is_empty()))
}

/// Chain existing configurations, highest priority first.
///
/// # Errors
///
/// [`ConfigError::InvalidArgument`] if no configuration is given.
pub fn chain_configuration(
    configurations: impl IntoIterator<Item = Arc<dyn Configuration>>,
) -> Result<ChainConfiguration> {
    ChainConfiguration::new(configurations.into_iter().collect())
}

impl Configuration for ChainConfiguration {
    fn configuration_namespace(&self) -> Option<&str> {
        self.first().configuration_namespace()
    }

    fn keys(&self) -> &[String] {
        self.keys.get_or_init(|| {
            self.items
                .iter()
                .flat_map(|item| item.keys().iter().cloned())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        })
    }

    fn lookup(&self, key: &str) -> Result<Option<RawValue<'_>>> {
        match self.first_having(key)? {
            Some(item) => item.lookup(key),
            None => Ok(None),
        }
    }

    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.first_having(key)?.is_some())
    }

    fn has_non_empty(&self, key: &str) -> Result<bool> {
        match self.first_having(key)? {
            Some(item) => item.has_non_empty(key),
            None => Ok(false),
        }
    }

    fn has_namespace(&self, namespace: &str) -> Result<bool> {
        Ok(!self.contributors(namespace)?.is_empty())
    }

    fn get_namespace(&self, namespace: &str) -> Result<Arc<dyn Configuration>> {
        let carved = self
            .contributors(namespace)?
            .into_iter()
            .map(|item| item.get_namespace(namespace))
            .collect::<Result<Vec<_>>>()?;
        if carved.is_empty() {
            return Err(ConfigError::NamespaceNotFound {
                namespace: full_key(self.configuration_namespace(), namespace),
            });
        }
        Ok(Arc::new(ChainConfiguration::new(carved)?))
    }

    fn get_indexer(&self, indexer_name: &str) -> Result<Vec<Arc<dyn Configuration>>> {
        match self.first_having(indexer_name)? {
            Some(item) => item.get_indexer(indexer_name),
            None => self.first().get_indexer(indexer_name),
        }
    }
}
