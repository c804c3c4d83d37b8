//! The read contract shared by leaf and chained configurations.

use super::convert::{self, Conversion};
use super::key_path::full_key;
use crate::error::{ConfigError, Result};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Name of the key read by [`Configuration::get_default_indexer`].
pub const DEFAULT_INDEXER: &str = "indexer";

/// A raw value found by [`Configuration::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawValue<'a> {
    /// The stored string.
    pub value: &'a str,
    /// Namespace of the configuration that holds the value.
    pub namespace: Option<&'a str>,
}

/// Read-only, namespace-aware access to configuration values.
///
/// Implemented by [`LeafConfiguration`](super::LeafConfiguration), which wraps
/// a single [`FlatStore`](super::FlatStore), and by
/// [`ChainConfiguration`](super::ChainConfiguration), which layers several
/// configurations with first-match-wins precedence. Both compose freely: a
/// chain of chains is a valid configuration.
///
/// Values are stored as strings and converted on read. Conversions are strict
/// (see the individual getters). Every key-taking method rejects an empty key
/// with [`ConfigError::InvalidArgument`].
///
/// # Examples
///
/// ```rust
/// use layered_config::prelude::*;
///
/// # fn example() -> Result<()> {
/// let config = LeafConfiguration::new(FlatStore::from([
///     ("server.port", "8080"),
///     ("server.tls", "enabled"),
/// ]));
///
/// let server = config.get_namespace("server")?;
/// assert_eq!(server.get_integer("port")?, 8080);
/// assert!(server.get_enabled("tls")?);
/// assert_eq!(server.get_integer_or("workers", 4)?, 4);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub trait Configuration: fmt::Debug + Send + Sync {
    /// Dotted namespace this view was carved from, `None` for a root.
    fn configuration_namespace(&self) -> Option<&str>;

    /// All keys visible through this configuration, in no particular order.
    fn keys(&self) -> &[String];

    /// Find the raw value stored for `key`, or `None` if absent.
    fn lookup(&self, key: &str) -> Result<Option<RawValue<'_>>>;

    /// Check whether a value is stored for `key`.
    fn has(&self, key: &str) -> Result<bool>;

    /// Check whether a non-empty value is stored for `key`.
    fn has_non_empty(&self, key: &str) -> Result<bool>;

    /// Check whether any key lives under `namespace`.
    fn has_namespace(&self, namespace: &str) -> Result<bool>;

    /// Carve the sub-configuration holding every key under `namespace`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NamespaceNotFound`] with the fully qualified namespace if
    /// no key lives under it.
    fn get_namespace(&self, namespace: &str) -> Result<Arc<dyn Configuration>>;

    /// Resolve the space-separated tokens stored at `indexer_name` into the
    /// sub-configurations they name, in order.
    fn get_indexer(&self, indexer_name: &str) -> Result<Vec<Arc<dyn Configuration>>>;

    /// Same as [`get_namespace`](Self::get_namespace).
    #[deprecated(note = "use `get_namespace` instead")]
    fn get_configuration(&self, namespace: &str) -> Result<Arc<dyn Configuration>> {
        self.get_namespace(namespace)
    }

    /// [`get_indexer`](Self::get_indexer) for the `"indexer"` key.
    fn get_default_indexer(&self) -> Result<Vec<Arc<dyn Configuration>>> {
        self.get_indexer(DEFAULT_INDEXER)
    }

    /// Get the raw stored value.
    fn get(&self, key: &str) -> Result<String> {
        resolve(self, key, None, &convert::STRING)
    }

    /// Get the raw stored value, or `default` if absent.
    fn get_or(&self, key: &str, default: &str) -> Result<String> {
        resolve(self, key, Some(default.to_string()), &convert::STRING)
    }

    /// Get a string value.
    fn get_string(&self, key: &str) -> Result<String> {
        resolve(self, key, None, &convert::STRING)
    }

    /// Get a string value, or `default` if absent.
    fn get_string_or(&self, key: &str, default: &str) -> Result<String> {
        resolve(self, key, Some(default.to_string()), &convert::STRING)
    }

    /// Get an integer. The stored text must be the canonical decimal form
    /// (`"7"`, not `"007"` or `"+7"`).
    fn get_integer(&self, key: &str) -> Result<i64> {
        resolve(self, key, None, &convert::INTEGER)
    }

    /// Get an integer, or `default` if absent.
    fn get_integer_or(&self, key: &str, default: i64) -> Result<i64> {
        resolve(self, key, Some(default), &convert::INTEGER)
    }

    /// Get a float. The stored text must be the shortest form that
    /// reproduces the number (`"0.1"`, not `"1e-1"` or `"0.10"`).
    fn get_float(&self, key: &str) -> Result<f64> {
        resolve(self, key, None, &convert::FLOAT)
    }

    /// Get a float, or `default` if absent.
    fn get_float_or(&self, key: &str, default: f64) -> Result<f64> {
        resolve(self, key, Some(default), &convert::FLOAT)
    }

    /// Get a boolean stored as exactly `"true"` or `"false"`.
    fn get_boolean(&self, key: &str) -> Result<bool> {
        resolve(self, key, None, &convert::BOOLEAN)
    }

    /// Get a boolean, or `default` if absent.
    fn get_boolean_or(&self, key: &str, default: bool) -> Result<bool> {
        resolve(self, key, Some(default), &convert::BOOLEAN)
    }

    /// Get a switch stored as exactly `"enabled"` or `"disabled"`.
    fn get_enabled(&self, key: &str) -> Result<bool> {
        resolve(self, key, None, &convert::ENABLED)
    }

    /// Get a switch, or `default` if absent.
    fn get_enabled_or(&self, key: &str, default: bool) -> Result<bool> {
        resolve(self, key, Some(default), &convert::ENABLED)
    }

    /// Get bytes stored as canonical padded base64.
    ///
    /// A rejected value is masked in the error message.
    fn get_base64(&self, key: &str) -> Result<Vec<u8>> {
        resolve(self, key, None, &convert::BASE64)
    }

    /// Get base64 bytes, or `default` if absent.
    fn get_base64_or(&self, key: &str, default: Vec<u8>) -> Result<Vec<u8>> {
        resolve(self, key, Some(default), &convert::BASE64)
    }

    /// Get an absolute URL.
    fn get_url(&self, key: &str) -> Result<Url> {
        resolve(self, key, None, &convert::URL)
    }

    /// Get an absolute URL, or `default` if absent.
    fn get_url_or(&self, key: &str, default: Url) -> Result<Url> {
        resolve(self, key, Some(default), &convert::URL)
    }
}

/// Look `key` up and convert it, falling back to `default` only when absent.
fn resolve<C, T>(
    config: &C,
    key: &str,
    default: Option<T>,
    conversion: &Conversion<T>,
) -> Result<T>
where
    C: Configuration + ?Sized,
{
    match config.lookup(key)? {
        Some(raw) => (conversion.parse)(raw.value).ok_or_else(|| ConfigError::BadType {
            key: full_key(raw.namespace, key),
            value: (conversion.preview)(raw.value),
            expected: conversion.expected,
        }),
        None => default.ok_or_else(|| ConfigError::KeyNotFound {
            key: full_key(config.configuration_namespace(), key),
        }),
    }
}
