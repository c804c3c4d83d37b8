//! TOML document configuration source.
//!
//! Tables flatten into dotted keys. Arrays flatten into one sub-namespace per
//! element plus an `indexer` key listing the element tokens in order:
//!
//! ```toml
//! [[setup.model]]
//! index = "first"
//! title = "model1"
//! ```
//!
//! becomes `setup.model.first.index`, `setup.model.first.title` and
//! `setup.model.indexer = "first"`. Tokens are the positional indices unless
//! every element is a table with an `index` field, in which case those
//! values are used. Duplicated, empty or space-containing `index` values fall
//! back to positions. A string `<name>_indexer` next to the array replaces the
//! generated indexer value.

use super::ConfigSource;
use crate::core::key_path::{INDEX_SEPARATOR, SEPARATOR};
use crate::core::{DEFAULT_INDEXER, FlatStore, LeafConfiguration};
use crate::error::{ConfigError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use ::toml::{Table, Value};

const INDEX_FIELD: &str = "index";
const INDEXER_SUFFIX: &str = "_indexer";

/// TOML file configuration source.
///
/// # Examples
///
/// ```rust,no_run
/// use layered_config::sources::TomlSource;
///
/// let source = TomlSource::new("config/app.toml");
/// ```
pub struct TomlSource {
    path: PathBuf,
    priority: i32,
}

impl TomlSource {
    /// Create a new TOML file source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            priority: 100,
        }
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ConfigSource for TomlSource {
    fn load(&self) -> Result<FlatStore> {
        if !self.path.exists() {
            return Err(ConfigError::LoadError(format!(
                "Configuration file not found: {}",
                self.path.display()
            )));
        }
        let content = fs::read_to_string(&self.path)?;
        flatten_toml(&content)
    }

    fn name(&self) -> String {
        format!("toml:{}", self.path.display())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// Parse a TOML document and flatten it into a dotted-key store.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] if `content` is not valid TOML.
pub fn flatten_toml(content: &str) -> Result<FlatStore> {
    let table: Table =
        ::toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    let mut entries = Vec::new();
    flatten_table(None, &table, &mut entries);
    Ok(entries.into_iter().collect())
}

/// Parse a TOML document into a root configuration.
///
/// # Examples
///
/// ```rust
/// use layered_config::prelude::*;
///
/// let config = toml_configuration("a = [1.01, 1e-1]").unwrap();
/// assert_eq!(config.get_string("a.indexer").unwrap(), "0 1");
/// assert_eq!(config.get_string("a.1").unwrap(), "0.1");
/// ```
pub fn toml_configuration(content: &str) -> Result<LeafConfiguration> {
    Ok(LeafConfiguration::new(flatten_toml(content)?))
}

/// Load a TOML file into a root configuration.
pub fn toml_file_configuration(path: impl AsRef<Path>) -> Result<LeafConfiguration> {
    Ok(LeafConfiguration::new(TomlSource::new(path.as_ref()).load()?))
}

fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{SEPARATOR}{key}"),
        None => key.to_string(),
    }
}

fn flatten_table(prefix: Option<&str>, table: &Table, out: &mut Vec<(String, String)>) {
    for (key, value) in table {
        if let Some(array_name) = key.strip_suffix(INDEXER_SUFFIX) {
            if matches!(value, Value::String(_))
                && matches!(table.get(array_name), Some(Value::Array(_)))
            {
                // Emitted as the array's indexer below.
                continue;
            }
        }

        let path = join(prefix, key);
        match value {
            Value::Array(items) => {
                let explicit = match table.get(&format!("{key}{INDEXER_SUFFIX}")) {
                    Some(Value::String(tokens)) => Some(tokens.as_str()),
                    _ => None,
                };
                flatten_array(&path, items, explicit, out);
            }
            other => flatten_value(&path, other, out),
        }
    }
}

fn flatten_array(
    path: &str,
    items: &[Value],
    explicit: Option<&str>,
    out: &mut Vec<(String, String)>,
) {
    let tokens = array_tokens(path, items);
    for (token, item) in tokens.iter().zip(items) {
        flatten_value(&join(Some(path), token), item, out);
    }

    let indexer = match explicit {
        Some(tokens) => tokens.to_string(),
        None => tokens.join(INDEX_SEPARATOR),
    };
    out.push((join(Some(path), DEFAULT_INDEXER), indexer));
}

fn flatten_value(path: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Table(table) => flatten_table(Some(path), table, out),
        Value::Array(items) => flatten_array(path, items, None, out),
        scalar => out.push((path.to_string(), scalar_text(scalar))),
    }
}

/// Element tokens: the `index` fields if every element has one and they are
/// usable as tokens, else positions.
///
/// `index` values must be non-empty, unique and free of [`INDEX_SEPARATOR`];
/// otherwise elements would overwrite each other or the indexer could not be
/// resolved.
fn array_tokens(path: &str, items: &[Value]) -> Vec<String> {
    let indices: Option<Vec<String>> = items
        .iter()
        .map(|item| match item {
            Value::Table(table) => table.get(INDEX_FIELD).map(scalar_text),
            _ => None,
        })
        .collect();

    match indices {
        Some(indices) if !indices.is_empty() && usable_tokens(&indices) => indices,
        Some(indices) if !indices.is_empty() => {
            tracing::warn!(
                path,
                ?indices,
                "index fields are empty, duplicated or contain a space; using positions"
            );
            positions(items.len())
        }
        _ => positions(items.len()),
    }
}

fn usable_tokens(tokens: &[String]) -> bool {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .all(|token| !token.is_empty() && !token.contains(INDEX_SEPARATOR) && seen.insert(token))
}

fn positions(len: usize) -> Vec<String> {
    (0..len).map(|i| i.to_string()).collect()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(dt) => dt.to_string(),
        // Only reachable for an `index` field holding a collection.
        Value::Array(_) | Value::Table(_) => value.to_string(),
    }
}
