//! Properties-file configuration source.

use super::ConfigSource;
use crate::core::{FlatStore, LeafConfiguration};
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Properties-file configuration source.
///
/// Reads `name = value` lines. Lines starting with `#` are comments, lines
/// without `=` are ignored, and both sides are trimmed. A name that appears
/// twice keeps its last value.
///
/// # Examples
///
/// ```rust,no_run
/// use layered_config::sources::FileSource;
///
/// let source = FileSource::new("config/config.properties");
/// ```
pub struct FileSource {
    path: PathBuf,
    priority: i32,
}

impl FileSource {
    /// Create a new properties-file source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            priority: 100,
        }
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ConfigSource for FileSource {
    fn load(&self) -> Result<FlatStore> {
        Ok(read_properties(&self.path)?.into())
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// Parse properties text into `(name, value)` pairs, in file order.
pub fn parse_properties(content: &str) -> Vec<(String, String)> {
    content
        .split(['\r', '\n'])
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Read a properties file into a map; later duplicates overwrite earlier ones.
pub(crate) fn read_properties(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(ConfigError::LoadError(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    tracing::trace!(path = %path.display(), "read properties file");
    Ok(parse_properties(&content).into_iter().collect())
}

/// Load a properties file into a root configuration.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be read.
pub fn file_configuration(path: impl AsRef<Path>) -> Result<LeafConfiguration> {
    Ok(LeafConfiguration::new(FileSource::new(path.as_ref()).load()?))
}
