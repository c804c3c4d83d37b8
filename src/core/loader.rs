//! Configuration loader that layers multiple sources into a chain.

use crate::core::{ChainConfiguration, Configuration, FlatStore, LeafConfiguration};
use crate::error::{ConfigError, Result};
use crate::sources::{ConfigSource, SecretsDirectorySource};
use std::cmp::Reverse;
use std::sync::Arc;

/// A source waiting to be loaded.
enum PendingSource {
    Sync(Box<dyn ConfigSource>),
    Secrets(SecretsDirectorySource),
}

impl PendingSource {
    fn name(&self) -> String {
        match self {
            Self::Sync(source) => source.name(),
            Self::Secrets(source) => source.name(),
        }
    }

    fn priority(&self) -> i32 {
        match self {
            Self::Sync(source) => source.priority(),
            Self::Secrets(source) => source.priority(),
        }
    }

    async fn load(&self) -> Result<FlatStore> {
        match self {
            Self::Sync(source) => source.load(),
            Self::Secrets(source) => source.load().await,
        }
    }
}

/// Loads sources and stacks them by priority.
///
/// Each source becomes one leaf of the resulting chain. Higher priority
/// sources come first; between equal priorities the source added last wins.
pub struct ConfigLoader {
    sources: Vec<PendingSource>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(PendingSource::Sync(source));
    }

    /// Add a secrets directory, read asynchronously on load.
    pub fn add_secrets_directory(&mut self, source: SecretsDirectorySource) {
        self.sources.push(PendingSource::Secrets(source));
    }

    /// Sources in precedence order, highest first.
    fn ordered(&self) -> Vec<&PendingSource> {
        let mut ordered: Vec<_> = self.sources.iter().enumerate().collect();
        ordered.sort_by_key(|(index, source)| Reverse((source.priority(), *index)));
        ordered.into_iter().map(|(_, source)| source).collect()
    }

    /// Load every source and chain them in precedence order.
    ///
    /// # Errors
    ///
    /// Returns an error if no source was added or any source fails to load.
    pub async fn load(&self) -> Result<ChainConfiguration> {
        if self.sources.is_empty() {
            return Err(ConfigError::LoadError(
                "No configuration sources specified".to_string(),
            ));
        }

        let mut layers: Vec<Arc<dyn Configuration>> = Vec::with_capacity(self.sources.len());
        for source in self.ordered() {
            let store = source.load().await.map_err(|e| {
                ConfigError::LoadError(format!("Failed to load source '{}': {}", source.name(), e))
            })?;
            tracing::debug!(
                source = %source.name(),
                priority = source.priority(),
                keys = store.len(),
                "loaded configuration source"
            );
            layers.push(Arc::new(LeafConfiguration::new(store)));
        }

        ChainConfiguration::new(layers)
    }

    /// Get the list of source names in precedence order, highest first.
    pub fn source_names(&self) -> Vec<String> {
        self.ordered().iter().map(|s| s.name()).collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
