//! Environment variable configuration source.

use super::ConfigSource;
use crate::core::{FlatStore, LeafConfiguration};
use crate::error::Result;
use std::env;

/// Environment variable configuration source.
///
/// Takes a snapshot of the process environment when loaded. Variable names
/// are used verbatim as keys, so `a.b.c=1` in the environment is read as key
/// `a.b.c`.
///
/// # Examples
///
/// ```rust
/// use layered_config::sources::{ConfigSource, EnvSource};
///
/// let snapshot = EnvSource::from_vars([("server.port", "8080")]);
/// let store = snapshot.load().unwrap();
/// assert_eq!(store.get("server.port"), Some("8080"));
/// ```
pub struct EnvSource {
    vars: Option<FlatStore>,
    priority: i32,
}

impl EnvSource {
    /// Create a source that snapshots the process environment on load.
    pub fn new() -> Self {
        Self {
            vars: None,
            priority: 300, // Env vars have highest priority by default
        }
    }

    /// Create a source over an explicit snapshot of variables.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Some(vars.into_iter().collect()),
            priority: 300,
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

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Result<FlatStore> {
        match &self.vars {
            Some(vars) => Ok(vars.clone()),
            None => Ok(env::vars().collect()),
        }
    }

    fn name(&self) -> String {
        match self.vars {
            Some(_) => "env:snapshot".to_string(),
            None => "env:*".to_string(),
        }
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// Snapshot the process environment into a root configuration.
pub fn env_configuration() -> Result<LeafConfiguration> {
    Ok(LeafConfiguration::new(EnvSource::new().load()?))
}
