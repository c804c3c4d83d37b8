//! Secrets-directory configuration source.

use crate::core::{FlatStore, LeafConfiguration};
use crate::error::{ConfigError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// A directory where every file holds one value.
///
/// The file name is the key and the trimmed file content is the value, the
/// layout used by mounted container secrets (`/run/secrets/db.password`).
/// Symlinks are followed and subdirectories are skipped.
///
/// # Examples
///
/// ```rust,no_run
/// use layered_config::sources::SecretsDirectorySource;
///
/// # async fn example() -> layered_config::error::Result<()> {
/// let store = SecretsDirectorySource::new("/run/secrets").load().await?;
/// # Ok(())
/// # }
/// ```
pub struct SecretsDirectorySource {
    path: PathBuf,
    priority: i32,
}

impl SecretsDirectorySource {
    /// Create a new secrets-directory source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            priority: 200,
        }
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Get the priority of this source (higher = takes precedence).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Get a human-readable name for this source.
    pub fn name(&self) -> String {
        format!("secrets:{}", self.path.display())
    }

    /// Read every file in the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or one of its files cannot be read,
    /// or if a file name is not valid UTF-8.
    pub async fn load(&self) -> Result<FlatStore> {
        let mut entries = fs::read_dir(&self.path).await.map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read secrets directory {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut values = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            // Follows links: mounted secrets are symlinks into `..data/`.
            if !fs::metadata(entry.path()).await?.is_file() {
                continue;
            }
            let name = entry.file_name().into_string().map_err(|name| {
                ConfigError::LoadError(format!("Secret file name is not UTF-8: {:?}", name))
            })?;
            let content = fs::read_to_string(entry.path()).await?;
            values.push((name, content.trim().to_string()));
        }

        tracing::trace!(path = %self.path.display(), secrets = values.len(), "read secrets directory");
        Ok(values.into_iter().collect())
    }
}

/// Load a secrets directory into a root configuration.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub async fn secrets_directory_configuration(path: impl AsRef<Path>) -> Result<LeafConfiguration> {
    let store = SecretsDirectorySource::new(path.as_ref()).load().await?;
    Ok(LeafConfiguration::new(store))
}
