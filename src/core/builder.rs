//! Builder for layering configuration sources.

use crate::core::{ChainConfiguration, ConfigLoader};
use crate::error::Result;
use crate::sources::{ConfigSource, EnvSource, FileSource, SecretsDirectorySource};
use std::path::PathBuf;

/// Builder for a [`ChainConfiguration`] assembled from several sources.
///
/// # Examples
///
/// ```rust,no_run
/// use layered_config::prelude::*;
///
/// # async fn example() -> Result<()> {
/// let config = ConfigurationBuilder::new()
///     .with_file("config/default.properties")
///     .with_file("config/production.toml")
///     .with_secrets_directory("/run/secrets")
///     .with_env()
///     .build()
///     .await?;
///
/// let db = config.get_namespace("db")?;
/// println!("db host: {}", db.get_string("host")?);
/// # Ok(())
/// # }
/// ```
pub struct ConfigurationBuilder {
    file_paths: Vec<(PathBuf, FileFormat)>,
    secrets_dirs: Vec<PathBuf>,
    with_env: bool,
    custom_sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigurationBuilder {
    /// Create a new builder with no sources.
    pub fn new() -> Self {
        Self {
            file_paths: Vec::new(),
            secrets_dirs: Vec::new(),
            with_env: false,
            custom_sources: Vec::new(),
        }
    }

    /// Add a file source.
    ///
    /// Files ending in `.toml` are read as TOML documents (with the `toml`
    /// feature), anything else as properties files.
    ///
    /// Files are added in the order they are specified. Later files have
    /// higher priority and override earlier files.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_paths.push((path.into(), FileFormat::Detect));
        self
    }

    /// Add a file read as a TOML document whatever its extension.
    ///
    /// Shares the priority sequence of [`with_file`](Self::with_file).
    #[cfg(feature = "toml")]
    pub fn with_toml_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_paths.push((path.into(), FileFormat::Toml));
        self
    }

    /// Add a secrets directory (priority 200).
    pub fn with_secrets_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.secrets_dirs.push(path.into());
        self
    }

    /// Add a snapshot of the process environment (priority 300).
    pub fn with_env(mut self) -> Self {
        self.with_env = true;
        self
    }

    /// Add a custom configuration source.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use layered_config::prelude::*;
    /// use layered_config::sources::FileSource;
    ///
    /// let custom_source = FileSource::new("config/custom.properties").with_priority(150);
    /// let builder = ConfigurationBuilder::new().with_source(custom_source);
    /// ```
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    fn into_loader(self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();

        // Add file sources with increasing priority
        for (index, (path, format)) in self.file_paths.into_iter().enumerate() {
            let priority = 100 + (index as i32 * 10); // 100, 110, 120, etc.
            loader.add_source(file_source(path, format, priority));
        }

        for path in self.secrets_dirs {
            loader.add_secrets_directory(SecretsDirectorySource::new(path));
        }

        for source in self.custom_sources {
            loader.add_source(source);
        }

        if self.with_env {
            loader.add_source(Box::new(EnvSource::new()));
        }

        loader
    }

    /// Names of the configured sources, highest priority first.
    #[cfg(test)]
    fn source_names(self) -> Vec<String> {
        self.into_loader().source_names()
    }

    /// Load every source and chain them by priority.
    ///
    /// # Errors
    ///
    /// Returns an error if no source was configured or any source fails to
    /// load.
    pub async fn build(self) -> Result<ChainConfiguration> {
        self.into_loader().load().await
    }
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    /// Chosen from the file extension.
    Detect,
    #[cfg(feature = "toml")]
    Toml,
}

#[cfg(feature = "toml")]
fn file_source(path: PathBuf, format: FileFormat, priority: i32) -> Box<dyn ConfigSource> {
    use crate::sources::TomlSource;

    let is_toml = match format {
        FileFormat::Toml => true,
        FileFormat::Detect => path.extension().is_some_and(|ext| ext == "toml"),
    };
    if is_toml {
        Box::new(TomlSource::new(path).with_priority(priority))
    } else {
        Box::new(FileSource::new(path).with_priority(priority))
    }
}

#[cfg(not(feature = "toml"))]
fn file_source(path: PathBuf, _format: FileFormat, priority: i32) -> Box<dyn ConfigSource> {
    Box::new(FileSource::new(path).with_priority(priority))
}
