//! Layered development configuration files.

use super::ConfigSource;
use super::file::read_properties;
use crate::core::{FlatStore, LeafConfiguration};
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

const PROJECT_DIR: &str = "project.properties";
const USER_DIR: &str = "user.properties";

/// Project, site and user properties files merged into one dictionary.
///
/// Given a configuration directory and a site name, reads in order:
///
/// 1. `project.properties/config.properties`
/// 2. `project.properties/config-<site>.properties`
/// 3. `user.properties/config-<user>.properties`
///
/// Later files override earlier ones. A name that is also set in the
/// environment takes the environment's value instead.
///
/// # Examples
///
/// ```rust,no_run
/// use layered_config::sources::{ConfigSource, DevelFilesSource};
///
/// let store = DevelFilesSource::new("config", "DEVEL").load().unwrap();
/// ```
pub struct DevelFilesSource {
    config_dir: PathBuf,
    site: String,
    user: Option<String>,
    env: Option<FlatStore>,
    priority: i32,
}

impl DevelFilesSource {
    /// Create a source for `config_dir` and the given development site.
    ///
    /// The user file is chosen from the current login name.
    pub fn new(config_dir: impl Into<PathBuf>, site: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            site: site.into(),
            user: None,
            env: None,
            priority: 100,
        }
    }

    /// Select the user file for `user` instead of the current login name.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Use an explicit environment snapshot for overrides.
    pub fn with_env<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().collect());
        self
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn files(&self) -> Vec<PathBuf> {
        let project_dir = self.config_dir.join(PROJECT_DIR);
        let mut files = vec![
            project_dir.join("config.properties"),
            project_dir.join(format!("config-{}.properties", self.site)),
        ];

        let user = self.user.clone().unwrap_or_else(whoami::username);
        if !user.is_empty() {
            files.push(
                self.config_dir
                    .join(USER_DIR)
                    .join(format!("config-{}.properties", user)),
            );
        }
        files
    }
}

impl ConfigSource for DevelFilesSource {
    fn load(&self) -> Result<FlatStore> {
        if self.config_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidArgument("config_dir"));
        }
        if !self.config_dir.exists() {
            return Err(ConfigError::LoadError(format!(
                "Bad configuration directory (not exists): {}",
                self.config_dir.display()
            )));
        }

        let env_vars = match &self.env {
            Some(vars) => vars.clone(),
            None => env::vars().collect(),
        };

        let mut merged: HashMap<String, String> = HashMap::new();
        for file in self.files() {
            if !file.exists() {
                tracing::warn!(file = %file.display(), "configuration file does not exist");
                return Err(ConfigError::LoadError(format!(
                    "Configuration file does not exist: {}",
                    file.display()
                )));
            }
            for (name, value) in read_properties(&file)? {
                let value = env_vars.get(&name).map(str::to_string).unwrap_or(value);
                merged.insert(name, value);
            }
        }
        Ok(merged.into())
    }

    fn name(&self) -> String {
        format!("devel:{}:{}", self.config_dir.display(), self.site)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

/// Load the layered development files of `config_dir` for `site`.
///
/// # Errors
///
/// Returns an error if the directory or any of the three files is missing.
pub fn devel_virtual_files_configuration(
    config_dir: impl AsRef<Path>,
    site: &str,
) -> Result<LeafConfiguration> {
    let source = DevelFilesSource::new(config_dir.as_ref(), site);
    Ok(LeafConfiguration::new(source.load()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Configuration;
    use std::fs;
    use tempfile::TempDir;

    fn layout(user: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let project_dir = temp_dir.path().join(PROJECT_DIR);
        let user_dir = temp_dir.path().join(USER_DIR);
        fs::create_dir(&project_dir).unwrap();
        fs::create_dir(&user_dir).unwrap();
        fs::write(
            project_dir.join("config.properties"),
            "# Test config file \r\n\
             a.a.a = project-root-a\r\n\
             a.a.b = project-root-b\r\n\
             a.a.c = project-root-c\r\n\
             a.a.d = project-root-d\r\n",
        )
        .unwrap();
        fs::write(
            project_dir.join("config-DEVEL.properties"),
            "a.a.b = project-site-b\r\n\
             a.a.c = project-site-c\r\n\
             a.a.d = project-site-d\r\n",
        )
        .unwrap();
        fs::write(
            user_dir.join(format!("config-{}.properties", user)),
            "a.a.d = user-own-d\r\n",
        )
        .unwrap();
        temp_dir
    }

    #[test]
    fn test_site_and_user_override_project() {
        let dir = layout("alice");
        let source = DevelFilesSource::new(dir.path(), "DEVEL")
            .with_user("alice")
            .with_env(Vec::<(String, String)>::new());
        let config = LeafConfiguration::new(source.load().unwrap());

        assert_eq!(config.get_string("a.a.a").unwrap(), "project-root-a");
        assert_eq!(config.get_string("a.a.b").unwrap(), "project-site-b");
        assert_eq!(config.get_string("a.a.c").unwrap(), "project-site-c");
        assert_eq!(config.get_string("a.a.d").unwrap(), "user-own-d");
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = layout("alice");
        let source = DevelFilesSource::new(dir.path(), "DEVEL")
            .with_user("alice")
            .with_env([("a.a.a", "env-own-a"), ("a.a.d", "env-own-d"), ("x", "y")]);
        let config = LeafConfiguration::new(source.load().unwrap());

        assert_eq!(config.get_string("a.a.a").unwrap(), "env-own-a");
        assert_eq!(config.get_string("a.a.b").unwrap(), "project-site-b");
        assert_eq!(config.get_string("a.a.d").unwrap(), "env-own-d");
        assert!(!config.has("x").unwrap());
    }

    #[test]
    fn test_namespace_carving() {
        let dir = layout("alice");
        let source = DevelFilesSource::new(dir.path(), "DEVEL")
            .with_user("alice")
            .with_env(Vec::<(String, String)>::new());
        let config = LeafConfiguration::new(source.load().unwrap());

        let ns = config.get_namespace("a").unwrap();
        assert_eq!(ns.get_string("a.b").unwrap(), "project-site-b");
        let ns = ns.get_namespace("a").unwrap();
        assert_eq!(ns.get_string("d").unwrap(), "user-own-d");
        assert_eq!(ns.configuration_namespace(), Some("a.a"));
    }

    #[test]
    fn test_missing_user_file() {
        let dir = layout("alice");
        let source = DevelFilesSource::new(dir.path(), "DEVEL").with_user("bob");
        assert!(matches!(source.load(), Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_missing_directory() {
        let source = DevelFilesSource::new("/nonexistent/config", "DEVEL");
        assert!(matches!(source.load(), Err(ConfigError::LoadError(_))));

        let source = DevelFilesSource::new("", "DEVEL");
        assert!(matches!(source.load(), Err(ConfigError::InvalidArgument(_))));
    }

    #[test]
    fn test_files_use_site_name() {
        let source = DevelFilesSource::new("/cfg", "PROD").with_user("carol");
        let files = source.files();
        assert_eq!(files.len(), 3);
        assert!(files[1].ends_with("project.properties/config-PROD.properties"));
        assert!(files[2].ends_with("user.properties/config-carol.properties"));
    }
}
