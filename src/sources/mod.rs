//! Configuration source implementations.
//!
//! Each source produces a [`FlatStore`](crate::core::FlatStore); the
//! `*_configuration` functions wrap one source in a root
//! [`LeafConfiguration`](crate::core::LeafConfiguration).

mod config_source;
mod devel;
mod env;
mod file;
mod secrets;

#[cfg(feature = "toml")]
mod toml;

pub use config_source::ConfigSource;
pub use devel::{DevelFilesSource, devel_virtual_files_configuration};
pub use env::{EnvSource, env_configuration};
pub use file::{FileSource, file_configuration, parse_properties};
pub use secrets::{SecretsDirectorySource, secrets_directory_configuration};

#[cfg(feature = "toml")]
pub use self::toml::{TomlSource, flatten_toml, toml_configuration, toml_file_configuration};
