//! # layered-config
//!
//! Read-only layered configuration with typed accessors, namespaces and
//! precedence chains.
//!
//! ## Overview
//!
//! Every source (properties files, the environment, a secrets directory,
//! TOML documents) is reduced to a flat dictionary of dotted keys such as
//! `db.primary.host`. On top of that, `layered-config` provides:
//! - Typed reads with strict round-trip validation (`"007"` is not an integer)
//! - Namespace carving: `config.get_namespace("db")?` yields a view over `db.*`
//! - Chains of sources with first-match-wins precedence and namespace masking
//! - Error messages that always carry the fully qualified key
//!
//! ## Quick Start
//!
//! ```rust
//! use layered_config::prelude::*;
//! use std::sync::Arc;
//!
//! # fn example() -> layered_config::error::Result<()> {
//! let defaults = LeafConfiguration::new(FlatStore::from([
//!     ("server.port", "8080"),
//!     ("server.host", "localhost"),
//! ]));
//! let overrides = LeafConfiguration::new(FlatStore::from([("server.port", "9090")]));
//!
//! let config = chain_configuration([
//!     Arc::new(overrides) as Arc<dyn Configuration>,
//!     Arc::new(defaults) as Arc<dyn Configuration>,
//! ])?;
//!
//! let server = config.get_namespace("server")?;
//! assert_eq!(server.get_integer("port")?, 9090);
//! assert_eq!(server.get_string("host")?, "localhost");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! - `toml` (default): TOML document source with array indexers

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ChainConfiguration, Configuration, ConfigurationBuilder, FlatStore, LeafConfiguration,
        chain_configuration,
    };
    pub use crate::error::{ConfigError, Result};
    pub use crate::sources::{
        devel_virtual_files_configuration, env_configuration, file_configuration,
        secrets_directory_configuration,
    };

    #[cfg(feature = "toml")]
    pub use crate::sources::{toml_configuration, toml_file_configuration};
}
