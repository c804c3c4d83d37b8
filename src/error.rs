//! Error types for layered-config.

/// Result type alias for layered-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when reading or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The caller passed an empty key, namespace or source list.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// No value is stored for the key and no default was supplied.
    #[error("A value for key '{key}' was not found in current configuration")]
    KeyNotFound {
        /// Fully qualified dotted key
        key: String,
    },

    /// The stored value cannot be converted to the requested type.
    #[error("Bad type of key '{key}'. Cannot convert the value '{value}' to {expected} type")]
    BadType {
        /// Fully qualified dotted key
        key: String,
        /// Truncated or masked preview of the offending value
        value: String,
        /// Name of the requested type
        expected: &'static str,
    },

    /// No stored key lives under the requested namespace.
    #[error("Namespace '{namespace}' was not found in current configuration")]
    NamespaceNotFound {
        /// Fully qualified dotted namespace
        namespace: String,
    },

    /// Failed to load configuration from a source.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse a configuration document.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

impl ConfigError {
    /// Returns `true` for [`ConfigError::KeyNotFound`].
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// Returns `true` for [`ConfigError::BadType`].
    pub fn is_bad_type(&self) -> bool {
        matches!(self, Self::BadType { .. })
    }

    /// Returns `true` for [`ConfigError::NamespaceNotFound`].
    pub fn is_namespace_not_found(&self) -> bool {
        matches!(self, Self::NamespaceNotFound { .. })
    }
}
