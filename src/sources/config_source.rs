//! Configuration source trait.

use crate::core::FlatStore;
use crate::error::Result;

/// Trait for configuration sources.
///
/// A source produces one flat dotted-key dictionary. Implement this trait to
/// feed custom stores (databases, remote key-value services) into a
/// [`ConfigurationBuilder`](crate::core::ConfigurationBuilder).
pub trait ConfigSource: Send + Sync {
    /// Load the source as a flat string dictionary.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or parsed.
    fn load(&self) -> Result<FlatStore>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Environment variables: 300
    /// - Secrets directory: 200
    /// - Files: 100, 110, 120, ... in the order they were added
    fn priority(&self) -> i32 {
        100
    }
}
