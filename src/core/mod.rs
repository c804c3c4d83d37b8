//! Core configuration types: the read contract, leaf and chained views.

mod builder;
mod chain;
mod configuration;
mod convert;
mod flat_store;
pub mod key_path;
mod leaf;
mod loader;

pub use builder::ConfigurationBuilder;
pub use chain::{ChainConfiguration, chain_configuration};
pub use configuration::{Configuration, DEFAULT_INDEXER, RawValue};
pub use flat_store::FlatStore;
pub use leaf::LeafConfiguration;
pub use loader::ConfigLoader;
