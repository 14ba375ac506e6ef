//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for integration with the rest of the node.

pub mod config;
pub mod world;

pub use config::{apply_env_overrides, ConfigError, StaticConfigProvider, TomlConfigProvider};
pub use world::SharedWorld;
