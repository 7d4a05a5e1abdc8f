//! Infrastructure layer: record storage and process configuration.

pub mod config;
pub mod repository;

pub use config::{Config, ConfigError};
pub use repository::{InMemoryRepository, Repository};
