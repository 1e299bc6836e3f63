//! Configuration management for the Cytomine client.
//!
//! This crate provides the connection settings consumed by the HTTP
//! transport and a layered loader reading them from builder calls,
//! environment variables and a JSON config file.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path, env_var_or_none};
pub use types::{Config, ConnectionConfig};
