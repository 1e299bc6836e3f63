//! Environment variable parsing for configuration.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid values return `ConfigError::InvalidValue`.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::Layer;
use super::error::ConfigError;
use crate::constants::{ENV_BASE_URL, ENV_CONFIG_PATH, ENV_SKIP_VERIFY, ENV_TIMEOUT};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Read the connection settings found in the environment.
pub(crate) fn read_env() -> Result<Layer, ConfigError> {
    let mut layer = Layer {
        base_url: env_var_or_none(ENV_BASE_URL),
        ..Layer::default()
    };

    if let Some(skip) = env_var_or_none(ENV_SKIP_VERIFY) {
        layer.skip_verify = Some(parse_bool(ENV_SKIP_VERIFY, &skip)?);
    }
    if let Some(timeout) = env_var_or_none(ENV_TIMEOUT) {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_TIMEOUT.to_string(),
            message: "must be a number of seconds".to_string(),
        })?;
        layer.timeout = Some(Duration::from_secs(secs));
    }
    Ok(layer)
}

/// Config file location from the environment, if set.
pub(crate) fn config_path_from_env() -> Option<PathBuf> {
    env_var_or_none(ENV_CONFIG_PATH).map(PathBuf::from)
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}
