//! JSON config file loading.
//!
//! Invariants:
//! - A missing file at the default location is not an error.
//! - A missing file at an explicitly requested location is an error.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::builder::Layer;
use super::error::ConfigError;
use crate::constants::CONFIG_FILE_NAME;
use crate::types::Config;

/// `<platform config dir>/cytomine/config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("org", "cytomine", "cytomine").ok_or_else(|| {
        ConfigError::ConfigDirUnavailable("no home directory for the current user".to_string())
    })?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Read the connection layer from `path`.
///
/// Returns `Ok(None)` when the file does not exist and `required` is false.
pub(crate) fn read_file(path: &Path, required: bool) -> Result<Option<Layer>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::ConfigFileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    // Only keys present in the file take part in the merge.
    let raw: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            source,
        })?;
    let config: Config =
        serde_json::from_value(raw.clone()).map_err(|source| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            source,
        })?;

    let present = |key: &str| raw["connection"].get(key).is_some();
    let connection = config.connection;
    Ok(Some(Layer {
        base_url: present("base_url").then_some(connection.base_url),
        skip_verify: present("skip_verify").then_some(connection.skip_verify),
        timeout: present("timeout").then_some(connection.timeout),
    }))
}
