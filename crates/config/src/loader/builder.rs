//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` merging builder values,
//!   environment variables and the config file.
//! - Validate the merged result.
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - Environment variables take precedence over config file values.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use super::env::{config_path_from_env, read_env};
use super::error::ConfigError;
use super::file::{default_config_path, read_file};
use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use crate::types::{Config, ConnectionConfig};

/// Partial connection settings from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Layer {
    pub base_url: Option<String>,
    pub skip_verify: Option<bool>,
    pub timeout: Option<Duration>,
}

impl Layer {
    /// Fill unset values from a lower-precedence layer.
    fn or(self, lower: Layer) -> Layer {
        Layer {
            base_url: self.base_url.or(lower.base_url),
            skip_verify: self.skip_verify.or(lower.skip_verify),
            timeout: self.timeout.or(lower.timeout),
        }
    }
}

/// Builds a [`Config`] from builder values, the environment and a config file.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    overrides: Layer,
    env: Layer,
    file: Layer,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// Skipped entirely when `DOTENV_DISABLED` is `true` or `1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the `.env` file exists but has invalid syntax or
    /// cannot be read. Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        self.env = read_env()?;
        if self.config_path.is_none() {
            self.config_path = config_path_from_env();
        }
        Ok(self)
    }

    /// Read configuration from the JSON config file.
    ///
    /// Uses the path set with [`with_config_path`](Self::with_config_path) or
    /// `CYTOMINE_CONFIG_PATH` (then the file must exist), otherwise the
    /// platform default location (skipped when absent).
    pub fn from_file(mut self) -> Result<Self, ConfigError> {
        let explicit = self.config_path.clone().or_else(config_path_from_env);
        let (path, required) = match explicit {
            Some(path) => (path, true),
            None => (default_config_path()?, false),
        };
        if let Some(layer) = read_file(&path, required)? {
            tracing::debug!(path = %path.display(), "Loaded config file");
            self.file = layer;
        }
        Ok(self)
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.overrides.base_url = Some(url);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.overrides.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.overrides.timeout = Some(timeout);
        self
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for an unparseable or non-http(s)
    /// base URL and [`ConfigError::InvalidTimeout`] for a timeout outside
    /// `1..=MAX_TIMEOUT_SECS` seconds.
    pub fn build(self) -> Result<Config, ConfigError> {
        let merged = self.overrides.or(self.env).or(self.file);

        let base_url = merged
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = validate_and_normalize_base_url(&base_url)?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: merged.skip_verify.unwrap_or(false),
            timeout: merged
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };
        Self::validate_timeout(&connection)?;

        Ok(Config { connection })
    }

    /// Checks the timeout is greater than 0 and not above `MAX_TIMEOUT_SECS`.
    fn validate_timeout(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }
        Ok(())
    }
}

/// Parse `raw` as an http(s) URL and strip trailing slashes.
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            message: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            message: "missing host".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ConfigLoader::new().build().unwrap();
        assert_eq!(config.connection.base_url, DEFAULT_BASE_URL);
        assert!(!config.connection.skip_verify);
        assert_eq!(
            config.connection.timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_layer_precedence() {
        let loader = ConfigLoader {
            overrides: Layer {
                timeout: Some(Duration::from_secs(5)),
                ..Layer::default()
            },
            env: Layer {
                base_url: Some("https://env.example/api".to_string()),
                timeout: Some(Duration::from_secs(10)),
                ..Layer::default()
            },
            file: Layer {
                base_url: Some("https://file.example/api".to_string()),
                skip_verify: Some(true),
                timeout: Some(Duration::from_secs(20)),
            },
            config_path: None,
        };

        let config = loader.build().unwrap();
        assert_eq!(config.connection.base_url, "https://env.example/api");
        assert!(config.connection.skip_verify);
        assert_eq!(config.connection.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_base_url_normalized() {
        let config = ConfigLoader::new()
            .with_base_url("https://cytomine.example.org/api//".to_string())
            .build()
            .unwrap();
        assert_eq!(config.connection.base_url, "https://cytomine.example.org/api");
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        let err = ConfigLoader::new()
            .with_base_url("ftp://cytomine.example.org".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_rejects_blank_base_url() {
        let err = ConfigLoader::new()
            .with_base_url("  ".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = ConfigLoader::new()
            .with_timeout(Duration::from_secs(0))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_rejects_excessive_timeout() {
        let err = ConfigLoader::new()
            .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS + 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }
}
