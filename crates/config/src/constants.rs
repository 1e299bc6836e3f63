//! Centralized constants for the Cytomine client workspace.
//!
//! Default values used across crates, kept here to avoid magic number
//! duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default server URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost-core/api";

// =============================================================================
// Environment & Files
// =============================================================================

/// Environment variable holding the server base URL.
pub const ENV_BASE_URL: &str = "CYTOMINE_BASE_URL";

/// Environment variable toggling TLS certificate verification.
pub const ENV_SKIP_VERIFY: &str = "CYTOMINE_SKIP_VERIFY";

/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "CYTOMINE_TIMEOUT";

/// Environment variable overriding the config file location.
pub const ENV_CONFIG_PATH: &str = "CYTOMINE_CONFIG_PATH";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
