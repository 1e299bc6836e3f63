//! Integration tests for configuration loading.
//!
//! These tests exercise the full `ConfigLoader` chain against real
//! environment variables and config files. Every test touching the
//! environment runs serially.

use cytomine_config::{ConfigError, ConfigLoader, env_var_or_none};
use serial_test::serial;
use std::io::Write;
use std::time::Duration;

const CLEARED: [(&str, Option<&str>); 5] = [
    ("CYTOMINE_BASE_URL", None),
    ("CYTOMINE_SKIP_VERIFY", None),
    ("CYTOMINE_TIMEOUT", None),
    ("CYTOMINE_CONFIG_PATH", None),
    ("DOTENV_DISABLED", Some("1")),
];

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    write!(file, "{}", content).expect("write temp file");
    file
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let file = config_file(
        r#"{"connection": {"base_url": "https://file.example.org/api", "timeout": 45}}"#,
    );

    temp_env::with_vars(CLEARED, || {
        temp_env::with_var("CYTOMINE_BASE_URL", Some("https://env.example.org/api"), || {
            let config = ConfigLoader::new()
                .with_config_path(file.path().to_path_buf())
                .from_file()
                .and_then(|loader| loader.from_env())
                .expect("load")
                .build()
                .expect("build");

            assert_eq!(config.connection.base_url, "https://env.example.org/api");
            assert_eq!(config.connection.timeout, Duration::from_secs(45));
        });
    });
}

#[test]
#[serial]
fn test_precedence_independent_of_call_order() {
    let file = config_file(r#"{"connection": {"base_url": "https://file.example.org/api"}}"#);

    temp_env::with_vars(CLEARED, || {
        temp_env::with_var("CYTOMINE_BASE_URL", Some("https://env.example.org/api"), || {
            let config = ConfigLoader::new()
                .with_base_url("https://builder.example.org/api".to_string())
                .from_env()
                .expect("env")
                .with_config_path(file.path().to_path_buf())
                .from_file()
                .expect("file")
                .build()
                .expect("build");

            assert_eq!(config.connection.base_url, "https://builder.example.org/api");
        });
    });
}

#[test]
#[serial]
fn test_config_path_from_env() {
    let file = config_file(r#"{"connection": {"skip_verify": true}}"#);
    let path = file.path().to_string_lossy().into_owned();

    temp_env::with_vars(CLEARED, || {
        temp_env::with_var("CYTOMINE_CONFIG_PATH", Some(path.as_str()), || {
            let config = ConfigLoader::new()
                .from_env()
                .and_then(|loader| loader.from_file())
                .expect("load")
                .build()
                .expect("build");
            assert!(config.connection.skip_verify);
        });
    });
}

#[test]
#[serial]
fn test_explicit_missing_file_is_error() {
    temp_env::with_vars(CLEARED, || {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = ConfigLoader::new()
            .with_config_path(dir.path().join("missing.json"))
            .from_file();
        assert!(matches!(result, Err(ConfigError::ConfigFileRead { .. })));
    });
}

#[test]
#[serial]
fn test_invalid_skip_verify_env() {
    temp_env::with_vars(CLEARED, || {
        temp_env::with_var("CYTOMINE_SKIP_VERIFY", Some("sometimes"), || {
            let result = ConfigLoader::new().from_env();
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        });
    });
}

#[test]
#[serial]
fn test_env_timeout_out_of_range_fails_build() {
    temp_env::with_vars(CLEARED, || {
        temp_env::with_var("CYTOMINE_TIMEOUT", Some("0"), || {
            let result = ConfigLoader::new().from_env().expect("env").build();
            assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
        });
    });
}

#[test]
#[serial]
fn test_dotenv_disabled_is_noop() {
    temp_env::with_vars(CLEARED, || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}

#[test]
#[serial]
fn test_env_var_or_none_exported() {
    temp_env::with_var("CYTOMINE_BASE_URL", Some(""), || {
        assert_eq!(env_var_or_none("CYTOMINE_BASE_URL"), None);
    });
}
