//! Integration tests for vibecheck-config.
//!
//! These tests load configuration files from disk.

use std::io::Write;
use vibecheck_common::AggregationPeriod;
use vibecheck_config::{ConfigError, ConfigLoader};

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "api:\n  base_url: http://127.0.0.1:8080\n  max_retries: 1\nsession:\n  code_ttl_minutes: 15\ndashboard:\n  default_period: week\n  chart:\n    width: 640\n"
    )
    .unwrap();

    let config = ConfigLoader::load_config(file.path()).unwrap();

    assert_eq!(config.api.base_url, "http://127.0.0.1:8080");
    assert_eq!(config.api.max_retries, 1);
    assert_eq!(config.session.code_ttl_minutes, 15);
    assert_eq!(config.dashboard.default_period, AggregationPeriod::Week);
    assert_eq!(config.dashboard.chart.width, 640);
    assert_eq!(config.dashboard.chart.height, 400);
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigLoader::load_config(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::IoError { .. })));
}

#[test]
fn test_load_config_invalid_values_fail_validation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "dashboard:\n  chart:\n    background: blue\n").unwrap();

    let result = ConfigLoader::load_config(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_config_error_converts_to_common_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api: [not, a, map]").unwrap();

    let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}
