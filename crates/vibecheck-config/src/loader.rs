//! Configuration loading utilities

use crate::schema::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use vibecheck_common::{Result as VibeCheckResult, VibeCheckError};

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "VIBECHECK_CONFIG_PATH";

/// File names probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["vibecheck.yaml", "vibecheck.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] VibeCheckError),
}

impl From<ConfigError> for VibeCheckError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read configuration from {}", path.display());

        let mut config = Self::parse(&content)?;
        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Parse a YAML document into a configuration, without overrides or validation
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from `VIBECHECK_CONFIG_PATH`, a default file, or defaults
    pub fn load() -> VibeCheckResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            info!("Loading configuration from {}", config_path);
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.into_iter().map(Path::new).find(|p| p.exists()) {
            info!("Loading configuration from {}", path.display());
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> VibeCheckResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VIBECHECK_API_URL") {
            config.api.base_url = url;
        }

        if let Some(timeout) = lookup("VIBECHECK_API_TIMEOUT") {
            config.api.timeout_seconds = parse_var("VIBECHECK_API_TIMEOUT", &timeout)?;
        }

        if let Some(retries) = lookup("VIBECHECK_API_MAX_RETRIES") {
            config.api.max_retries = parse_var("VIBECHECK_API_MAX_RETRIES", &retries)?;
        }

        if let Some(cookie) = lookup("VIBECHECK_SESSION_COOKIE") {
            config.api.session_cookie = Some(cookie).filter(|c| !c.trim().is_empty());
        }

        if let Some(path) = lookup("VIBECHECK_SESSION_PATH") {
            config.session.path = PathBuf::from(path);
        }

        if let Some(ttl) = lookup("VIBECHECK_CODE_TTL_MINUTES") {
            config.session.code_ttl_minutes = parse_var("VIBECHECK_CODE_TTL_MINUTES", &ttl)?;
        }

        if let Some(period) = lookup("VIBECHECK_DEFAULT_PERIOD") {
            config.dashboard.default_period = parse_var("VIBECHECK_DEFAULT_PERIOD", &period)?;
        }

        if let Some(level) = lookup("VIBECHECK_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = lookup("VIBECHECK_LOG_JSON") {
            config.logging.json_format = parse_var("VIBECHECK_LOG_JSON", &json)?;
        }

        if let Some(file) = lookup("VIBECHECK_LOG_FILE") {
            config.logging.file_path = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}
