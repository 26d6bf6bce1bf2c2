//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vibecheck_common::{AggregationPeriod, LoggingConfig};

/// Main configuration structure for Vibe Check.
///
/// Every section has defaults, so a partial file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// Session storage configuration.
    pub session: SessionConfig,
    /// Dashboard configuration.
    pub dashboard: DashboardConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend, without trailing path.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Retry attempts for idempotent requests.
    pub max_retries: usize,
    /// Backend session cookie (`NAME=value`) obtained after the teacher login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

/// Session storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding session values between CLI invocations.
    pub path: PathBuf,
    /// Lifetime of a verified access code, in minutes.
    pub code_ttl_minutes: u32,
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Period used when none is given.
    pub default_period: AggregationPeriod,
    /// Default file name of the text export.
    pub export_file: PathBuf,
    /// Chart rendering options.
    pub chart: ChartConfig,
}

/// Chart rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Background color, `#rrggbb`.
    pub background: String,
    /// Axis and label color, `#rrggbb`.
    pub foreground: String,
    /// Whether to draw horizontal grid lines.
    pub grid: bool,
}
