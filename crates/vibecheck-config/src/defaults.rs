//! Default values for every configuration section.

use crate::schema::{ApiConfig, ChartConfig, DashboardConfig, SessionConfig};
use std::path::PathBuf;
use vibecheck_common::AggregationPeriod;

/// Backend address used by the web pages during development.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Verified access codes live this long in the session.
pub const DEFAULT_CODE_TTL_MINUTES: u32 = 30;

/// File name the dashboard export is saved under.
pub const DEFAULT_EXPORT_FILE: &str = "dados_grafico.txt";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            session_cookie: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".vibecheck").join("session.json"),
            code_ttl_minutes: DEFAULT_CODE_TTL_MINUTES,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_period: AggregationPeriod::All,
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            chart: ChartConfig::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 400,
            background: "#1e293b".to_string(),
            foreground: "#ffffff".to_string(),
            grid: true,
        }
    }
}
