//! Runtime validation of a loaded configuration.

use crate::schema::{ApiConfig, ChartConfig, Config, SessionConfig};
use url::Url;
use vibecheck_common::{Result, VibeCheckError};

const MIN_CHART_SIZE: u32 = 100;

impl Config {
    /// Validates every section, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.session.validate()?;
        self.dashboard.chart.validate()?;

        if self.logging.level.trim().is_empty() {
            return Err(VibeCheckError::validation_field(
                "Log level cannot be empty",
                "logging.level",
            ));
        }

        Ok(())
    }
}

impl ApiConfig {
    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            VibeCheckError::config_with_source(format!("Invalid API base URL '{}'", self.base_url), e)
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(VibeCheckError::validation_field(
                format!("API base URL must use http or https, got '{}'", url.scheme()),
                "api.base_url",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(VibeCheckError::validation_field(
                "API timeout must be greater than 0",
                "api.timeout_seconds",
            ));
        }

        if let Some(cookie) = &self.session_cookie {
            let name = cookie.split_once('=').map_or("", |(name, _)| name.trim());
            if name.is_empty() {
                return Err(VibeCheckError::validation_field(
                    "Session cookie must look like NAME=value",
                    "api.session_cookie",
                ));
            }
        }

        Ok(())
    }
}

impl SessionConfig {
    fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(VibeCheckError::validation_field(
                "Session path cannot be empty",
                "session.path",
            ));
        }

        if self.code_ttl_minutes == 0 {
            return Err(VibeCheckError::validation_field(
                "Code lifetime must be greater than 0",
                "session.code_ttl_minutes",
            ));
        }

        Ok(())
    }
}

impl ChartConfig {
    fn validate(&self) -> Result<()> {
        if self.width < MIN_CHART_SIZE || self.height < MIN_CHART_SIZE {
            return Err(VibeCheckError::validation_field(
                format!("Chart must be at least {MIN_CHART_SIZE}x{MIN_CHART_SIZE} pixels"),
                "dashboard.chart",
            ));
        }

        for (field, value) in [
            ("dashboard.chart.background", &self.background),
            ("dashboard.chart.foreground", &self.foreground),
        ] {
            if !is_hex_color(value) {
                return Err(VibeCheckError::validation_field(
                    format!("'{value}' is not a #rrggbb color"),
                    field,
                ));
            }
        }

        Ok(())
    }
}

/// Whether `value` is a `#rrggbb` color.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
