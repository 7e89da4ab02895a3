use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Monitor device
    pub monitor_base_url: String,

    // Polling
    pub sensor_poll_interval_ms: u64,
    pub log_poll_interval_ms: u64,

    // Chart
    pub chart_max_points: usize,
    pub chart_width: u32,
    pub chart_height: u32,

    // Dashboard server
    pub dashboard_host: String,
    pub dashboard_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitor_base_url: "http://192.168.4.1".to_string(),
            sensor_poll_interval_ms: 2000,
            log_poll_interval_ms: 60_000,
            chart_max_points: 20,
            chart_width: 720,
            chart_height: 280,
            dashboard_host: "0.0.0.0".to_string(),
            dashboard_port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but cannot be parsed,
    /// or if an interval or the chart window is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = Self {
            // Monitor device
            monitor_base_url: env::var("MONITOR_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.monitor_base_url),

            // Polling
            sensor_poll_interval_ms: parse_var(
                "SENSOR_POLL_INTERVAL_MS",
                defaults.sensor_poll_interval_ms,
            )?,
            log_poll_interval_ms: parse_var("LOG_POLL_INTERVAL_MS", defaults.log_poll_interval_ms)?,

            // Chart
            chart_max_points: parse_var("CHART_MAX_POINTS", defaults.chart_max_points)?,
            chart_width: parse_var("CHART_WIDTH", defaults.chart_width)?,
            chart_height: parse_var("CHART_HEIGHT", defaults.chart_height)?,

            // Dashboard server
            dashboard_host: env::var("DASHBOARD_HOST").unwrap_or(defaults.dashboard_host),
            dashboard_port: parse_var("DASHBOARD_PORT", defaults.dashboard_port)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall a ticker or produce an empty chart.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("SENSOR_POLL_INTERVAL_MS", "must be > 0".into()));
        }
        if self.log_poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("LOG_POLL_INTERVAL_MS", "must be > 0".into()));
        }
        if self.chart_max_points == 0 {
            return Err(ConfigError::Invalid("CHART_MAX_POINTS", "must be > 0".into()));
        }
        if self.chart_width < 100 || self.chart_height < 60 {
            return Err(ConfigError::Invalid(
                "CHART_WIDTH/CHART_HEIGHT",
                "chart must be at least 100x60".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn sensor_poll_interval(&self) -> Duration {
        Duration::from_millis(self.sensor_poll_interval_ms)
    }

    #[must_use]
    pub fn log_poll_interval(&self) -> Duration {
        Duration::from_millis(self.log_poll_interval_ms)
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.dashboard_host, self.dashboard_port)
    }
}

fn parse_var<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(key, e.to_string())),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_device_cadence() {
        let config = Config::default();
        assert_eq!(config.sensor_poll_interval(), Duration::from_secs(2));
        assert_eq!(config.log_poll_interval(), Duration::from_secs(60));
        assert_eq!(config.chart_max_points, 20);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = Config {
            sensor_poll_interval_ms: 0,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("SENSOR_POLL_INTERVAL_MS"));

        let config = Config {
            log_poll_interval_ms: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_chart_window_is_rejected() {
        let config = Config {
            chart_max_points: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
