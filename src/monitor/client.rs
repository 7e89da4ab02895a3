use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::monitor::models::{LogEntry, SensorReading};

/// HTTP client for the monitor device.
///
/// No request timeout is configured; a slow device only delays the cycle
/// that is waiting on it.
pub struct MonitorClient {
    http_client: Client,
    base_url: String,
}

impl MonitorClient {
    /// # Errors
    ///
    /// Returns `AppError::Transport` if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("tank-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.monitor_base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the latest sensor snapshot.
    ///
    /// # Errors
    ///
    /// `Transport` on network failure, `Rejected` on a non-success status,
    /// `Payload` if the body is not a valid reading.
    pub async fn get_data(&self) -> AppResult<SensorReading> {
        self.get_json("data").await
    }

    /// Get the full stored log.
    ///
    /// # Errors
    ///
    /// Same as [`MonitorClient::get_data`].
    pub async fn get_log(&self) -> AppResult<Vec<LogEntry>> {
        self.get_json("log").await
    }

    /// Ask the device to wipe its log file. Success is signalled by status only.
    ///
    /// # Errors
    ///
    /// `Transport` on network failure, `Rejected` on a non-success status.
    pub async fn clear_log(&self) -> AppResult<()> {
        let url = format!("{}/clear", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Rejected(response.status()));
        }

        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Rejected(response.status()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to get response text: {e}")))?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::debug!(
                error = %e,
                path,
                body_preview = %text.chars().take(200).collect::<String>(),
                "Failed to parse monitor response"
            );
            AppError::Payload(format!("Failed to parse /{path} response: {e}"))
        })
    }
}
