use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Monitor request failed: {0}")]
    Transport(String),

    #[error("Malformed monitor payload: {0}")]
    Payload(String),

    #[error("Monitor returned HTTP {0}")]
    Rejected(reqwest::StatusCode),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Render error: {0}")]
    Render(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Transport(_) | Self::Payload(_) | Self::Rejected(_) => {
                tracing::error!("Monitor error: {self}");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            Self::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Render error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
