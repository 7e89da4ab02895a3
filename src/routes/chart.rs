use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::common::AppState;
use crate::error::AppResult;

/// Current chart frame as PNG.
pub async fn chart_png(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let png = state.dashboard.read().await.chart.encode_png()?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    ))
}
