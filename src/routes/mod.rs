pub mod chart;
pub mod clear;
pub mod dashboard;
pub mod export;
pub mod health;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::common::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/chart.png", get(chart::chart_png))
        .route("/clear-log", get(clear::confirm_page).post(clear::clear_log))
        .route("/log.csv", get(export::log_csv))
        .route("/api/snapshot", get(dashboard::snapshot))
        .route("/healthz", get(health::healthz))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Escape text for inclusion in HTML element content or attribute values.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
