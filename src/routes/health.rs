use axum::http::StatusCode;

/// Health check endpoint
///
/// Returns 200 OK if the dashboard process is serving, whether or not the
/// monitor device is reachable.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
