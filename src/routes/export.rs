use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::views::log_table::COLUMNS;
use crate::views::page::LogRow;

/// Download the log table as it is currently displayed.
pub async fn log_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let body = {
        let dashboard = state.dashboard.read().await;
        to_csv(dashboard.page.log_rows())?
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"log.csv\""),
        ],
        body,
    ))
}

/// Serialize rows under the table's column headers.
///
/// # Errors
///
/// Returns `AppError::Render` if the CSV writer fails.
pub fn to_csv(rows: &[LogRow]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(COLUMNS)
        .map_err(|e| AppError::Render(format!("Failed to write CSV header: {e}")))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| AppError::Render(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Render(format!("Failed to flush CSV: {e}")))
}
