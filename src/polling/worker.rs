use chrono::Local;

use crate::common::AppState;
use crate::error::AppResult;

/// Chart label for a reading: local wall-clock time.
#[must_use]
pub fn time_label() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// One sensor cycle: fetch the latest reading, then update the status panel
/// and append it to the chart.
///
/// On error nothing is rendered and the previous values stay on screen.
///
/// # Errors
///
/// Propagates transport, status and payload errors from the monitor.
pub async fn update_sensor_data(state: &AppState) -> AppResult<()> {
    let reading = state.monitor.get_data().await?;
    let label = time_label();

    state.dashboard.write().await.show_reading(label, &reading);

    tracing::debug!(
        temperature = reading.temperature,
        water_level = reading.water_level,
        pump = %reading.pump_status,
        anomaly = %reading.anomaly_status,
        "Sensor data updated"
    );
    Ok(())
}

/// One log cycle: fetch the whole log and replace the table body.
///
/// Returns the number of rows rendered.
///
/// # Errors
///
/// Propagates transport, status and payload errors from the monitor.
pub async fn update_log_table(state: &AppState) -> AppResult<usize> {
    let entries = state.monitor.get_log().await?;

    state.dashboard.write().await.show_log(&entries);

    tracing::debug!(rows = entries.len(), "Log table updated");
    Ok(entries.len())
}

/// Sensor cycle with the polling error policy applied: log and move on.
pub async fn sensor_cycle(state: AppState) {
    if let Err(e) = update_sensor_data(&state).await {
        tracing::error!(error = %e, "Error fetching sensor data");
    }
}

/// Log cycle with the polling error policy applied: log and move on.
pub async fn log_cycle(state: AppState) {
    if let Err(e) = update_log_table(&state).await {
        tracing::error!(error = %e, "Error fetching log data");
    }
}
