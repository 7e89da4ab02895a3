use serde::{Deserialize, Serialize};

/// Pump status string reported when the pump is running.
pub const PUMP_ON: &str = "ON";

/// Anomaly status string reported by the detector on an anomaly.
pub const ANOMALY: &str = "ANOMALY";

/// Response from `GET /data`: one snapshot of the device state.
///
/// Status fields are kept as the raw strings the device sends so that
/// unexpected values are still displayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub temperature: f64,
    pub water_level: f64,
    pub pump_status: String,
    pub anomaly_status: String,
    pub anomaly_value: f64,
}

impl SensorReading {
    #[must_use]
    pub fn is_pump_on(&self) -> bool {
        self.pump_status == PUMP_ON
    }

    /// Chart flag for the anomaly series: `1` on `"ANOMALY"`, `0` otherwise.
    #[must_use]
    pub fn anomaly_flag(&self) -> u8 {
        u8::from(self.anomaly_status == ANOMALY)
    }
}

/// Response from `GET /log` is a JSON array of these, oldest first as stored
/// on the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: String,
    pub temperature: f64,
    pub water_level: f64,
    pub pump_status: String,
    pub anomaly_status: String,
    pub anomaly_value: f64,
}
