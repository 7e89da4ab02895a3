use crate::monitor::models::LogEntry;
use crate::views::page::{LogRow, Page};

/// Column headers, in row cell order.
pub const COLUMNS: [&str; 6] = [
    "Timestamp",
    "Temperature (°C)",
    "Water Level (%)",
    "Pump Status",
    "Anomaly Status",
    "Anomaly Value",
];

/// Full-replace renderer for the log table body.
pub struct LogTable;

impl LogTable {
    pub fn render(page: &mut Page, entries: &[LogEntry]) {
        let rows = entries.iter().map(row).collect();
        page.replace_log_rows(rows);
    }
}

fn row(entry: &LogEntry) -> LogRow {
    [
        entry.timestamp.clone(),
        entry.temperature.to_string(),
        entry.water_level.to_string(),
        entry.pump_status.clone(),
        entry.anomaly_status.clone(),
        entry.anomaly_value.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(timestamp: &str, temperature: f64) -> LogEntry {
        LogEntry {
            timestamp: timestamp.to_string(),
            temperature,
            water_level: 75.0,
            pump_status: "ON".to_string(),
            anomaly_status: "NOMINAL".to_string(),
            anomaly_value: 0.1,
        }
    }

    #[test]
    fn empty_log_has_no_rows() {
        let mut page = Page::new();
        LogTable::render(&mut page, &[]);
        assert!(page.log_rows().is_empty());
    }

    #[test]
    fn rows_follow_input_order() {
        let mut page = Page::new();
        let entries = vec![entry("10:02", 22.0), entry("10:00", 21.5), entry("10:01", 21.75)];
        LogTable::render(&mut page, &entries);

        let rows = page.log_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "10:02");
        assert_eq!(rows[1][0], "10:00");
        assert_eq!(rows[2][0], "10:01");
        assert_eq!(
            rows[2],
            ["10:01", "21.75", "75", "ON", "NOMINAL", "0.1"].map(String::from)
        );
    }

    #[test]
    fn second_render_replaces_rows() {
        let mut page = Page::new();
        LogTable::render(&mut page, &[entry("a", 1.0), entry("b", 2.0)]);
        LogTable::render(&mut page, &[entry("c", 3.0)]);

        let rows = page.log_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "c");
    }
}
