pub mod chart;
mod fonts;
pub mod log_table;
pub mod page;
pub mod status;

pub use chart::{ChartConfig, ChartView};
pub use log_table::LogTable;
pub use page::Page;
pub use status::StatusPanel;

use crate::config::Config;
use crate::monitor::models::{LogEntry, SensorReading};

/// Everything the browser sees: the page model plus the live chart.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub page: Page,
    pub chart: ChartView,
}

impl Dashboard {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            page: Page::new(),
            chart: ChartView::initialize(ChartConfig::from(config)),
        }
    }

    /// Render one successful sensor cycle: status panel first, then the chart.
    pub fn show_reading(&mut self, label: String, reading: &SensorReading) {
        StatusPanel::render(&mut self.page, reading);
        self.chart.append(label, reading.temperature, reading.anomaly_flag());
    }

    pub fn show_log(&mut self, entries: &[LogEntry]) {
        LogTable::render(&mut self.page, entries);
    }
}
