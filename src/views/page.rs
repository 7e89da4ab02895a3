//! In-memory document the view components render into.
//!
//! Elements are addressed by the same ids the served HTML uses, so a view
//! never needs to know how the page is eventually delivered.

use serde::Serialize;
use std::collections::BTreeMap;

/// Element ids shared by the views and the HTML template.
pub mod ids {
    pub const LIVE_CHART: &str = "liveChart";
    pub const TEMP_VALUE: &str = "temp-value";
    pub const LEVEL_VALUE: &str = "level-value";
    pub const PUMP_STATUS: &str = "pump-status";
    pub const ANOMALY_STATUS: &str = "anomaly-status";
    pub const ANOMALY_VALUE: &str = "anomaly-value";
    pub const LOG_TABLE: &str = "log-table";

    /// Text elements written by the status panel.
    pub const STATUS_ELEMENTS: [&str; 5] = [
        TEMP_VALUE,
        LEVEL_VALUE,
        PUMP_STATUS,
        ANOMALY_STATUS,
        ANOMALY_VALUE,
    ];
}

/// Text shown before the first successful reading.
pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Style {
    pub font_weight: FontWeight,
    pub color: Option<String>,
    pub class: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    pub text: String,
    pub style: Style,
}

/// One rendered log table row: timestamp, temperature, water level,
/// pump status, anomaly status, anomaly value.
pub type LogRow = [String; 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A one-shot message for the user, shown on the next page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    elements: BTreeMap<String, Element>,
    log_rows: Vec<LogRow>,
    notice: Option<Notice>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        let elements = ids::STATUS_ELEMENTS
            .iter()
            .map(|id| {
                (
                    (*id).to_string(),
                    Element {
                        text: PLACEHOLDER.to_string(),
                        style: Style::default(),
                    },
                )
            })
            .collect();

        Self {
            elements,
            log_rows: Vec::new(),
            notice: None,
        }
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Text of an element, or the placeholder if it was never written.
    #[must_use]
    pub fn text(&self, id: &str) -> &str {
        self.elements.get(id).map_or(PLACEHOLDER, |e| e.text.as_str())
    }

    pub fn element_mut(&mut self, id: &str) -> &mut Element {
        self.elements.entry(id.to_string()).or_default()
    }

    #[must_use]
    pub fn log_rows(&self) -> &[LogRow] {
        &self.log_rows
    }

    /// Drop every existing row and install `rows` in the given order.
    pub fn replace_log_rows(&mut self, rows: Vec<LogRow>) {
        self.log_rows = rows;
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            message: message.into(),
        });
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}
