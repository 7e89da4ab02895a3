use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::routes::escape_html;
use crate::views::chart::{
    Axis, ChartSeries, Dataset, ANOMALY_AXIS, ANOMALY_DATASET, TEMPERATURE_AXIS,
    TEMPERATURE_DATASET,
};
use crate::views::log_table::COLUMNS;
use crate::views::page::{ids, Element, Notice, NoticeKind, Page};
use crate::views::Dashboard;

/// Where the clear-log form sends the browser that submitted it.
pub const NOTICE_LOCATION: &str = "/?notice=1";

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    #[serde(default)]
    pub notice: u8,
}

/// The live dashboard page.
///
/// A pending notice is only taken by the view that follows a clear-log
/// submission, so plain refreshes from other tabs leave it in place. It is
/// shown once, then dropped.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> impl IntoResponse {
    let refresh_ms = state.config.sensor_poll_interval_ms;
    let html = if query.notice != 0 {
        let mut dashboard = state.dashboard.write().await;
        let notice = dashboard.page.take_notice();
        render_page(&dashboard, notice.as_ref(), refresh_ms)
    } else {
        render_page(&*state.dashboard.read().await, None, refresh_ms)
    };

    ([(header::CACHE_CONTROL, "no-store")], Html(html))
}

#[derive(Serialize)]
pub struct ChartSnapshot<'a> {
    pub revision: u64,
    pub max_points: usize,
    pub series: &'a ChartSeries,
    pub axes: [Axis; 2],
    pub datasets: [Dataset; 2],
}

#[derive(Serialize)]
pub struct Snapshot<'a> {
    pub page: &'a Page,
    pub chart: ChartSnapshot<'a>,
}

/// The page model and chart series as JSON.
pub async fn snapshot(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let dashboard = state.dashboard.read().await;
    let chart = &dashboard.chart;

    let body = serde_json::to_value(Snapshot {
        page: &dashboard.page,
        chart: ChartSnapshot {
            revision: chart.revision(),
            max_points: chart.config().max_points,
            series: chart.series(),
            axes: [TEMPERATURE_AXIS, ANOMALY_AXIS],
            datasets: [TEMPERATURE_DATASET, ANOMALY_DATASET],
        },
    })
    .map_err(|e| AppError::Render(format!("Failed to serialize snapshot: {e}")))?;

    Ok(Json(body))
}

fn element_html(page: &Page, id: &str) -> String {
    let placeholder = Element {
        text: page.text(id).to_string(),
        ..Element::default()
    };
    let element = page.element(id).unwrap_or(&placeholder);

    let mut style = format!("font-weight: {}", element.style.font_weight.as_css());
    if let Some(color) = &element.style.color {
        style.push_str(&format!("; color: {color}"));
    }
    let class = element
        .style
        .class
        .as_deref()
        .map(|c| format!(" class=\"{}\"", escape_html(c)))
        .unwrap_or_default();

    format!(
        "<span id=\"{id}\"{class} style=\"{}\">{}</span>",
        escape_html(&style),
        escape_html(&element.text)
    )
}

fn notice_html(notice: Option<&Notice>) -> String {
    notice.map_or_else(String::new, |n| {
        let kind = match n.kind {
            NoticeKind::Success => "success",
            NoticeKind::Failure => "failure",
        };
        format!(
            "<div class=\"notice {kind}\" role=\"alert\">{}</div>\n",
            escape_html(&n.message)
        )
    })
}

fn log_table_html(page: &Page) -> String {
    let mut html = format!("<table id=\"{}\">\n<thead><tr>", ids::LOG_TABLE);
    for column in COLUMNS {
        html.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in page.log_rows() {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>");
    html
}

/// Render the whole dashboard document.
pub fn render_page(dashboard: &Dashboard, notice: Option<&Notice>, refresh_ms: u64) -> String {
    let page = &dashboard.page;
    let chart = &dashboard.chart;
    let config = chart.config();
    let refresh_secs = refresh_ms.div_ceil(1000).max(1);

    let mut html = String::with_capacity(8 * 1024);
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<meta http-equiv="refresh" content="{refresh_secs}; url=/">
<title>Tank Monitor</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<h1>Tank Monitor</h1>
"#
    ));
    html.push_str(&notice_html(notice));

    html.push_str("<div class=\"cards\">\n");
    for (title, id) in [
        ("Temperature", ids::TEMP_VALUE),
        ("Water Level", ids::LEVEL_VALUE),
        ("Pump", ids::PUMP_STATUS),
    ] {
        html.push_str(&format!(
            "<div class=\"card\"><h2>{title}</h2><p>{}</p></div>\n",
            element_html(page, id)
        ));
    }
    html.push_str(&format!(
        "<div class=\"card\"><h2>Anomaly</h2><p>{}</p><p class=\"sub\">{}</p></div>\n</div>\n",
        element_html(page, ids::ANOMALY_STATUS),
        element_html(page, ids::ANOMALY_VALUE)
    ));

    html.push_str(&format!(
        r#"<div class="chart">
<div class="legend"><span style="color: {}">&#9632; {}</span> <span style="color: {}">&#9632; {}</span></div>
<div class="axes"><span>{}</span><span>{}</span></div>
<img id="{}" src="/chart.png?rev={}" width="{}" height="{}" alt="Live temperature and anomaly chart">
</div>
"#,
        TEMPERATURE_DATASET.color,
        escape_html(TEMPERATURE_DATASET.label),
        ANOMALY_DATASET.color,
        escape_html(ANOMALY_DATASET.label),
        escape_html(TEMPERATURE_AXIS.title),
        escape_html(ANOMALY_AXIS.title),
        ids::LIVE_CHART,
        chart.revision(),
        config.width,
        config.height,
    ));

    html.push_str("<div class=\"log\">\n<div class=\"log-header\"><h2>Log</h2>");
    html.push_str(
        "<a class=\"button\" href=\"/log.csv\">Download CSV</a> \
         <a class=\"button danger\" href=\"/clear-log\">Clear log</a></div>\n",
    );
    html.push_str(&log_table_html(page));
    html.push_str("\n</div>\n</div>\n</body>\n</html>\n");

    html
}

pub(crate) const STYLE: &str = r"
body { font-family: system-ui, -apple-system, sans-serif; background: #f5f7fa; color: #263238; margin: 0; }
.container { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
h1 { font-size: 1.4rem; }
h2 { font-size: 0.9rem; color: #607d8b; margin: 0 0 0.4rem; text-transform: uppercase; }
.cards { display: flex; gap: 1rem; flex-wrap: wrap; margin-bottom: 1rem; }
.card { background: #fff; border-radius: 0.5rem; padding: 1rem; flex: 1; min-width: 160px; }
.card p { font-size: 1.5rem; margin: 0; }
.card p.sub { font-size: 0.9rem; color: #607d8b; }
.NOMINAL { color: #2e7d32; font-weight: bold; }
.ANOMALY { color: #d32f2f; font-weight: bold; }
.chart, .log { background: #fff; border-radius: 0.5rem; padding: 1rem; margin-bottom: 1rem; }
.chart img { max-width: 100%; height: auto; }
.legend, .axes { display: flex; justify-content: space-between; font-size: 0.8rem; color: #607d8b; }
.log-header { display: flex; justify-content: space-between; align-items: center; }
table { width: 100%; border-collapse: collapse; font-size: 0.85rem; }
th, td { padding: 0.35rem 0.5rem; border-bottom: 1px solid #eceff1; text-align: left; }
.button { padding: 0.4rem 0.8rem; border-radius: 0.3rem; background: #1565c0; color: #fff; text-decoration: none; border: none; cursor: pointer; font-size: 0.85rem; }
.button.danger { background: #d32f2f; }
.button.secondary { background: #90a4ae; }
.notice { padding: 0.75rem 1rem; border-radius: 0.4rem; margin-bottom: 1rem; }
.notice.success { background: #e8f5e9; color: #1b5e20; }
.notice.failure { background: #ffebee; color: #b71c1c; }
";
