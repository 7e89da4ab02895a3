use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use serde::Serialize;
use std::collections::VecDeque;
use std::io::Cursor;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::views::fonts::{self, FontConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartConfig {
    /// Sliding window size; older points are evicted first.
    pub max_points: usize,
    pub width: u32,
    pub height: u32,
}

impl From<&Config> for ChartConfig {
    fn from(config: &Config) -> Self {
        Self {
            max_points: config.chart_max_points,
            width: config.chart_width,
            height: config.chart_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Axis {
    pub title: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

/// Left axis, auto-ranged over the visible window.
pub const TEMPERATURE_AXIS: Axis = Axis {
    title: "Temperature (°C)",
    min: None,
    max: None,
    step: None,
};

/// Right axis for the 0/1 anomaly flag.
pub const ANOMALY_AXIS: Axis = Axis {
    title: "Anomaly Status",
    min: Some(-0.5),
    max: Some(1.5),
    step: Some(1.0),
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dataset {
    pub label: &'static str,
    pub color: &'static str,
}

pub const TEMPERATURE_DATASET: Dataset = Dataset {
    label: "Temperature (°C)",
    color: "rgba(21, 101, 192, 1)",
};

pub const ANOMALY_DATASET: Dataset = Dataset {
    label: "Anomaly (0: Nominal, 1: Anomaly)",
    color: "rgba(211, 47, 47, 1)",
};

/// Three parallel FIFO sequences that always share one length.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartSeries {
    labels: VecDeque<String>,
    temperatures: VecDeque<f64>,
    anomaly_flags: VecDeque<u8>,
}

impl ChartSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> &VecDeque<String> {
        &self.labels
    }

    #[must_use]
    pub fn temperatures(&self) -> &VecDeque<f64> {
        &self.temperatures
    }

    #[must_use]
    pub fn anomaly_flags(&self) -> &VecDeque<u8> {
        &self.anomaly_flags
    }

    fn push(&mut self, label: String, temperature: f64, anomaly_flag: u8) {
        self.labels.push_back(label);
        self.temperatures.push_back(temperature);
        self.anomaly_flags.push_back(anomaly_flag);
    }

    fn evict_oldest(&mut self) {
        self.labels.pop_front();
        self.temperatures.pop_front();
        self.anomaly_flags.pop_front();
    }
}

/// Live dual-axis line chart of temperature and anomaly status.
///
/// A `ChartView` only exists once [`ChartView::initialize`] has run, so every
/// append lands on an initialized chart.
#[derive(Debug, Clone)]
pub struct ChartView {
    config: ChartConfig,
    series: ChartSeries,
    frame: RgbaImage,
    revision: u64,
}

impl ChartView {
    /// Create an empty chart and draw its first (empty) frame.
    #[must_use]
    pub fn initialize(config: ChartConfig) -> Self {
        let series = ChartSeries::default();
        let frame = draw_frame(&config, &series);

        Self {
            config,
            series,
            frame,
            revision: 0,
        }
    }

    /// Push one point to every series, evict the oldest point once the window
    /// is exceeded, then redraw.
    ///
    /// Any non-zero flag is recorded as `1`. Temperatures are stored as given;
    /// non-finite values are skipped when drawing.
    pub fn append(&mut self, label: String, temperature: f64, anomaly_flag: u8) {
        self.series.push(label, temperature, u8::from(anomaly_flag != 0));

        if self.series.len() > self.config.max_points {
            self.series.evict_oldest();
        }

        self.redraw();
    }

    #[must_use]
    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    #[must_use]
    pub fn config(&self) -> ChartConfig {
        self.config
    }

    /// Number of redraws since initialization.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    /// Encode the current frame as PNG.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if the encoder fails.
    pub fn encode_png(&self) -> AppResult<Vec<u8>> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(self.frame.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .map_err(|e| AppError::Render(format!("Failed to encode chart: {e}")))?;
        Ok(bytes)
    }

    fn redraw(&mut self) {
        self.frame = draw_frame(&self.config, &self.series);
        self.revision += 1;
    }
}

const MARGIN_LEFT: u32 = 52;
const MARGIN_RIGHT: u32 = 36;
const MARGIN_TOP: u32 = 24;
const MARGIN_BOTTOM: u32 = 16;
const TEMPERATURE_GRID_LINES: u32 = 5;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GRID: Rgba<u8> = Rgba([230, 230, 230, 255]);
const AXIS_LINE: Rgba<u8> = Rgba([120, 120, 120, 255]);
const LABEL: Rgba<u8> = Rgba([84, 110, 122, 255]);
const TEMPERATURE_LINE: Rgba<u8> = Rgba([21, 101, 192, 255]);
const ANOMALY_LINE: Rgba<u8> = Rgba([211, 47, 47, 255]);
// Anomaly colour at 20% opacity over the background
const ANOMALY_FILL: Rgba<u8> = Rgba([246, 213, 213, 255]);

struct PlotArea {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl PlotArea {
    fn new(config: &ChartConfig) -> Self {
        Self {
            left: MARGIN_LEFT as f32,
            top: MARGIN_TOP as f32,
            right: config.width.saturating_sub(MARGIN_RIGHT) as f32,
            bottom: config.height.saturating_sub(MARGIN_BOTTOM) as f32,
        }
    }

    fn x_at(&self, index: usize, count: usize) -> f32 {
        if count <= 1 {
            return self.left;
        }
        self.left + (self.right - self.left) * index as f32 / (count - 1) as f32
    }

    fn y_at(&self, value: f64, min: f64, max: f64) -> f32 {
        let ratio = ((value - min) / (max - min)) as f32;
        self.bottom - (self.bottom - self.top) * ratio
    }

    fn grid_y(&self, line: u32) -> f32 {
        self.top + (self.bottom - self.top) * line as f32 / TEMPERATURE_GRID_LINES as f32
    }
}

/// Visible temperature range with 10% headroom.
fn temperature_range(series: &ChartSeries) -> (f64, f64) {
    let mut finite = series.temperatures.iter().copied().filter(|t| t.is_finite());
    let Some(first) = finite.next() else {
        return (0.0, 1.0);
    };
    let (min, max) = finite.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));

    if max - min < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.1;
    (min - pad, max + pad)
}

fn fill_rect(image: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, colour: Rgba<u8>) {
    let width = (x1 - x0).round() as i64;
    let height = (y1 - y0).round() as i64;
    if width < 1 || height < 1 {
        return;
    }
    draw_filled_rect_mut(
        image,
        Rect::at(x0.round() as i32, y0.round() as i32).of_size(width as u32, height as u32),
        colour,
    );
}

fn text(image: &mut RgbaImage, x: i32, y: i32, font_config: &FontConfig, label: &str) {
    draw_text_mut(image, LABEL, x, y, font_config.scale, font_config.font, label);
}

/// Tick values on both axes, plus the axis titles above the plot.
fn draw_labels(
    image: &mut RgbaImage,
    area: &PlotArea,
    (t_min, t_max): (f64, f64),
    (a_min, a_max): (f64, f64),
) {
    let (Some(ticks), Some(titles)) = (fonts::tick_font_config(), fonts::title_font_config()) else {
        return;
    };

    // Temperature values at each grid line, right-aligned against the axis
    for line in 0..=TEMPERATURE_GRID_LINES {
        let value = t_max - (t_max - t_min) * f64::from(line) / f64::from(TEMPERATURE_GRID_LINES);
        let label = format!("{value:.1}");
        let (width, height) = text_size(ticks.scale, ticks.font, &label);
        let y = area.grid_y(line).round() as i32;
        text(image, area.left as i32 - width - 4, y - height / 2, &ticks, &label);
    }

    let step = ANOMALY_AXIS.step.unwrap_or(1.0);
    let mut tick = a_min.ceil();
    while tick <= a_max {
        let label = (tick.round() as i64).to_string();
        let (_, height) = text_size(ticks.scale, ticks.font, &label);
        let y = area.y_at(tick, a_min, a_max).round() as i32;
        text(image, area.right as i32 + 9, y - height / 2, &ticks, &label);
        tick += step;
    }

    let image_width = image.width() as i32;
    text(image, 4, 4, &titles, TEMPERATURE_AXIS.title);
    let (width, _) = text_size(titles.scale, titles.font, ANOMALY_AXIS.title);
    text(image, image_width - width - 4, 4, &titles, ANOMALY_AXIS.title);
}

fn thick_segment(image: &mut RgbaImage, from: (f32, f32), to: (f32, f32), colour: Rgba<u8>) {
    draw_line_segment_mut(image, from, to, colour);
    draw_line_segment_mut(image, (from.0, from.1 + 1.0), (to.0, to.1 + 1.0), colour);
}

fn draw_frame(config: &ChartConfig, series: &ChartSeries) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(config.width, config.height, BACKGROUND);
    let area = PlotArea::new(config);
    let count = series.len();

    let (t_min, t_max) = temperature_range(series);
    let a_min = ANOMALY_AXIS.min.unwrap_or(-0.5);
    let a_max = ANOMALY_AXIS.max.unwrap_or(1.5);

    // Temperature grid
    for line in 0..=TEMPERATURE_GRID_LINES {
        let y = area.grid_y(line);
        draw_line_segment_mut(&mut image, (area.left, y), (area.right, y), GRID);
    }

    // Anomaly shading between the stepped line and zero
    let zero_y = area.y_at(0.0, a_min, a_max);
    let one_y = area.y_at(1.0, a_min, a_max);
    for (i, flag) in series.anomaly_flags.iter().enumerate() {
        if *flag == 1 {
            let x0 = area.x_at(i, count);
            let x1 = if i + 1 < count { area.x_at(i + 1, count) } else { area.right };
            fill_rect(&mut image, x0, one_y, x1.max(x0 + 2.0), zero_y, ANOMALY_FILL);
        }
    }

    // Axes with the anomaly ticks (step 1) on the right
    draw_line_segment_mut(&mut image, (area.left, area.top), (area.left, area.bottom), AXIS_LINE);
    draw_line_segment_mut(&mut image, (area.right, area.top), (area.right, area.bottom), AXIS_LINE);
    draw_line_segment_mut(&mut image, (area.left, area.bottom), (area.right, area.bottom), AXIS_LINE);
    let step = ANOMALY_AXIS.step.unwrap_or(1.0);
    let mut tick = a_min.ceil();
    while tick <= a_max {
        let y = area.y_at(tick, a_min, a_max);
        draw_line_segment_mut(&mut image, (area.right, y), (area.right + 6.0, y), AXIS_LINE);
        tick += step;
    }
    draw_labels(&mut image, &area, (t_min, t_max), (a_min, a_max));

    // Anomaly series, stepped
    let flags: Vec<f32> = series
        .anomaly_flags
        .iter()
        .map(|f| area.y_at(f64::from(*f), a_min, a_max))
        .collect();
    for i in 1..count {
        let (x_prev, x) = (area.x_at(i - 1, count), area.x_at(i, count));
        thick_segment(&mut image, (x_prev, flags[i - 1]), (x, flags[i - 1]), ANOMALY_LINE);
        draw_line_segment_mut(&mut image, (x, flags[i - 1]), (x, flags[i]), ANOMALY_LINE);
    }

    // Temperature series; non-finite readings break the line
    let points: Vec<Option<(f32, f32)>> = series
        .temperatures
        .iter()
        .enumerate()
        .map(|(i, t)| t.is_finite().then(|| (area.x_at(i, count), area.y_at(*t, t_min, t_max))))
        .collect();
    for pair in points.windows(2) {
        if let [Some(from), Some(to)] = pair {
            thick_segment(&mut image, *from, *to, TEMPERATURE_LINE);
        }
    }
    for (x, y) in points.iter().flatten() {
        fill_rect(&mut image, x - 2.0, y - 2.0, x + 2.0, y + 2.0, TEMPERATURE_LINE);
    }

    image
}
