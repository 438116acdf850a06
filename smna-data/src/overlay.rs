//! Overlay composition: several experiments' series of one metric on a
//! shared time axis.

use crate::dashboard::Selection;
use crate::filter::{filter_series, SeriesPoint, SeriesQuery};
use crate::source::DataSource;
use crate::window::resolve;
use serde::{Deserialize, Serialize};
use smna_gsi::observation::Metric;
use smna_gsi::Result;

/// Fixed plotting parameters handed to the charting side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub x_label: String,
    pub line_width: u32,
    /// Rotation of the x tick labels, in degrees.
    pub tick_rotation: u32,
    pub grid: bool,
    /// Chart height in pixels.
    pub height: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            x_label: "Data".to_string(),
            line_width: 3,
            tick_rotation: 90,
            grid: true,
            height: 250,
        }
    }
}

/// One experiment's line in an overlay chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineSeries {
    /// Experiment name, shown in the legend.
    pub label: String,
    pub points: Vec<SeriesPoint>,
    pub line_width: u32,
    /// Number of x ticks; the length of the first series of the overlay.
    pub tick_count: usize,
}

/// Everything the charting side needs to draw one metric.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSpec {
    pub metric: Metric,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub tick_rotation: u32,
    pub grid: bool,
    pub height: u32,
    pub series: Vec<LineSeries>,
}

impl ChartSpec {
    /// Chart with axes and no lines.
    pub fn empty(metric: Metric, title: String, style: &ChartStyle) -> Self {
        Self {
            metric,
            title,
            x_label: style.x_label.clone(),
            y_label: metric.label().to_string(),
            tick_rotation: style.tick_rotation,
            grid: style.grid,
            height: style.height,
            series: Vec::new(),
        }
    }

    /// Shared tick density of the overlay, 0 without series.
    pub fn tick_count(&self) -> usize {
        self.series.first().map_or(0, |s| s.tick_count)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }
}

fn chart_title(metric: Metric, selection: &Selection) -> String {
    format!(
        "{}: {} / {} / {}",
        metric, selection.observation_type, selection.iteration_stage, selection.synoptic_time
    )
}

/// Compose the overlay chart of `metric` for the current selection.
///
/// Experiments are filtered independently, in selection order. The time
/// window is resolved once. Every series reuses the first series' length
/// as tick count, which assumes the experiments share one timestamp grid;
/// when they do not, the axis density follows the first experiment.
pub fn compose_overlay<S: DataSource + ?Sized>(
    source: &S,
    selection: &Selection,
    metric: Metric,
    style: &ChartStyle,
) -> Result<ChartSpec> {
    let mut chart = ChartSpec::empty(metric, chart_title(metric, selection), style);
    if selection.experiments.is_empty() {
        return Ok(chart);
    }

    let window = resolve(selection.synoptic_time);
    let mut tick_count = None;
    for experiment in &selection.experiments {
        let series = filter_series(
            source,
            &SeriesQuery {
                experiment,
                observation_type: selection.observation_type,
                iteration_stage: selection.iteration_stage,
                window: &window,
                metric,
            },
        )?;
        let ticks = *tick_count.get_or_insert(series.len());
        chart.series.push(LineSeries {
            label: experiment.clone(),
            points: series.points,
            line_width: style.line_width,
            tick_count: ticks,
        });
    }

    log::info!(
        "[SMNA Debug] overlay: {} composed {} series ({})",
        chart.title,
        chart.series.len(),
        chart
            .series
            .iter()
            .map(|s| format!("{}={}", s.label, s.points.len()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(chart)
}
