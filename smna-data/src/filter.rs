//! Series filter: one experiment's records → the (date, value) series of
//! one selection.

use crate::source::DataSource;
use crate::window::TimeWindow;
use chrono::NaiveDateTime;
use serde::Serialize;
use smna_gsi::observation::{IterationStage, Metric, ObservationRecord, ObservationType};
use smna_gsi::{Result, SmnaError};
use smna_utils::dates::time_of_day;

/// Everything needed to cut one line out of the table.
#[derive(Debug, Clone, Copy)]
pub struct SeriesQuery<'a> {
    pub experiment: &'a str,
    pub observation_type: ObservationType,
    pub iteration_stage: IterationStage,
    pub window: &'a TimeWindow,
    pub metric: Metric,
}

/// A single (date, value) pair of a chart line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDateTime,
    /// `None` (serialized as `null`) where the cell is missing; the chart
    /// breaks the line there but the point still counts as a tick.
    pub value: Option<f64>,
}

/// Filtered series for one experiment, ordered by date.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Series {
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Number of points; drives x-axis tick density.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Records matching the observation type, the iteration stage and the
/// time window, in their original order.
pub fn matching_records<'r>(
    records: &'r [ObservationRecord],
    observation_type: ObservationType,
    iteration_stage: IterationStage,
    window: &'r TimeWindow,
) -> impl Iterator<Item = &'r ObservationRecord> + 'r {
    records.iter().filter(move |r| {
        r.observation_type == observation_type
            && r.iteration_stage == iteration_stage
            && window.contains(time_of_day(&r.date))
    })
}

/// Filter one experiment down to the series of `query.metric`.
///
/// No matching record is not an error: the result is an empty series.
pub fn filter_series<S: DataSource + ?Sized>(source: &S, query: &SeriesQuery) -> Result<Series> {
    let records = source
        .records(query.experiment)
        .ok_or_else(|| SmnaError::UnknownExperiment(query.experiment.to_string()))?;
    let points = matching_records(
        records,
        query.observation_type,
        query.iteration_stage,
        query.window,
    )
    .map(|r| SeriesPoint {
        date: r.date,
        value: query.metric.value_of(r),
    })
    .collect::<Vec<_>>();
    log::debug!(
        "[SMNA Debug] filter: {} {} {} {} returned {} points",
        query.experiment,
        query.observation_type,
        query.iteration_stage,
        query.metric,
        points.len()
    );
    Ok(Series { points })
}
