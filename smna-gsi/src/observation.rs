use crate::error::{Result, SmnaError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Observation family as labelled in the `Observation Type` column.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "surface pressure")]
    SurfacePressure,
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "wind")]
    Wind,
    #[serde(rename = "moisture")]
    Moisture,
    #[serde(rename = "gps")]
    Gps,
    #[serde(rename = "radiance")]
    Radiance,
}

impl ObservationType {
    /// All observation types in the order the `Variável` control lists them.
    pub const ALL: [ObservationType; 6] = [
        ObservationType::SurfacePressure,
        ObservationType::Temperature,
        ObservationType::Wind,
        ObservationType::Moisture,
        ObservationType::Gps,
        ObservationType::Radiance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ObservationType::SurfacePressure => "surface pressure",
            ObservationType::Temperature => "temperature",
            ObservationType::Wind => "wind",
            ObservationType::Moisture => "moisture",
            ObservationType::Gps => "gps",
            ObservationType::Radiance => "radiance",
        }
    }
}

impl fmt::Display for ObservationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ObservationType {
    type Err = SmnaError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ObservationType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| SmnaError::UnknownObservationType(s.to_string()))
    }
}

/// Point of the outer/inner minimization loops at which OMF or OMA is
/// evaluated. Variants are declared in execution order, so `Ord` follows
/// the minimization.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IterationStage {
    #[serde(rename = "OMF")]
    Omf,
    #[serde(rename = "OMF (1st INNER LOOP)")]
    OmfInner1,
    #[serde(rename = "OMF (2nd INNER LOOP)")]
    OmfInner2,
    #[serde(rename = "OMA (AFTER 1st OUTER LOOP)")]
    OmaAfterOuter1,
    #[serde(rename = "OMA (1st INNER LOOP)")]
    OmaInner1,
    #[serde(rename = "OMA (2nd INNER LOOP)")]
    OmaInner2,
    #[serde(rename = "OMA (AFTER 2nd OUTER LOOP)")]
    OmaAfterOuter2,
}

impl IterationStage {
    pub const ALL: [IterationStage; 7] = [
        IterationStage::Omf,
        IterationStage::OmfInner1,
        IterationStage::OmfInner2,
        IterationStage::OmaAfterOuter1,
        IterationStage::OmaInner1,
        IterationStage::OmaInner2,
        IterationStage::OmaAfterOuter2,
    ];

    /// Label used in the `Iter` column of the source table.
    pub fn label(&self) -> &'static str {
        match self {
            IterationStage::Omf => "OMF",
            IterationStage::OmfInner1 => "OMF (1st INNER LOOP)",
            IterationStage::OmfInner2 => "OMF (2nd INNER LOOP)",
            IterationStage::OmaAfterOuter1 => "OMA (AFTER 1st OUTER LOOP)",
            IterationStage::OmaInner1 => "OMA (1st INNER LOOP)",
            IterationStage::OmaInner2 => "OMA (2nd INNER LOOP)",
            IterationStage::OmaAfterOuter2 => "OMA (AFTER 2nd OUTER LOOP)",
        }
    }

    /// True for observation-minus-analysis stages.
    pub fn is_analysis(&self) -> bool {
        !matches!(
            self,
            IterationStage::Omf | IterationStage::OmfInner1 | IterationStage::OmfInner2
        )
    }
}

impl fmt::Display for IterationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IterationStage {
    type Err = SmnaError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        IterationStage::ALL
            .into_iter()
            .find(|stage| stage.label() == s)
            .ok_or_else(|| SmnaError::UnknownIterationStage(s.to_string()))
    }
}

/// One of the three numeric columns charted by the dashboard.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Nobs")]
    Nobs,
    #[serde(rename = "Jo")]
    Jo,
    #[serde(rename = "Jo/n")]
    JoN,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Nobs, Metric::Jo, Metric::JoN];

    /// Column name, also used as the y-axis label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Nobs => "Nobs",
            Metric::Jo => "Jo",
            Metric::JoN => "Jo/n",
        }
    }

    /// Project this metric's column out of a record; `None` where the
    /// table has no value.
    pub fn value_of(&self, record: &ObservationRecord) -> Option<f64> {
        match self {
            Metric::Nobs => record.nobs.map(|n| n as f64),
            Metric::Jo => record.jo,
            Metric::JoN => record.jo_n,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = SmnaError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| SmnaError::UnknownMetric(s.to_string()))
    }
}

/// A single row of one experiment's partition of the source table.
///
/// Numeric cells may be missing (pandas writes NaN as an empty cell, e.g.
/// `Jo/n` of a cycle with `Nobs = 0`). The row still counts as a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// Analysis time of the cycle.
    pub date: NaiveDateTime,
    pub observation_type: ObservationType,
    pub iteration_stage: IterationStage,
    /// Number of observations used.
    pub nobs: Option<u64>,
    /// Observation term of the cost function.
    pub jo: Option<f64>,
    /// `Jo` divided by `Nobs`.
    pub jo_n: Option<f64>,
}

/// Parse a `Nobs` cell.
///
/// Tables written after a join with a shorter experiment store the column
/// as floats (`1520.0`), so integral non-negative floats are accepted.
pub fn parse_nobs(s: &str) -> Result<u64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u64>() {
        return Ok(n);
    }
    match s.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(v as u64),
        _ => Err(SmnaError::InvalidRecord(format!("Nobs is not a count: {:?}", s))),
    }
}
