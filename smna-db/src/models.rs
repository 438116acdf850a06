//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be passed to the chart side
//! as JSON.

use serde::Serialize;

/// Summary of one experiment partition, for selection lists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExperimentInfo {
    /// Experiment name (first-level column key, e.g. "df_dtc").
    pub name: String,
    /// Number of records loaded for this experiment.
    pub record_count: usize,
    /// Earliest cycle, "YYYY-MM-DD HH:MM:SS"; `None` when empty.
    pub first_date: Option<String>,
    /// Latest cycle, "YYYY-MM-DD HH:MM:SS"; `None` when empty.
    pub last_date: Option<String>,
}
