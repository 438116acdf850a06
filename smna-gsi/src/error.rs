/// Error types for the SMNA dashboard core
use thiserror::Error;

/// Main error type for SMNA operations.
///
/// Every variant except `InvalidTimestamp` and `InvalidRecord` signals a
/// mismatch between the values offered by the UI and the enumerations the
/// core knows about. Those abort the current render; they are never
/// silently replaced by a default.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SmnaError {
    /// Synoptic time label outside the known set
    #[error("Unknown synoptic time label: {0}")]
    UnknownSynopticTime(String),

    /// Observation type label outside the known set
    #[error("Unknown observation type: {0}")]
    UnknownObservationType(String),

    /// Iteration stage label outside the known set
    #[error("Unknown iteration stage: {0}")]
    UnknownIterationStage(String),

    /// Metric column outside `Nobs`, `Jo`, `Jo/n`
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Experiment not present in the loaded table
    #[error("Experiment not found: {0}")]
    UnknownExperiment(String),

    /// Timestamp cell that matches none of the accepted formats
    #[error("Failed to parse timestamp: {0}")]
    InvalidTimestamp(String),

    /// Row that cannot be turned into an observation record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Type alias for Results using SmnaError
pub type Result<T> = std::result::Result<T, SmnaError>;
