//! Reusable Dioxus RSX components for the SMNA dashboard.

mod chart_container;
mod chart_header;
mod error_display;
mod experiment_selector;
mod iteration_selector;
mod loading_spinner;
mod synoptic_time_selector;
mod variable_selector;

pub use chart_container::{chart_dom_id, ChartContainer};
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use experiment_selector::ExperimentSelector;
pub use iteration_selector::IterationSelector;
pub use loading_spinner::LoadingSpinner;
pub use synoptic_time_selector::SynopticTimeSelector;
pub use variable_selector::VariableSelector;

/// Caption style shared by the four controls.
const CAPTION_STYLE: &str = "font-weight: bold; margin-right: 8px;";
