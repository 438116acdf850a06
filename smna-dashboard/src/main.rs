//! SMNA Dashboard
//!
//! Compares GSI cost-function diagnostics (Nobs, Jo, Jo/n) across data
//! assimilation experiments. The user picks experiments, an observation
//! type, a synoptic time and a minimization stage; the page shows three
//! overlay charts, one line per selected experiment.
//!
//! Data flow:
//! 1. `build.rs` copies `jo_table_series.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds the table into the WASM binary.
//! 3. On mount, the table is loaded into an in-memory SQLite database and
//!    snapshotted into a `Catalog`, which backs a `Dashboard`.
//! 4. Every control change is dispatched to the dashboard, whose observer
//!    updates `AppState::charts`; an effect then redraws the three charts.

use dioxus::prelude::*;
use smna_chart_ui::components::{
    chart_dom_id, ChartContainer, ChartHeader, ErrorDisplay, ExperimentSelector,
    IterationSelector, LoadingSpinner, SynopticTimeSelector, VariableSelector,
};
use smna_chart_ui::js_bridge;
use smna_chart_ui::state::AppState;
use smna_data::dashboard::Dashboard;
use smna_data::source::Catalog;
use smna_db::Database;
use smna_gsi::observation::Metric;
use smna_utils::dates::{format_cycle, parse_timestamp};

/// Per-experiment cost-function table (two-level CSV).
const JO_TABLE_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/jo_table_series.csv"));

const TITLE: &str = "SMNA Dashboard";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("smna-dashboard-root"))
        .launch(App);
}

/// Load the embedded table and snapshot it into a catalog.
///
/// Also returns a one-line description of the loaded period.
fn load_catalog() -> anyhow::Result<(Catalog, String)> {
    let db = Database::new()?;
    db.load_jo_table_csv(JO_TABLE_CSV)?;
    let catalog = db.load_catalog()?;
    let period = match db.query_date_range()? {
        Some((first, last)) => format!(
            "{} experiments, {} to {}",
            catalog.len(),
            format_cycle(&parse_timestamp(&first)?),
            format_cycle(&parse_timestamp(&last)?)
        ),
        None => "no cycles loaded".to_string(),
    };
    Ok((catalog, period))
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let mut period = use_signal(String::new);

    // Load the table once on mount
    use_effect(move || {
        match load_catalog() {
            Ok((catalog, description)) => {
                log::info!(
                    "[SMNA Debug] Loaded {} records from {} experiments",
                    catalog.record_count(),
                    catalog.len()
                );
                period.set(description);
                js_bridge::init_charts();
                state.install(Dashboard::new(catalog));
            }
            Err(e) => {
                log::error!("Failed to load experiment table: {:#}", e);
                state
                    .error_msg
                    .set(Some(format!("Failed to load experiment table: {:#}", e)));
            }
        }
        state.loading.set(false);
    });

    // Redraw every chart whenever the dashboard publishes new charts
    use_effect(move || {
        let charts = match &*state.charts.read() {
            Some(charts) => charts.clone(),
            None => {
                log::info!("[SMNA Debug] Exiting: no charts yet");
                return;
            }
        };
        for chart in charts.iter() {
            // Drawn even without series so the axes stay visible.
            js_bridge::render_overlay_chart(&chart_dom_id(chart.metric), chart);
        }
    });

    let has_charts = state.charts.read().is_some();
    let height = state
        .dashboard
        .read()
        .as_ref()
        .map_or(250, |d| d.style().height);

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: TITLE.to_string(),
                subtitle: period(),
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; gap: 24px;",
                    div {
                        style: "flex: 0 0 280px;",
                        ExperimentSelector {}
                        VariableSelector {}
                        SynopticTimeSelector {}
                        IterationSelector {}
                    }
                    div {
                        style: "flex: 1 1 auto; min-width: 0;",
                        if let Some(err) = (state.render_error)() {
                            ErrorDisplay { heading: "Cannot draw charts".to_string(), message: err }
                        }
                        for metric in Metric::ALL {
                            ChartContainer {
                                key: "{metric}",
                                metric: metric,
                                loading: !has_charts,
                                height: height,
                            }
                        }
                    }
                }
            }
        }
    }
}
