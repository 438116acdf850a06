//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! Controls never recompute charts themselves: they call
//! [`AppState::dispatch`] with a [`SelectionEvent`], the wrapped
//! [`Dashboard`] recomputes, and its observer pushes the new charts into
//! the `charts` signal.

use dioxus::prelude::*;
use smna_data::dashboard::{Dashboard, DashboardCharts, Selection, SelectionEvent};
use smna_data::source::{Catalog, DataSource};

/// Shared application state for the dashboard app.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Dashboard over the loaded table (None until loaded)
    pub dashboard: Signal<Option<Dashboard<Catalog>>>,
    /// Latest successfully recomputed charts
    pub charts: Signal<Option<DashboardCharts>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Fatal error, e.g. the table failed to load
    pub error_msg: Signal<Option<String>>,
    /// Error of the last recomputation, cleared by the next success
    pub render_error: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            dashboard: Signal::new(None),
            charts: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            render_error: Signal::new(None),
        }
    }

    /// Install the dashboard, subscribe the `charts` signal to it and
    /// render the initial selection.
    pub fn install(mut self, mut dashboard: Dashboard<Catalog>) {
        let mut charts = self.charts;
        dashboard.subscribe(move |latest| charts.set(Some(latest.clone())));
        if let Err(e) = dashboard.refresh() {
            self.render_error.set(Some(e.to_string()));
        }
        self.dashboard.set(Some(dashboard));
    }

    /// Forward a control change to the dashboard.
    pub fn dispatch(mut self, event: SelectionEvent) {
        let result = match self.dashboard.write().as_mut() {
            Some(dashboard) => dashboard.apply(event),
            None => {
                log::warn!("[SMNA Debug] dispatch before the table was loaded");
                return;
            }
        };
        match result {
            Ok(_) => self.render_error.set(None),
            Err(e) => self.render_error.set(Some(e.to_string())),
        }
    }

    /// Current selection, if the dashboard is loaded.
    pub fn selection(&self) -> Option<Selection> {
        self.dashboard.read().as_ref().map(|d| d.selection().clone())
    }

    /// Experiment names in table order.
    pub fn experiment_names(&self) -> Vec<String> {
        self.dashboard
            .read()
            .as_ref()
            .map(|d| {
                d.source()
                    .experiment_names()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
