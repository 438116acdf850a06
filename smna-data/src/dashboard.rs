//! Selection state and recompute-on-event.
//!
//! The UI never recomputes a chart itself. It turns each control change
//! into a [`SelectionEvent`], hands it to [`Dashboard::apply`], and
//! receives the three charts (Nobs, Jo, Jo/n) through the observers it
//! subscribed. Every event recomputes everything from scratch.

use crate::overlay::{compose_overlay, ChartSpec, ChartStyle};
use crate::source::DataSource;
use serde::Serialize;
use smna_gsi::observation::{IterationStage, Metric, ObservationType};
use smna_gsi::synoptic::SynopticTime;
use smna_gsi::Result;

/// Current values of the four dashboard controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Selected experiments in the order they were picked, no duplicates.
    pub experiments: Vec<String>,
    pub observation_type: ObservationType,
    pub synoptic_time: SynopticTime,
    pub iteration_stage: IterationStage,
}

impl Selection {
    /// First experiment, first observation type, 00Z, OMF.
    pub fn initial<S: DataSource + ?Sized>(source: &S) -> Self {
        Self {
            experiments: source
                .experiment_names()
                .first()
                .map(|name| vec![name.to_string()])
                .unwrap_or_default(),
            observation_type: ObservationType::ALL[0],
            synoptic_time: SynopticTime::UI_OPTIONS[0],
            iteration_stage: IterationStage::ALL[0],
        }
    }

    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::ToggleExperiment(name) => {
                match self.experiments.iter().position(|e| *e == name) {
                    Some(index) => {
                        self.experiments.remove(index);
                    }
                    None => self.experiments.push(name),
                }
            }
            SelectionEvent::SetExperiments(names) => {
                let mut experiments: Vec<String> = Vec::with_capacity(names.len());
                for name in names {
                    if !experiments.contains(&name) {
                        experiments.push(name);
                    }
                }
                self.experiments = experiments;
            }
            SelectionEvent::SetObservationType(observation_type) => {
                self.observation_type = observation_type
            }
            SelectionEvent::SetSynopticTime(synoptic_time) => self.synoptic_time = synoptic_time,
            SelectionEvent::SetIterationStage(stage) => self.iteration_stage = stage,
        }
    }
}

/// A single control change.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Add the experiment at the end of the selection, or remove it if
    /// already selected.
    ToggleExperiment(String),
    /// Replace the whole experiment list; repeated names keep their first
    /// position.
    SetExperiments(Vec<String>),
    SetObservationType(ObservationType),
    SetSynopticTime(SynopticTime),
    SetIterationStage(IterationStage),
}

/// The three charts of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub nobs: ChartSpec,
    pub jo: ChartSpec,
    pub jo_n: ChartSpec,
}

impl DashboardCharts {
    pub fn get(&self, metric: Metric) -> &ChartSpec {
        match metric {
            Metric::Nobs => &self.nobs,
            Metric::Jo => &self.jo,
            Metric::JoN => &self.jo_n,
        }
    }

    /// Charts in page order: Nobs, Jo, Jo/n.
    pub fn iter(&self) -> impl Iterator<Item = &ChartSpec> {
        [&self.nobs, &self.jo, &self.jo_n].into_iter()
    }
}

/// Compose the three metric charts for one selection.
pub fn render_charts<S: DataSource + ?Sized>(
    source: &S,
    selection: &Selection,
    style: &ChartStyle,
) -> Result<DashboardCharts> {
    Ok(DashboardCharts {
        nobs: compose_overlay(source, selection, Metric::Nobs, style)?,
        jo: compose_overlay(source, selection, Metric::Jo, style)?,
        jo_n: compose_overlay(source, selection, Metric::JoN, style)?,
    })
}

type Observer = Box<dyn FnMut(&DashboardCharts)>;

/// Session state of one dashboard: the loaded table, the current
/// selection and whoever wants the charts.
pub struct Dashboard<S> {
    source: S,
    selection: Selection,
    style: ChartStyle,
    observers: Vec<Observer>,
}

impl<S: DataSource> Dashboard<S> {
    /// Dashboard over `source` with the initial selection and default style.
    pub fn new(source: S) -> Self {
        let selection = Selection::initial(&source);
        Self {
            source,
            selection,
            style: ChartStyle::default(),
            observers: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Register a callback invoked with every successfully recomputed set
    /// of charts.
    pub fn subscribe(&mut self, observer: impl FnMut(&DashboardCharts) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Apply a control change and recompute all charts.
    ///
    /// The selection change is kept even when recomputation fails, so the
    /// controls keep showing what the user picked alongside the error.
    pub fn apply(&mut self, event: SelectionEvent) -> Result<DashboardCharts> {
        log::info!("[SMNA Debug] dashboard: {:?}", event);
        self.selection.apply(event);
        self.refresh()
    }

    /// Recompute all charts for the current selection and notify observers.
    pub fn refresh(&mut self) -> Result<DashboardCharts> {
        let charts = render_charts(&self.source, &self.selection, &self.style).map_err(|e| {
            log::error!("[SMNA Debug] dashboard: render failed: {}", e);
            e
        })?;
        for observer in self.observers.iter_mut() {
            observer(&charts);
        }
        Ok(charts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Catalog;
    use crate::testing::sample_catalog;
    use smna_gsi::SmnaError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn initial_selection_mirrors_control_defaults() {
        let selection = Selection::initial(&sample_catalog());
        assert_eq!(selection.experiments, vec!["df_dtc".to_string()]);
        assert_eq!(selection.observation_type, ObservationType::SurfacePressure);
        assert_eq!(selection.synoptic_time, SynopticTime::H00);
        assert_eq!(selection.iteration_stage, IterationStage::Omf);
    }

    #[test]
    fn initial_selection_of_empty_table_has_no_experiment() {
        let selection = Selection::initial(&Catalog::new());
        assert!(selection.experiments.is_empty());
    }

    #[test]
    fn toggling_keeps_pick_order() {
        let mut selection = Selection::initial(&sample_catalog());
        selection.apply(SelectionEvent::ToggleExperiment("df_bamh_T4".to_string()));
        selection.apply(SelectionEvent::ToggleExperiment("df_bamh_T0".to_string()));
        assert_eq!(selection.experiments, vec!["df_dtc", "df_bamh_T4", "df_bamh_T0"]);
        selection.apply(SelectionEvent::ToggleExperiment("df_dtc".to_string()));
        assert_eq!(selection.experiments, vec!["df_bamh_T4", "df_bamh_T0"]);
    }

    #[test]
    fn set_experiments_drops_duplicates() {
        let mut selection = Selection::initial(&sample_catalog());
        selection.apply(SelectionEvent::SetExperiments(vec![
            "df_bamh_T0".to_string(),
            "df_dtc".to_string(),
            "df_bamh_T0".to_string(),
        ]));
        assert_eq!(selection.experiments, vec!["df_bamh_T0", "df_dtc"]);
    }

    #[test]
    fn render_charts_produces_three_metrics() {
        let catalog = sample_catalog();
        let selection = Selection::initial(&catalog);
        let charts = render_charts(&catalog, &selection, &ChartStyle::default()).unwrap();
        let metrics: Vec<Metric> = charts.iter().map(|c| c.metric).collect();
        assert_eq!(metrics, vec![Metric::Nobs, Metric::Jo, Metric::JoN]);
        assert_eq!(charts.get(Metric::Jo).y_label, "Jo");
        assert!(charts.iter().all(|c| c.tick_count() == 3));
    }

    #[test]
    fn every_event_notifies_observers_with_fresh_charts() {
        let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut dashboard = Dashboard::new(sample_catalog());
        dashboard.subscribe(move |charts| {
            sink.borrow_mut()
                .push(charts.nobs.labels().iter().map(|l| l.to_string()).collect());
        });

        dashboard.refresh().unwrap();
        dashboard
            .apply(SelectionEvent::ToggleExperiment("df_bamh_GT4AT2".to_string()))
            .unwrap();
        let charts = dashboard
            .apply(SelectionEvent::SetSynopticTime(SynopticTime::H06_H18))
            .unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                vec!["df_dtc".to_string()],
                vec!["df_dtc".to_string(), "df_bamh_GT4AT2".to_string()],
                vec!["df_dtc".to_string(), "df_bamh_GT4AT2".to_string()],
            ]
        );
        assert_eq!(charts.jo.series[0].points.len(), 6);
    }

    #[test]
    fn deselecting_everything_yields_empty_charts() {
        let mut dashboard = Dashboard::new(sample_catalog());
        let charts = dashboard
            .apply(SelectionEvent::ToggleExperiment("df_dtc".to_string()))
            .unwrap();
        assert!(charts.iter().all(|c| c.series.is_empty()));
    }

    #[test]
    fn failed_render_keeps_selection_and_skips_observers() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let mut dashboard = Dashboard::new(sample_catalog());
        dashboard.subscribe(move |_| *counter.borrow_mut() += 1);

        let err = dashboard
            .apply(SelectionEvent::ToggleExperiment("df_dtc_alex".to_string()))
            .unwrap_err();
        assert_eq!(err, SmnaError::UnknownExperiment("df_dtc_alex".to_string()));
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(dashboard.selection().experiments, vec!["df_dtc", "df_dtc_alex"]);
    }

    #[test]
    fn custom_style_is_used() {
        let style = ChartStyle {
            height: 320,
            ..ChartStyle::default()
        };
        let mut dashboard = Dashboard::new(sample_catalog()).with_style(style);
        let charts = dashboard.refresh().unwrap();
        assert_eq!(dashboard.style().height, 320);
        assert!(charts.iter().all(|c| c.height == 320));
        assert_eq!(dashboard.source().len(), 4);
    }
}
