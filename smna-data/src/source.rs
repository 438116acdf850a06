//! The Data Source seam: experiment name → that experiment's records.
//!
//! The series filter never looks an experiment up by any other means than
//! [`DataSource::records`]; which physical format the table came from is
//! invisible past this point.

use smna_gsi::observation::ObservationRecord;

/// Read-only access to a loaded diagnostics table.
pub trait DataSource {
    /// Experiment names in load order.
    fn experiment_names(&self) -> Vec<&str>;

    /// All records of `experiment`, ordered by timestamp, or `None` if the
    /// table has no such experiment.
    fn records(&self, experiment: &str) -> Option<&[ObservationRecord]>;
}

/// A named partition of the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub name: String,
    records: Vec<ObservationRecord>,
}

impl Experiment {
    /// Build an experiment, sorting its records by timestamp.
    ///
    /// The sort is stable so rows sharing a timestamp keep table order.
    pub fn new(name: impl Into<String>, mut records: Vec<ObservationRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn records(&self) -> &[ObservationRecord] {
        &self.records
    }
}

/// In-memory table owned by the session: one [`Experiment`] per
/// first-level column group, in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    experiments: Vec<Experiment>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an experiment. A later experiment with the same name replaces
    /// the earlier one but keeps its position.
    pub fn insert(&mut self, experiment: Experiment) {
        match self
            .experiments
            .iter_mut()
            .find(|e| e.name == experiment.name)
        {
            Some(existing) => {
                log::warn!(
                    "[SMNA Debug] catalog: replacing experiment {}",
                    experiment.name
                );
                *existing = experiment;
            }
            None => self.experiments.push(experiment),
        }
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    /// Total number of records across all experiments.
    pub fn record_count(&self) -> usize {
        self.experiments.iter().map(|e| e.records.len()).sum()
    }
}

impl FromIterator<Experiment> for Catalog {
    fn from_iter<I: IntoIterator<Item = Experiment>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for experiment in iter {
            catalog.insert(experiment);
        }
        catalog
    }
}

impl DataSource for Catalog {
    fn experiment_names(&self) -> Vec<&str> {
        self.experiments.iter().map(|e| e.name.as_str()).collect()
    }

    fn records(&self, experiment: &str) -> Option<&[ObservationRecord]> {
        self.experiments
            .iter()
            .find(|e| e.name == experiment)
            .map(|e| e.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, record, sample_catalog};
    use smna_gsi::observation::{IterationStage, ObservationType};

    #[test]
    fn experiment_sorts_records_by_date() {
        let late = record(at(2, 18), ObservationType::Wind, IterationStage::Omf, 3);
        let early = record(at(1, 0), ObservationType::Wind, IterationStage::Omf, 1);
        let experiment = Experiment::new("df_dtc", vec![late.clone(), early.clone()]);
        assert_eq!(experiment.records(), &[early, late]);
    }

    #[test]
    fn catalog_keeps_load_order() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.experiment_names(),
            vec!["df_dtc", "df_bamh_T0", "df_bamh_T4", "df_bamh_GT4AT2"]
        );
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn catalog_lookup_by_name() {
        let catalog = sample_catalog();
        assert!(catalog.records("df_bamh_T4").is_some());
        assert!(catalog.records("df_dtc_alex").is_none());
        // 3 days x 4 cycles x 6 types x 7 stages
        assert_eq!(catalog.records("df_dtc").unwrap().len(), 504);
        assert_eq!(catalog.record_count(), 4 * 504);
    }

    #[test]
    fn catalog_insert_replaces_same_name_in_place() {
        let mut catalog = sample_catalog();
        catalog.insert(Experiment::new("df_bamh_T0", Vec::new()));
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.experiment_names()[1], "df_bamh_T0");
        assert!(catalog.records("df_bamh_T0").unwrap().is_empty());
    }

    #[test]
    fn empty_catalog() {
        let catalog: Catalog = Vec::new().into_iter().collect();
        assert!(catalog.is_empty());
        assert!(catalog.experiment_names().is_empty());
    }
}
