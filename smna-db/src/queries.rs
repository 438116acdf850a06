//! Typed query methods for reading the table back out of the database.

use crate::models::ExperimentInfo;
use crate::Database;
use anyhow::Context;
use rusqlite::params;
use smna_data::source::{Catalog, Experiment};
use smna_gsi::observation::ObservationRecord;
use smna_utils::dates::parse_timestamp;

impl Database {
    /// Get all experiments with their record counts and date span.
    ///
    /// Ordered as the experiments appeared in the loaded table.
    pub fn query_experiments(&self) -> anyhow::Result<Vec<ExperimentInfo>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT e.name, COUNT(r.date), MIN(r.date), MAX(r.date)
             FROM experiments e
             LEFT JOIN records r ON r.experiment = e.name
             GROUP BY e.name
             ORDER BY e.position",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ExperimentInfo {
                    name: row.get(0)?,
                    record_count: row.get::<_, i64>(1)? as usize,
                    first_date: row.get(2)?,
                    last_date: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[SMNA Debug] query: query_experiments returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get every record of one experiment, ordered chronologically.
    ///
    /// An experiment that was never loaded yields an empty list.
    pub fn query_experiment_records(&self, experiment: &str) -> anyhow::Result<Vec<ObservationRecord>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT date, observation_type, iter, nobs, jo, jo_n FROM records
             WHERE experiment = ?1
             ORDER BY date, rowid",
        )?;
        let raw_rows: Vec<(String, String, String, Option<i64>, Option<f64>, Option<f64>)> = stmt
            .query_map(params![experiment], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut results = Vec::with_capacity(raw_rows.len());
        for (date, observation_type, iter, nobs, jo, jo_n) in raw_rows {
            results.push(ObservationRecord {
                date: parse_timestamp(&date)?,
                observation_type: observation_type.parse()?,
                iteration_stage: iter.parse()?,
                nobs: nobs
                    .map(u64::try_from)
                    .transpose()
                    .context("negative Nobs stored")?,
                jo,
                jo_n,
            });
        }
        log::info!(
            "[SMNA Debug] query: query_experiment_records({}) returned {} records",
            experiment,
            results.len()
        );
        Ok(results)
    }

    /// Get the (min, max) cycle across all experiments.
    ///
    /// Dates are "YYYY-MM-DD HH:MM:SS"; `None` when nothing is loaded.
    pub fn query_date_range(&self) -> anyhow::Result<Option<(String, String)>> {
        let conn = self.conn.borrow();
        let (min_date, max_date) =
            conn.query_row("SELECT MIN(date), MAX(date) FROM records", [], |row| {
                Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?))
            })?;
        let range = min_date.zip(max_date);
        log::info!(
            "[SMNA Debug] query: query_date_range returned {:?}",
            range
        );
        Ok(range)
    }

    /// Snapshot the whole table into a [`Catalog`], the read-only
    /// name → records mapping the dashboard filters from.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let mut catalog = Catalog::new();
        for info in self.query_experiments()? {
            let records = self.query_experiment_records(&info.name)?;
            catalog.insert(Experiment::new(info.name, records));
        }
        log::info!(
            "[SMNA Debug] query: load_catalog built {} experiments, {} records",
            catalog.len(),
            catalog.record_count()
        );
        Ok(catalog)
    }
}
