//! Table loading functions for populating the in-memory SQLite database.
//!
//! Two physical formats carry the same table:
//!
//! - **Two-level CSV** (as written by pandas for a frame with MultiIndex
//!   columns). The first header row names the experiment of each column,
//!   the second the column itself. An unnamed leading index column is
//!   ignored.
//!
//!   ```text
//!   ,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_bamh_T0,...
//!   ,Date,Observation Type,Iter,Nobs,Jo,Jo/n,Date,...
//!   0,2023-01-01 00:00:00,surface pressure,OMF,21463,9816.36,0.4573,2023-01-01 00:00:00,...
//!   ```
//!
//!   Experiments may have fewer rows than others; their cells are then
//!   empty and the experiment simply has no record on that line.
//!
//! - **Serialized object** (JSON), one entry per experiment in table order:
//!
//!   ```text
//!   {"experiments": [{"name": "df_dtc", "rows": [
//!     {"Date": "2023-01-01 00:00:00", "Observation Type": "wind",
//!      "Iter": "OMF", "Nobs": 1520, "Jo": 3040.0, "Jo/n": 2.0}]}]}
//!   ```
//!
//! Numeric cells that are empty or NaN (pandas writes NaN as an empty cell)
//! load as missing values; the record is kept so its cycle still shows up
//! on every chart. A key (date, observation type, iteration stage) repeated
//! within one experiment is kept once per occurrence and logged. Unknown
//! observation types, iteration stages, non-numeric cells or unparseable
//! dates fail the whole load.

use crate::Database;
use anyhow::Context;
use csv::StringRecord;
use flate2::read::GzDecoder;
use rusqlite::params;
use serde::Deserialize;
use smna_gsi::SmnaError;
use smna_gsi::observation::{parse_nobs, IterationStage, ObservationRecord, ObservationType};
use smna_utils::dates::{format_timestamp, parse_timestamp};
use std::collections::HashMap;
use std::io::Read;

/// Column names of every experiment group.
const DATE: &str = "Date";
const OBSERVATION_TYPE: &str = "Observation Type";
const ITER: &str = "Iter";
const NOBS: &str = "Nobs";
const JO: &str = "Jo";
const JO_N: &str = "Jo/n";

/// Records of one experiment, in table order.
type ExperimentRows = (String, Vec<ObservationRecord>);

/// Column positions of one experiment inside the two-level CSV.
struct ColumnGroup {
    experiment: String,
    date: usize,
    observation_type: usize,
    iter: usize,
    nobs: usize,
    jo: usize,
    jo_n: usize,
}

impl ColumnGroup {
    fn from_columns(experiment: String, columns: &HashMap<String, usize>) -> anyhow::Result<Self> {
        let find = |name: &str| {
            columns
                .get(name)
                .copied()
                .with_context(|| format!("experiment {} has no {:?} column", experiment, name))
        };
        Ok(Self {
            date: find(DATE)?,
            observation_type: find(OBSERVATION_TYPE)?,
            iter: find(ITER)?,
            nobs: find(NOBS)?,
            jo: find(JO)?,
            jo_n: find(JO_N)?,
            experiment,
        })
    }

    fn cell<'r>(&self, record: &'r StringRecord, index: usize) -> &'r str {
        record.get(index).unwrap_or("").trim()
    }

    /// This experiment's record on one data line.
    fn parse(&self, r: &StringRecord) -> anyhow::Result<ObservationRecord> {
        parse_record(
            self.cell(r, self.date),
            self.cell(r, self.observation_type),
            self.cell(r, self.iter),
            parse_nobs_value(self.cell(r, self.nobs))?,
            parse_value(JO, self.cell(r, self.jo))?,
            parse_value(JO_N, self.cell(r, self.jo_n))?,
        )
    }
}

/// Group header columns by experiment, keeping first-appearance order.
fn column_groups(experiments: &StringRecord, columns: &StringRecord) -> anyhow::Result<Vec<ColumnGroup>> {
    let mut order: Vec<(String, HashMap<String, usize>)> = Vec::new();
    for (index, experiment) in experiments.iter().enumerate() {
        let experiment = experiment.trim();
        let column = columns.get(index).unwrap_or("").trim();
        if experiment.is_empty() || column.is_empty() {
            continue;
        }
        match order.iter_mut().find(|(name, _)| name == experiment) {
            Some((_, group)) => {
                group.insert(column.to_string(), index);
            }
            None => order.push((
                experiment.to_string(),
                HashMap::from([(column.to_string(), index)]),
            )),
        }
    }
    order
        .into_iter()
        .map(|(experiment, columns)| ColumnGroup::from_columns(experiment, &columns))
        .collect()
}

/// Numeric cell pandas may leave empty or write as NaN.
fn parse_value(column: &str, s: &str) -> anyhow::Result<Option<f64>> {
    if s.is_empty() {
        return Ok(None);
    }
    let value: f64 = s
        .parse()
        .with_context(|| format!("{} is not a number: {:?}", column, s))?;
    Ok(Some(value).filter(|v| v.is_finite()))
}

/// `Nobs` cell: empty or NaN is missing, anything else must be a count.
fn parse_nobs_value(s: &str) -> anyhow::Result<Option<u64>> {
    match parse_value(NOBS, s)? {
        Some(_) => Ok(Some(parse_nobs(s)?)),
        None => Ok(None),
    }
}

/// Build a record from raw cells.
///
/// Fails when the date or a category label is invalid.
fn parse_record(
    date: &str,
    observation_type: &str,
    iter: &str,
    nobs: Option<u64>,
    jo: Option<f64>,
    jo_n: Option<f64>,
) -> anyhow::Result<ObservationRecord> {
    let date = parse_timestamp(date).map_err(|_| SmnaError::InvalidTimestamp(date.to_string()))?;
    Ok(ObservationRecord {
        date,
        observation_type: observation_type.parse()?,
        iteration_stage: iter.parse()?,
        nobs,
        jo,
        jo_n,
    })
}

/// Count records with at least one missing numeric value.
fn count_incomplete(tables: &[ExperimentRows]) -> usize {
    tables
        .iter()
        .flat_map(|(_, rows)| rows.iter())
        .filter(|r| r.nobs.is_none() || r.jo.is_none() || r.jo_n.is_none())
        .count()
}

/// Parse a two-level CSV into per-experiment record lists.
fn read_two_level_csv<R: Read>(reader: R) -> anyhow::Result<Vec<ExperimentRows>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = rdr.records();

    let experiments = records
        .next()
        .context("table is empty: missing experiment header row")??;
    let columns = records
        .next()
        .context("table has no column header row")??;
    let groups = column_groups(&experiments, &columns)?;

    let mut tables: Vec<ExperimentRows> = groups
        .iter()
        .map(|g| (g.experiment.clone(), Vec::new()))
        .collect();
    for (line, result) in records.enumerate() {
        let r = result?;
        for (group, (_, rows)) in groups.iter().zip(tables.iter_mut()) {
            if group.cell(&r, group.date).is_empty() {
                continue;
            }
            let record = group
                .parse(&r)
                .with_context(|| format!("{} data line {}", group.experiment, line + 1))?;
            rows.push(record);
        }
    }
    Ok(tables)
}

#[derive(Deserialize)]
struct JoTableDocument {
    experiments: Vec<JoTableExperiment>,
}

#[derive(Deserialize)]
struct JoTableExperiment {
    name: String,
    rows: Vec<JoTableRow>,
}

#[derive(Deserialize)]
struct JoTableRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Observation Type")]
    observation_type: String,
    #[serde(rename = "Iter")]
    iter: String,
    #[serde(rename = "Nobs")]
    nobs: Option<f64>,
    #[serde(rename = "Jo")]
    jo: Option<f64>,
    #[serde(rename = "Jo/n")]
    jo_n: Option<f64>,
}

impl JoTableRow {
    fn into_record(self) -> anyhow::Result<ObservationRecord> {
        let nobs = self
            .nobs
            .filter(|v| v.is_finite())
            .map(|v| parse_nobs(&v.to_string()))
            .transpose()?;
        parse_record(
            &self.date,
            &self.observation_type,
            &self.iter,
            nobs,
            self.jo.filter(|v| v.is_finite()),
            self.jo_n.filter(|v| v.is_finite()),
        )
    }
}

impl Database {
    /// Load the two-level CSV table from a string.
    ///
    /// # Example CSV
    /// ```text
    /// ,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
    /// ,Date,Observation Type,Iter,Nobs,Jo,Jo/n
    /// 0,2023-01-01 00:00:00,wind,OMF,1520,3040.0,2.0
    /// ```
    pub fn load_jo_table_csv(&self, csv_data: &str) -> anyhow::Result<()> {
        let tables = read_two_level_csv(csv_data.as_bytes())?;
        self.insert_tables(&tables)
    }

    /// Load a gzip-compressed two-level CSV table.
    pub fn load_jo_table_csv_gz(&self, gz_data: &[u8]) -> anyhow::Result<()> {
        let tables = read_two_level_csv(GzDecoder::new(gz_data))
            .context("failed to read compressed table")?;
        self.insert_tables(&tables)
    }

    /// Load the serialized-object form of the table from a JSON string.
    pub fn load_jo_table_json(&self, json_data: &str) -> anyhow::Result<()> {
        let document: JoTableDocument = serde_json::from_str(json_data)?;
        let mut tables: Vec<ExperimentRows> = Vec::with_capacity(document.experiments.len());
        for experiment in document.experiments {
            let mut rows = Vec::with_capacity(experiment.rows.len());
            for (index, row) in experiment.rows.into_iter().enumerate() {
                let record = row
                    .into_record()
                    .with_context(|| format!("{} row {}", experiment.name, index))?;
                rows.push(record);
            }
            tables.push((experiment.name, rows));
        }
        self.insert_tables(&tables)
    }

    /// Insert parsed experiments in one transaction.
    ///
    /// Experiments already known keep their position; re-loaded records
    /// replace the stored ones. A key repeated within one load is stored
    /// once per occurrence.
    fn insert_tables(&self, tables: &[ExperimentRows]) -> anyhow::Result<()> {
        let incomplete = count_incomplete(tables);
        if incomplete > 0 {
            log::info!(
                "[SMNA Debug] loader: {} records have missing values",
                incomplete
            );
        }
        let conn = self.conn.borrow();
        let tx = conn.unchecked_transaction()?;
        let mut count = 0u32;
        let mut duplicates = 0u32;
        {
            let mut insert_experiment = tx.prepare(
                "INSERT OR IGNORE INTO experiments (name, position)
                 VALUES (?1, (SELECT COUNT(*) FROM experiments))",
            )?;
            let mut insert_record = tx.prepare(
                "INSERT OR REPLACE INTO records
                 (experiment, date, observation_type, iter, occurrence, nobs, jo, jo_n)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for (experiment, rows) in tables {
                insert_experiment.execute(params![experiment])?;
                let mut seen: HashMap<(String, ObservationType, IterationStage), i64> = HashMap::new();
                for r in rows {
                    let date = format_timestamp(&r.date);
                    let occurrence = seen
                        .entry((date.clone(), r.observation_type, r.iteration_stage))
                        .or_insert(0);
                    if *occurrence > 0 {
                        log::warn!(
                            "[SMNA Debug] loader: {} repeats {} {} {}",
                            experiment,
                            date,
                            r.observation_type,
                            r.iteration_stage
                        );
                        duplicates += 1;
                    }
                    let nobs = r
                        .nobs
                        .map(i64::try_from)
                        .transpose()
                        .with_context(|| format!("{} Nobs out of range at {}", experiment, date))?;
                    insert_record.execute(params![
                        experiment,
                        date,
                        r.observation_type.label(),
                        r.iteration_stage.label(),
                        *occurrence,
                        nobs,
                        r.jo,
                        r.jo_n,
                    ])?;
                    *occurrence += 1;
                    count += 1;
                }
            }
        }
        tx.commit()?;
        if duplicates > 0 {
            log::warn!(
                "[SMNA Debug] loader: {} duplicate records kept",
                duplicates
            );
        }
        log::info!(
            "[SMNA Debug] loader: Loaded {} records for {} experiments",
            count,
            tables.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const TWO_EXPERIMENTS: &str = "\
,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_bamh_T0,df_bamh_T0,df_bamh_T0,df_bamh_T0,df_bamh_T0,df_bamh_T0
,Date,Observation Type,Iter,Nobs,Jo,Jo/n,Date,Observation Type,Iter,Nobs,Jo,Jo/n
0,2023-01-01 00:00:00,wind,OMF,1520,3040.0,2.0,2023-01-01 00:00:00,wind,OMF,1400,2100.0,1.5
1,2023-01-01 06:00:00,wind,OMF,1600,3200.0,2.0,2023-01-01 06:00:00,wind,OMF,1450,2175.0,1.5
2,2023-01-01 12:00:00,wind,OMF,1700.0,3400.0,2.0,,,,,,
";

    fn count(db: &Database, sql: &str) -> i64 {
        db.conn.borrow().query_row(sql, [], |row| row.get(0)).unwrap()
    }

    #[test]
    fn load_two_level_csv() {
        let db = Database::new().unwrap();
        db.load_jo_table_csv(TWO_EXPERIMENTS).unwrap();

        assert_eq!(count(&db, "SELECT COUNT(*) FROM experiments"), 2);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM records"), 5);
        assert_eq!(
            count(&db, "SELECT COUNT(*) FROM records WHERE experiment = 'df_bamh_T0'"),
            2,
            "Shorter experiment should only get its non-empty rows"
        );

        let conn = db.conn.borrow();
        let nobs: i64 = conn
            .query_row(
                "SELECT nobs FROM records WHERE experiment = 'df_dtc' AND date = '2023-01-01 12:00:00'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(nobs, 1700, "Float Nobs should load as a count");
    }

    #[test]
    fn load_csv_without_index_column() {
        let csv = "\
df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
Date,Observation Type,Iter,Nobs,Jo,Jo/n
2023010100,gps,OMA (AFTER 1st OUTER LOOP),10,5.0,0.5
";
        let db = Database::new().unwrap();
        db.load_jo_table_csv(csv).unwrap();
        let conn = db.conn.borrow();
        let (date, iter): (String, String) = conn
            .query_row("SELECT date, iter FROM records", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(date, "2023-01-01 00:00:00");
        assert_eq!(iter, "OMA (AFTER 1st OUTER LOOP)");
    }

    #[test]
    fn load_keeps_rows_with_missing_values() {
        let csv = "\
,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
,Date,Observation Type,Iter,Nobs,Jo,Jo/n
0,2023-01-01 00:00:00,wind,OMF,0,0.0,
1,2023-01-01 06:00:00,wind,OMF,12,24.0,2.0
2,2023-01-01 12:00:00,wind,OMF,,NaN,NaN
";
        let db = Database::new().unwrap();
        db.load_jo_table_csv(csv).unwrap();
        assert_eq!(
            count(&db, "SELECT COUNT(*) FROM records"),
            3,
            "Rows with missing values still count as cycles"
        );
        assert_eq!(count(&db, "SELECT COUNT(*) FROM records WHERE jo_n IS NULL"), 2);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM records WHERE nobs IS NULL"), 1);
        assert_eq!(
            count(&db, "SELECT nobs FROM records WHERE date = '2023-01-01 00:00:00'"),
            0
        );
    }

    #[test]
    fn load_rejects_non_numeric_cells() {
        let csv = "\
,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
,Date,Observation Type,Iter,Nobs,Jo,Jo/n
0,2023-01-01 00:00:00,wind,OMF,12,lots,2.0
";
        let db = Database::new().unwrap();
        let err = db.load_jo_table_csv(csv).unwrap_err();
        assert!(format!("{:#}", err).contains("Jo is not a number"));
    }

    #[test]
    fn load_keeps_repeated_keys() {
        let csv = "\
,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
,Date,Observation Type,Iter,Nobs,Jo,Jo/n
0,2023-01-01 00:00:00,wind,OMF,10,20.0,2.0
1,2023-01-01 00:00:00,wind,OMF,11,22.0,2.0
2,2023-01-01 00:00:00,wind,OMA (AFTER 1st OUTER LOOP),12,24.0,2.0
";
        let db = Database::new().unwrap();
        db.load_jo_table_csv(csv).unwrap();
        assert_eq!(count(&db, "SELECT COUNT(*) FROM records"), 3);
        assert_eq!(count(&db, "SELECT MAX(occurrence) FROM records"), 1);
    }

    #[test]
    fn load_rejects_nobs_beyond_sqlite_integers() {
        let csv = "\
,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
,Date,Observation Type,Iter,Nobs,Jo,Jo/n
0,2023-01-01 00:00:00,wind,OMF,18446744073709551615,2.0,2.0
";
        let db = Database::new().unwrap();
        let err = db.load_jo_table_csv(csv).unwrap_err();
        assert!(format!("{:#}", err).contains("Nobs out of range"));
        assert_eq!(count(&db, "SELECT COUNT(*) FROM records"), 0);
    }

    #[test]
    fn load_rejects_unknown_labels() {
        let csv = "\
,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
,Date,Observation Type,Iter,Nobs,Jo,Jo/n
0,2023-01-01 00:00:00,ozone,OMF,1,2.0,2.0
";
        let db = Database::new().unwrap();
        let err = db.load_jo_table_csv(csv).unwrap_err();
        assert!(format!("{:#}", err).contains("ozone"));
    }

    #[test]
    fn load_rejects_bad_dates() {
        let csv = "\
,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
,Date,Observation Type,Iter,Nobs,Jo,Jo/n
0,yesterday,wind,OMF,1,2.0,2.0
";
        let db = Database::new().unwrap();
        let err = db.load_jo_table_csv(csv).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse timestamp: yesterday"));
    }

    #[test]
    fn load_rejects_missing_columns() {
        let csv = "\
,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
,Date,Observation Type,Iter,Nobs,Jo
0,2023-01-01 00:00:00,wind,OMF,1,2.0
";
        let db = Database::new().unwrap();
        let err = db.load_jo_table_csv(csv).unwrap_err();
        assert!(err.to_string().contains("Jo/n"));
    }

    #[test]
    fn load_rejects_empty_input() {
        let db = Database::new().unwrap();
        assert!(db.load_jo_table_csv("").is_err());
    }

    #[test]
    fn reload_replaces_on_conflict() {
        let db = Database::new().unwrap();
        db.load_jo_table_csv(TWO_EXPERIMENTS).unwrap();
        let updated = "\
,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
,Date,Observation Type,Iter,Nobs,Jo,Jo/n
0,2023-01-01 00:00:00,wind,OMF,9,18.0,2.0
";
        db.load_jo_table_csv(updated).unwrap();
        assert_eq!(count(&db, "SELECT COUNT(*) FROM records"), 5);
        assert_eq!(
            count(
                &db,
                "SELECT nobs FROM records WHERE experiment = 'df_dtc' AND date = '2023-01-01 00:00:00'"
            ),
            9
        );
    }

    #[test]
    fn load_gzipped_csv() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(TWO_EXPERIMENTS.as_bytes()).unwrap();
        let gz = encoder.finish().unwrap();

        let db = Database::new().unwrap();
        db.load_jo_table_csv_gz(&gz).unwrap();
        assert_eq!(count(&db, "SELECT COUNT(*) FROM records"), 5);
    }

    #[test]
    fn load_gzipped_rejects_plain_bytes() {
        let db = Database::new().unwrap();
        assert!(db.load_jo_table_csv_gz(TWO_EXPERIMENTS.as_bytes()).is_err());
    }

    #[test]
    fn load_json_object() {
        let json = r#"{"experiments": [
            {"name": "df_dtc_alex", "rows": [
                {"Date": "2023-01-01 00:00:00", "Observation Type": "radiance",
                 "Iter": "OMA (AFTER 2nd OUTER LOOP)", "Nobs": 250000, "Jo": 125000.0, "Jo/n": 0.5},
                {"Date": "2023-01-01T06:00:00", "Observation Type": "radiance",
                 "Iter": "OMA (AFTER 2nd OUTER LOOP)", "Nobs": 260000.0, "Jo": null, "Jo/n": null}
            ]},
            {"name": "df_dtc", "rows": []}
        ]}"#;
        let db = Database::new().unwrap();
        db.load_jo_table_json(json).unwrap();
        assert_eq!(count(&db, "SELECT COUNT(*) FROM records"), 2);
        assert_eq!(count(&db, "SELECT COUNT(*) FROM records WHERE jo IS NULL"), 1);
        assert_eq!(
            count(&db, "SELECT position FROM experiments WHERE name = 'df_dtc'"),
            1
        );
    }

    #[test]
    fn load_json_rejects_malformed_document() {
        let db = Database::new().unwrap();
        assert!(db.load_jo_table_json(r#"{"experiments": {}}"#).is_err());
    }
}
