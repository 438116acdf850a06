//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// - `experiments` - Experiment names with their position in the source
///   table (first-level column group order)
/// - `records` - One row per (experiment, date, observation type, iteration
///   stage, occurrence) with the `Nobs`, `Jo` and `Jo/n` columns. The
///   numeric columns are NULL where the table has no value; `occurrence`
///   numbers repeats of a key within one load, starting at 0
///
/// Dates are stored as "YYYY-MM-DD HH:MM:SS" text so that lexical order is
/// chronological order.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS experiments (
        name TEXT PRIMARY KEY,
        position INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS records (
        experiment TEXT NOT NULL,
        date TEXT NOT NULL,
        observation_type TEXT NOT NULL,
        iter TEXT NOT NULL,
        occurrence INTEGER NOT NULL DEFAULT 0,
        nobs INTEGER,
        jo REAL,
        jo_n REAL,
        PRIMARY KEY (experiment, date, observation_type, iter, occurrence)
    );
    CREATE INDEX IF NOT EXISTS idx_records_experiment ON records(experiment);
    CREATE INDEX IF NOT EXISTS idx_records_date ON records(date);
    "#
}
