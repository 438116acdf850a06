//! In-memory SQLite database layer for GSI cost-function tables.
//!
//! This crate is the Data Source of the dashboard: it loads the
//! pre-computed (experiment × date × observation type × iteration stage)
//! table into an in-memory SQLite database and hands the rest of the
//! system a [`smna_data::source::Catalog`].
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite` (compiles to WASM via `wasm32-unknown-unknown`)
//! - Table data embedded via `include_str!` at compile time in consuming crates
//! - The table is loaded once at session start and only read afterwards
//!
//! # Source formats
//!
//! See [`loader`](Database::load_jo_table_csv) for details.
//!
//! - row-oriented CSV with a two-level column header (experiment, column)
//! - the same CSV, gzip-compressed
//! - a serialized JSON object with one entry per experiment
//!
//! # Usage
//!
//! ```rust
//! use smna_data::source::DataSource;
//! use smna_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_jo_table_csv("\
//! ,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc,df_dtc
//! ,Date,Observation Type,Iter,Nobs,Jo,Jo/n
//! 0,2023-01-01 00:00:00,wind,OMF,1520,3040.0,2.0
//! ").unwrap();
//!
//! let catalog = db.load_catalog().unwrap();
//! assert_eq!(catalog.experiment_names(), vec!["df_dtc"]);
//! assert_eq!(catalog.records("df_dtc").unwrap().len(), 1);
//! ```

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding the diagnostics table.
///
/// This struct is cheaply cloneable (via `Rc`) and suitable for sharing
/// across Dioxus components in a single-threaded WASM environment.
///
/// # Example
///
/// ```rust
/// use smna_db::Database;
///
/// let db = Database::new().unwrap();
/// assert!(db.query_experiments().unwrap().is_empty());
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
