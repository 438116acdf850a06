//! Time-window filtering and overlay composition for SMNA diagnostics.
//!
//! This crate turns the loaded (experiment × date × observation type ×
//! iteration stage) table into the chart specifications shown by the
//! dashboard:
//!
//! - [`source`]: the `DataSource` seam and the in-memory [`source::Catalog`]
//! - [`window`]: synoptic-time label → time-of-day window
//! - [`filter`]: one experiment → one filtered series
//! - [`overlay`]: selected experiments → one multi-line chart per metric
//! - [`dashboard`]: selection state and recompute-on-event
//!
//! # Usage
//!
//! ```rust
//! use smna_data::dashboard::{Dashboard, SelectionEvent};
//! use smna_data::source::{Catalog, Experiment};
//! use smna_gsi::synoptic::SynopticTime;
//!
//! let catalog: Catalog = vec![Experiment::new("df_dtc", Vec::new())].into_iter().collect();
//! let mut dashboard = Dashboard::new(catalog);
//! dashboard.subscribe(|charts| println!("{} lines", charts.nobs.series.len()));
//!
//! let charts = dashboard
//!     .apply(SelectionEvent::SetSynopticTime(SynopticTime::H00_H12))
//!     .unwrap();
//! assert_eq!(charts.nobs.series.len(), 1);
//! assert!(charts.nobs.series[0].points.is_empty());
//! ```

pub mod dashboard;
pub mod filter;
pub mod overlay;
pub mod source;
pub mod window;
